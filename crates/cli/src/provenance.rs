//! `<artifact>.provenance.json` sidecars: code revision, crate version, inputs, params.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What went into an artifact.
pub struct Payload {
    pub input: String,
    pub params: Value,
    pub summary: Value,
}

impl Payload {
    pub fn new(input: impl Into<String>, params: Value) -> Self {
        Self {
            input: input.into(),
            params,
            summary: Value::Null,
        }
    }

    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = summary;
        self
    }
}

/// Provenance document for `outputs`.
pub fn document(payload: &Payload, outputs: &[String]) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "geoscan_version": geoscan::VERSION,
        "input": payload.input,
        "params": payload.params,
        "summary": payload.summary,
        "outputs": outputs,
    })
}

/// Write the sidecar next to `artifact` and return its path.
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: &Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = provenance_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let doc = document(payload, &[artifact.to_string_lossy().into_owned()]);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Build-time `GIT_COMMIT`, then the runtime variable, then `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_name_replaces_extension() {
        let derived = provenance_path(Path::new("/tmp/runs/cube.csv"));
        assert_eq!(derived, Path::new("/tmp/runs/cube.provenance.json"));
        let bare = provenance_path(Path::new("arrivals"));
        assert_eq!(bare, Path::new("arrivals.provenance.json"));
    }

    #[test]
    fn sidecar_records_params_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("run.csv");
        let payload = Payload::new("cube.txt", json!({"radius": 3.0}))
            .with_summary(json!({"processed": 12}));
        let path = write_sidecar(&artifact, &payload).unwrap();
        assert!(path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["radius"], 3.0);
        assert_eq!(parsed["summary"]["processed"], 12);
        assert_eq!(parsed["geoscan_version"], geoscan::VERSION);
    }
}
