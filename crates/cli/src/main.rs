mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use geoscan::geom3::{parse_polyhedron, special, Polyhedron, VertexId};
use geoscan::rand3::{random_prism, PrismParams};
use geoscan::sim::{LogObserver, ScanSummary};
use geoscan::unfold::{build_adjacency, unfold_from};
use geoscan::{ScanCfg, SimCfg, UnfoldCfg, Visibility};
use polars::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "geoscan-cli")]
#[command(about = "Geodesic unfolding and propagation runs on convex polyhedra")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Unfold from every vertex, run the propagation and write the arrival table
    Run {
        #[command(flatten)]
        source: ShapeArgs,
        #[command(flatten)]
        scan: ScanArgs,
        /// Arrival table (CSV); a `.provenance.json` sidecar is written next to it
        #[arg(long)]
        out: Option<PathBuf>,
        /// Log the arrival counters at every timestamp
        #[arg(long)]
        snapshots: bool,
    },
    /// Print the merged distance sets from one source vertex as JSON
    Distances {
        #[command(flatten)]
        source: ShapeArgs,
        #[arg(long, default_value_t = 0)]
        from: usize,
        #[arg(long, default_value_t = 25)]
        budget: usize,
        #[arg(long, default_value_t = 1e-5)]
        dedup_eps: f64,
        #[arg(long)]
        max_distance: Option<f64>,
        #[arg(long, value_enum, default_value_t = VisibilityArg::Hinge)]
        visibility: VisibilityArg,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    Tetrahedron,
    Cube,
    Octahedron,
    Prism,
    RandomPrism,
}

/// Which window decides vertex visibility and hinge crossing.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum VisibilityArg {
    /// Wedge of the hinge just crossed
    Hinge,
    /// Intersection of every crossed wedge along the path
    Cumulative,
}

impl From<VisibilityArg> for Visibility {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::Hinge => Visibility::Hinge,
            VisibilityArg::Cumulative => Visibility::Cumulative,
        }
    }
}

/// Where the polyhedron comes from: a text file or a built-in shape.
#[derive(Args)]
struct ShapeArgs {
    /// Polyhedron in the vertex/face text format
    #[arg(long, conflicts_with = "shape")]
    input: Option<PathBuf>,
    #[arg(long, value_enum)]
    shape: Option<Shape>,
    /// Edge length / side / circumradius of the built-in shape
    #[arg(long, default_value_t = 1.0)]
    size: f64,
    /// Base polygon size for `prism`
    #[arg(long, default_value_t = 6)]
    sides: usize,
    /// Seed for `random-prism`
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Args)]
struct ScanArgs {
    #[arg(long, default_value_t = 0)]
    start: usize,
    #[arg(long, default_value_t = 25.0)]
    radius: f64,
    #[arg(long, default_value_t = 25)]
    budget: usize,
    #[arg(long, default_value_t = 1e-5)]
    dedup_eps: f64,
    #[arg(long, default_value_t = 1e-9)]
    sqrt_slack: f64,
    /// Far-hinge cutoff; defaults to the radius
    #[arg(long)]
    max_distance: Option<f64>,
    #[arg(long, value_enum, default_value_t = VisibilityArg::Hinge)]
    visibility: VisibilityArg,
    #[arg(long, default_value_t = 1e-4)]
    time_eps: f64,
    #[arg(long)]
    max_events: Option<u64>,
}

impl ScanArgs {
    fn cfg(&self) -> ScanCfg {
        ScanCfg {
            start: VertexId(self.start),
            radius: self.radius,
            unfold: UnfoldCfg {
                budget: self.budget,
                dedup_eps: self.dedup_eps,
                sqrt_slack: self.sqrt_slack,
                max_distance: self.max_distance,
                visibility: self.visibility.into(),
            },
            sim: SimCfg {
                time_eps: self.time_eps,
                max_events: self.max_events,
            },
        }
    }

    fn params(&self) -> serde_json::Value {
        json!({
            "start": self.start,
            "radius": self.radius,
            "budget": self.budget,
            "dedup_eps": self.dedup_eps,
            "sqrt_slack": self.sqrt_slack,
            "max_distance": self.max_distance,
            "visibility": format!("{:?}", self.visibility).to_lowercase(),
            "time_eps": self.time_eps,
            "max_events": self.max_events,
        })
    }
}

impl ShapeArgs {
    fn label(&self) -> String {
        match (&self.input, self.shape) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(shape)) => format!(
                "{shape:?}(size={}, sides={}, seed={})",
                self.size, self.sides, self.seed
            ),
            (None, None) => "<none>".to_string(),
        }
    }

    fn load(&self) -> Result<Polyhedron> {
        if let Some(path) = &self.input {
            return load_polyhedron(path);
        }
        let Some(shape) = self.shape else {
            bail!("either --input or --shape is required");
        };
        let poly = match shape {
            Shape::Tetrahedron => special::tetrahedron(self.size)?,
            Shape::Cube => special::cube(self.size)?,
            Shape::Octahedron => special::octahedron(self.size)?,
            Shape::Prism => special::prism(self.sides, self.size, self.size)?,
            Shape::RandomPrism => {
                let params = PrismParams {
                    radius: self.size,
                    ..PrismParams::default()
                };
                random_prism(&params, self.seed)?.polyhedron
            }
        };
        Ok(poly)
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            source,
            scan,
            out,
            snapshots,
        } => run(&source, &scan, out.as_deref(), snapshots),
        Action::Distances {
            source,
            from,
            budget,
            dedup_eps,
            max_distance,
            visibility,
        } => {
            let cfg = UnfoldCfg {
                budget,
                dedup_eps,
                max_distance,
                visibility: visibility.into(),
                ..UnfoldCfg::default()
            };
            distances(&source, VertexId(from), &cfg)
        }
        Action::Report => report(),
    }
}

fn load_polyhedron(path: &Path) -> Result<Polyhedron> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading polyhedron {}", path.display()))?;
    let poly =
        parse_polyhedron(&text).with_context(|| format!("parsing polyhedron {}", path.display()))?;
    Ok(poly)
}

fn run(source: &ShapeArgs, scan: &ScanArgs, out: Option<&Path>, snapshots: bool) -> Result<()> {
    let label = source.label();
    let poly = source.load()?;
    tracing::info!(
        input = %label,
        vertices = poly.vertex_count(),
        faces = poly.face_count(),
        "polyhedron loaded"
    );
    let cfg = scan.cfg();
    let mut obs = LogObserver { snapshots };
    let summary = geoscan::api::run_observed(&poly, &cfg, &mut obs).context("propagation run")?;
    for (v, count) in summary.arrivals.iter().enumerate() {
        tracing::info!(vertex = v, arrivals = count, "final count");
    }
    if let Some(out) = out {
        write_arrivals(out, &summary)?;
        let payload = Payload::new(label, scan.params()).with_summary(json!({
            "processed": summary.processed,
            "timestamp": summary.timestamp,
        }));
        let sidecar = provenance::write_sidecar(out, &payload)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "arrival table written");
    }
    Ok(())
}

/// Arrival table as `vertex,arrivals` CSV.
fn write_arrivals(path: &Path, summary: &ScanSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let vertices: Vec<u64> = (0..summary.arrivals.len() as u64).collect();
    let mut df = df!(
        "vertex" => vertices,
        "arrivals" => summary.arrivals.clone()
    )?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(file).include_header(true).finish(&mut df)?;
    Ok(())
}

#[derive(Serialize)]
struct DistanceReport {
    source: usize,
    budget: usize,
    distances: Vec<Vec<f64>>,
    degeneracies: Vec<String>,
}

fn distance_report(poly: &Polyhedron, from: VertexId, cfg: &UnfoldCfg) -> Result<DistanceReport> {
    let adj = build_adjacency(poly)?;
    let map = unfold_from(poly, &adj, from, cfg)?;
    Ok(DistanceReport {
        source: from.0,
        budget: cfg.budget,
        distances: map.iter().map(|(_, ds)| ds.to_vec()).collect(),
        degeneracies: map.degeneracies.iter().map(ToString::to_string).collect(),
    })
}

fn distances(source: &ShapeArgs, from: VertexId, cfg: &UnfoldCfg) -> Result<()> {
    let poly = source.load()?;
    let report = distance_report(&poly, from, cfg)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn report() -> Result<()> {
    let payload = Payload::new("", json!({}));
    let doc = provenance::document(&payload, &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CUBE: &str = "8
        0 0 0  1 0 0  0 1 0  1 1 0
        0 0 1  1 0 1  0 1 1  1 1 1
        6
        1 3 4 2 0
        5 6 8 7 0
        1 2 6 5 0
        3 7 8 4 0
        1 5 7 3 0
        2 4 8 6 0";

    fn cube_scan(radius: f64) -> ScanArgs {
        ScanArgs {
            start: 0,
            radius,
            budget: 4,
            dedup_eps: 1e-5,
            sqrt_slack: 1e-9,
            max_distance: None,
            visibility: VisibilityArg::Hinge,
            time_eps: 1e-4,
            max_events: None,
        }
    }

    #[test]
    fn run_writes_table_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cube.txt");
        std::fs::write(&input, CUBE).unwrap();
        let source = ShapeArgs {
            input: Some(input),
            shape: None,
            size: 1.0,
            sides: 6,
            seed: 0,
        };
        let out = dir.path().join("out").join("cube.csv");
        run(&source, &cube_scan(3.0), Some(&out), false).unwrap();

        let df = LazyCsvReader::new(&out).finish().unwrap().collect().unwrap();
        assert_eq!(df.height(), 8);
        let arrivals = df.column("arrivals").unwrap().i64().unwrap();
        assert!(arrivals.into_iter().all(|c| c.unwrap_or(0) >= 1));

        let sidecar = dir.path().join("out").join("cube.provenance.json");
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(doc["params"]["radius"], 3.0);
        assert_eq!(doc["params"]["visibility"], "hinge");
        assert!(doc["summary"]["processed"].as_u64().unwrap() >= 8);
    }

    #[test]
    fn built_in_shapes_load() {
        for (shape, vertices) in [
            (Shape::Tetrahedron, 4),
            (Shape::Cube, 8),
            (Shape::Octahedron, 6),
            (Shape::Prism, 12),
        ] {
            let args = ShapeArgs {
                input: None,
                shape: Some(shape),
                size: 1.0,
                sides: 6,
                seed: 3,
            };
            assert_eq!(args.load().unwrap().vertex_count(), vertices);
        }
        let none = ShapeArgs {
            input: None,
            shape: None,
            size: 1.0,
            sides: 6,
            seed: 0,
        };
        assert!(none.load().is_err());
    }

    #[test]
    fn distance_report_matches_cube_geometry() {
        let cube = special::cube(1.0).unwrap();
        let cfg = UnfoldCfg {
            budget: 3,
            ..UnfoldCfg::default()
        };
        let report = distance_report(&cube, VertexId(0), &cfg).unwrap();
        assert_eq!(report.distances.len(), 8);
        assert!((report.distances[7][0] - 5f64.sqrt()).abs() < 1e-9);
        assert!(report.degeneracies.is_empty());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], 0);
    }

    #[test]
    fn bad_input_is_reported_with_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.txt");
        std::fs::write(&input, "3\n0 0 0\n1 0").unwrap();
        let err = load_polyhedron(&input).unwrap_err();
        assert!(format!("{err:#}").contains("broken.txt"));
    }
}
