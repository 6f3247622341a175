//! Pipeline entry points: polyhedron in, arrival table out.
//!
//! `prepare` builds the adjacency once, unfolds from every vertex and seeds a
//! `ScanNet`; `run` additionally drives it to completion. Unless set explicitly,
//! the far-hinge cutoff defaults to the radius, since no distance beyond it can
//! ever be scheduled.

use crate::cfg::{ScanCfg, UnfoldCfg};
use crate::error::ScanError;
use crate::geom3::Polyhedron;
use crate::sim::{NoopObserver, ScanNet, ScanObserver, ScanSummary};
use crate::unfold::{build_adjacency, map_all};

/// Unfolding parameters as `prepare` uses them.
pub fn effective_unfold_cfg(cfg: &ScanCfg) -> UnfoldCfg {
    UnfoldCfg {
        max_distance: cfg.unfold.max_distance.or(Some(cfg.radius)),
        ..cfg.unfold
    }
}

pub fn prepare(poly: &Polyhedron, cfg: &ScanCfg) -> Result<ScanNet, ScanError> {
    cfg.validate(poly.vertex_count())?;
    let adj = build_adjacency(poly)?;
    let maps = map_all(poly, &adj, &effective_unfold_cfg(cfg))?;
    let degenerate: usize = maps.iter().map(|m| m.degeneracies.len()).sum();
    if degenerate > 0 {
        tracing::warn!(paths = degenerate, "unfolding paths aborted on degenerate geometry");
    }
    ScanNet::new(maps, cfg.radius, cfg.start, cfg.sim)
}

pub fn run(poly: &Polyhedron, cfg: &ScanCfg) -> Result<ScanSummary, ScanError> {
    run_observed(poly, cfg, &mut NoopObserver)
}

pub fn run_observed<O: ScanObserver + ?Sized>(
    poly: &Polyhedron,
    cfg: &ScanCfg,
    obs: &mut O,
) -> Result<ScanSummary, ScanError> {
    prepare(poly, cfg)?.launch(obs)
}
