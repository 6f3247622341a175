//! Geodesic unfolding of convex polyhedra and discrete-event propagation.
//!
//! Pipeline
//! - `geom3`: polyhedron model, text parsing, shape constructors.
//! - `unfold`: face adjacency, planar unfolding, per-source distance sets.
//! - `sim`: time-ordered propagation over those sets (`ScanNet`).
//! - `api`: the whole pipeline in one call.
//!
//! Single-threaded and deterministic: the same input and configuration always give
//! the same arrival table.

pub mod api;
pub mod cfg;
pub mod error;
pub mod geom3;
pub mod rand3;
pub mod sim;
pub mod unfold;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{ScanCfg, SimCfg, UnfoldCfg, Visibility};
pub use error::{Result, ScanError};

/// Common exports for callers.
pub mod prelude {
    pub use crate::api::{prepare, run, run_observed};
    pub use crate::cfg::{ScanCfg, SimCfg, UnfoldCfg, Visibility};
    pub use crate::error::{GeometryError, InputError, ScanError, TopologyError};
    pub use crate::geom3::{parse_polyhedron, special, Polyhedron, Vec3, VertexId};
    pub use crate::sim::{LogObserver, NoopObserver, ScanNet, ScanObserver, ScanSummary};
    pub use crate::unfold::{build_adjacency, map_all, unfold_from, Mapper};
}
