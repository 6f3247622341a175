//! Surface unfolding: face adjacency, planar layout, distance collection.
//!
//! Purpose
//! - Build the symmetric V×V hinge matrix once per polyhedron (`build_adjacency`).
//! - For one source vertex, flatten the surface face by face into the plane and
//!   record every visible planar distance per destination vertex (`unfold_from`).
//! - Merge near-equal distances into frozen per-source sets (`Mapper`).
//!
//! Design notes
//! - The adjacency matrix is read-only after construction and shared by all runs;
//!   each run owns its own `Collector` and returns a `Mapper`.
//! - Recursion is an explicit worklist bounded by `UnfoldCfg::budget`.
//! - Geometry degeneracies abort a single path, topology violations the whole run.
//!
//! Split
//! - `types.rs` (planar primitives, folds, adjacency), `build.rs` (adjacency),
//!   `engine.rs` (layout + worklist), `collect.rs` (accumulator + dedup).

mod build;
mod collect;
mod engine;
mod types;

pub use build::build_adjacency;
pub use collect::{dedup_sorted, dedup_unsorted, Collector, Mapper};
pub use engine::{lay_source_face, map_all, unfold_face, unfold_from};
pub use types::{cross2, origin_segment_dist, Adjacency, EdgeFold, Line2, Point2, Window};
