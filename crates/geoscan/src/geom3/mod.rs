//! 3D polyhedron model: vertices, planar faces with distance tables, parsing.
//!
//! Purpose
//! - Hold the immutable input geometry consumed by the unfolding engine.
//! - Replace stream-driven construction with an explicit `parse_polyhedron`.
//!
//! Conventions
//! - Vertex ids are 0-based everywhere inside the crate; the text format is 1-based.
//! - A face's distance table is indexed by position within the face, not by global id.
//! - Face equality/adjacency are named functions (`faces_equal`, `shared_edge`)
//!   returning explicit results.

mod parse;
pub mod special;
mod types;

pub use parse::parse_polyhedron;
pub use types::{dist3, faces_equal, shared_edge, Face, FaceId, Polyhedron, Vec3, VertexId};
