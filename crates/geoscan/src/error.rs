//! Error taxonomy shared by parsing, adjacency construction, unfolding and simulation.
//!
//! All failures are deterministic functions of the input geometry; nothing is retried.

use thiserror::Error;

/// Top-level error for the crate.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The simulator processed `limit` events without reaching the idle state.
    #[error("event budget of {limit} exhausted before the event set drained")]
    EventBudget { limit: u64 },
}

/// Malformed input: counts, indices, parameters. Reported before any computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("unexpected end of input while reading {what}")]
    UnexpectedEof { what: &'static str },

    #[error("token {token:?} is not a valid {what}")]
    BadToken { token: String, what: &'static str },

    #[error("polyhedron needs at least one vertex and one face")]
    Empty,

    #[error("face {face} has {len} vertices; at least 3 required")]
    FaceTooSmall { face: usize, len: usize },

    #[error("face {face} references vertex {vertex}, but only {count} vertices exist")]
    VertexOutOfRange {
        face: usize,
        vertex: usize,
        count: usize,
    },

    #[error("face {face} repeats vertex {vertex}")]
    RepeatedVertex { face: usize, vertex: usize },

    #[error("vertex {vertex} is out of range ({count} vertices)")]
    UnknownVertex { vertex: usize, count: usize },

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl InputError {
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Surface is not a closed 2-manifold as far as the hinge structure can tell.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("hinge ({a}, {b}) is shared by more than two faces (faces {faces:?})")]
    NonManifoldHinge { a: usize, b: usize, faces: Vec<usize> },

    #[error("edge ({a}, {b}) of face {face} has no neighbouring face; surface is not closed")]
    OpenEdge { a: usize, b: usize, face: usize },

    #[error("hinge vertex {vertex} is not on face {face}")]
    AnchorNotOnFace { vertex: usize, face: usize },

    #[error("vertex {vertex} does not belong to any face")]
    IsolatedVertex { vertex: usize },
}

/// Numerical failure while laying a face into the plane.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("triangulating vertex {vertex} on face {face}: negative radicand {radicand:e}")]
    NegativeRadicand {
        face: usize,
        vertex: usize,
        radicand: f64,
    },

    #[error("corner of face {face} at source vertex {vertex} is flat")]
    DegenerateCorner { face: usize, vertex: usize },

    #[error("hinge ({a}, {b}) on face {face} has zero length")]
    ZeroLengthHinge { face: usize, a: usize, b: usize },
}

/// Convenience alias for results using [`ScanError`].
pub type Result<T> = std::result::Result<T, ScanError>;
