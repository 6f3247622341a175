//! Core 3D types: vertex/face identifiers, faces with distance tables, polyhedra.

use nalgebra::{DMatrix, Vector3};

use crate::error::InputError;

/// 3D point (immutable by convention; all APIs take it by value or shared ref).
pub type Vec3 = Vector3<f64>;

/// Global vertex index into `Polyhedron::vertices`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Index into `Polyhedron::faces`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// Euclidean distance in R^3.
#[inline]
pub fn dist3(a: &Vec3, b: &Vec3) -> f64 {
    (a - b).norm()
}

/// Planar face: vertex cycle plus pairwise distances between its own vertices.
///
/// Invariants:
/// - `distances` is `n × n`, symmetric, zero diagonal, indexed by position in `vertices`.
#[derive(Clone, Debug)]
pub struct Face {
    pub vertices: Vec<VertexId>,
    pub distances: DMatrix<f64>,
}

impl Face {
    /// Build the distance table from global coordinates. Ids must index into `coords`.
    pub fn new(vertices: Vec<VertexId>, coords: &[Vec3]) -> Self {
        let n = vertices.len();
        let distances =
            DMatrix::from_fn(n, n, |i, j| dist3(&coords[vertices[i].0], &coords[vertices[j].0]));
        Self {
            vertices,
            distances,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Position of `v` inside the cycle.
    #[inline]
    pub fn position(&self, v: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&w| w == v)
    }

    /// Boundary edges as consecutive pairs, closing the cycle.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

/// Two faces are equal iff their id sequences are identical in order.
#[inline]
pub fn faces_equal(a: &Face, b: &Face) -> bool {
    a.vertices == b.vertices
}

/// First two vertex ids (in `a`'s order) that `a` and `b` have in common.
///
/// Returns `None` for equal faces or when fewer than two ids are shared. Faces sharing
/// more than two ids report only the first two, which is not a general adjacency test.
pub fn shared_edge(a: &Face, b: &Face) -> Option<(VertexId, VertexId)> {
    if faces_equal(a, b) {
        return None;
    }
    let mut first = None;
    for &v in &a.vertices {
        if !b.contains(v) {
            continue;
        }
        match first {
            None => first = Some(v),
            Some(f) => return Some((f, v)),
        }
    }
    None
}

/// Convex polyhedron as vertices plus face cycles.
///
/// Invariants (checked by `new`):
/// - at least one vertex and one face;
/// - each face has >= 3 distinct, in-range vertex ids;
/// - coordinates are finite.
///
/// Closedness/manifoldness is checked later by `unfold::build_adjacency`.
#[derive(Clone, Debug)]
pub struct Polyhedron {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Polyhedron {
    /// Validate indices and precompute per-face distance tables.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Vec<usize>>) -> Result<Self, InputError> {
        if vertices.is_empty() || faces.is_empty() {
            return Err(InputError::Empty);
        }
        if let Some(p) = vertices.iter().find(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(InputError::invalid_param(
                "vertex",
                format!("({}, {}, {})", p.x, p.y, p.z),
                "coordinates must be finite",
            ));
        }
        let count = vertices.len();
        let mut built = Vec::with_capacity(faces.len());
        for (fi, ids) in faces.into_iter().enumerate() {
            if ids.len() < 3 {
                return Err(InputError::FaceTooSmall {
                    face: fi,
                    len: ids.len(),
                });
            }
            for (k, &v) in ids.iter().enumerate() {
                if v >= count {
                    return Err(InputError::VertexOutOfRange {
                        face: fi,
                        vertex: v,
                        count,
                    });
                }
                if ids[..k].contains(&v) {
                    return Err(InputError::RepeatedVertex {
                        face: fi,
                        vertex: v,
                    });
                }
            }
            let ids = ids.into_iter().map(VertexId).collect();
            built.push(Face::new(ids, &vertices));
        }
        Ok(Self {
            vertices,
            faces: built,
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    #[cfg(test)]
    pub(crate) fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.0]
    }

    /// First face (in input order) whose cycle contains `v`.
    pub fn first_face_with(&self, v: VertexId) -> Option<FaceId> {
        self.faces.iter().position(|f| f.contains(v)).map(FaceId)
    }
}
