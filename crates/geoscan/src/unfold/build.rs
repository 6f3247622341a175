//! Face-adjacency construction.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::TopologyError;
use crate::geom3::{shared_edge, FaceId, Polyhedron, VertexId};

use super::types::{Adjacency, EdgeFold};

/// Build the V×V hinge matrix for `poly`.
///
/// Every unordered pair of faces sharing exactly two vertex ids registers a fold under
/// both orders of that hinge. Fails when a hinge is claimed by more than two faces,
/// when a face boundary edge has no partner (open surface), or when a vertex lies on
/// no face.
pub fn build_adjacency(poly: &Polyhedron) -> Result<Adjacency, TopologyError> {
    let faces = poly.faces();
    let mut adj = Adjacency::new(poly.vertex_count());
    let mut claims: BTreeMap<(usize, usize), BTreeSet<usize>> = BTreeMap::new();
    for i in 0..faces.len() {
        for j in (i + 1)..faces.len() {
            let Some((a, b)) = shared_edge(&faces[i], &faces[j]) else {
                continue;
            };
            let key = (a.0.min(b.0), a.0.max(b.0));
            let owners = claims.entry(key).or_default();
            owners.insert(i);
            owners.insert(j);
            if owners.len() > 2 {
                return Err(TopologyError::NonManifoldHinge {
                    a: key.0,
                    b: key.1,
                    faces: owners.iter().copied().collect(),
                });
            }
            adj.set(
                a,
                b,
                EdgeFold {
                    first: FaceId(i),
                    second: FaceId(j),
                },
            );
        }
    }
    for (fi, face) in faces.iter().enumerate() {
        for (a, b) in face.edges() {
            match adj.get(a, b) {
                Some(fold) if fold.touches(FaceId(fi)) => {}
                _ => {
                    return Err(TopologyError::OpenEdge {
                        a: a.0,
                        b: b.0,
                        face: fi,
                    })
                }
            }
        }
    }
    if let Some(v) = (0..poly.vertex_count()).find(|&v| poly.first_face_with(VertexId(v)).is_none()) {
        return Err(TopologyError::IsolatedVertex { vertex: v });
    }
    tracing::debug!(
        faces = faces.len(),
        hinges = claims.len(),
        "polyhedron mapped"
    );
    Ok(adj)
}
