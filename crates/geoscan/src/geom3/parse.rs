//! Text format reader.
//!
//! Layout (whitespace separated):
//! `V` then `V` triples `x y z`, then `F`, then per face 1-based vertex indices
//! terminated by `0`. Anything after the last face is ignored.

use std::str::{FromStr, SplitWhitespace};

use super::types::{Polyhedron, Vec3};
use crate::error::InputError;

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next<T: FromStr>(&mut self, what: &'static str) -> Result<T, InputError> {
        let tok = self
            .inner
            .next()
            .ok_or(InputError::UnexpectedEof { what })?;
        tok.parse().map_err(|_| InputError::BadToken {
            token: tok.to_string(),
            what,
        })
    }
}

/// Parse a polyhedron from its textual description.
pub fn parse_polyhedron(text: &str) -> Result<Polyhedron, InputError> {
    let mut toks = Tokens {
        inner: text.split_whitespace(),
    };
    let vcount: usize = toks.next("vertex count")?;
    let mut vertices = Vec::with_capacity(vcount);
    for _ in 0..vcount {
        let x: f64 = toks.next("x coordinate")?;
        let y: f64 = toks.next("y coordinate")?;
        let z: f64 = toks.next("z coordinate")?;
        vertices.push(Vec3::new(x, y, z));
    }
    let fcount: usize = toks.next("face count")?;
    let mut faces = Vec::with_capacity(fcount);
    for fi in 0..fcount {
        let mut ids = Vec::new();
        loop {
            let raw: usize = toks.next("vertex index")?;
            if raw == 0 {
                break;
            }
            if raw > vcount {
                return Err(InputError::VertexOutOfRange {
                    face: fi,
                    vertex: raw - 1,
                    count: vcount,
                });
            }
            ids.push(raw - 1);
        }
        faces.push(ids);
    }
    Polyhedron::new(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom3::VertexId;

    const TETRA: &str = "4\n\
        0 0 0\n 1 0 0\n 0 1 0\n 0 0 1\n\
        4\n\
        1 3 2 0\n 1 2 4 0\n 1 4 3 0\n 2 3 4 0\n";

    #[test]
    fn parses_tetrahedron() {
        let p = parse_polyhedron(TETRA).unwrap();
        assert_eq!(p.vertex_count(), 4);
        assert_eq!(p.face_count(), 4);
        let f = &p.faces()[3];
        assert_eq!(f.vertices, vec![VertexId(1), VertexId(2), VertexId(3)]);
        // |(1,0,0) - (0,1,0)| = sqrt(2), position-indexed
        assert!((f.distances[(0, 1)] - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(f.distances[(2, 2)], 0.0);
    }

    #[test]
    fn reports_truncated_input() {
        let err = parse_polyhedron("2\n0 0 0\n1 1").unwrap_err();
        assert_eq!(err, InputError::UnexpectedEof { what: "z coordinate" });
        let err = parse_polyhedron("1 0 0 0 1 1 1").unwrap_err();
        assert_eq!(err, InputError::UnexpectedEof { what: "vertex index" });
    }

    #[test]
    fn reports_bad_tokens_and_indices() {
        let err = parse_polyhedron("x").unwrap_err();
        assert!(matches!(err, InputError::BadToken { what: "vertex count", .. }));
        let err = parse_polyhedron("3 0 0 0 1 0 0 0 1 0 1 1 2 7 0").unwrap_err();
        assert_eq!(
            err,
            InputError::VertexOutOfRange {
                face: 0,
                vertex: 6,
                count: 3
            }
        );
        let err = parse_polyhedron("3 0 0 0 1 0 0 0 1 0 1 1 2 0").unwrap_err();
        assert_eq!(err, InputError::FaceTooSmall { face: 0, len: 2 });
    }
}
