//! Constructors for common convex polyhedra.
//!
//! All faces are listed counter-clockwise seen from outside.

use nalgebra::Vector2;

use super::types::{Polyhedron, Vec3};
use crate::error::InputError;

fn check_len(name: &'static str, v: f64) -> Result<(), InputError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(InputError::invalid_param(name, v, "must be finite and > 0"))
    }
}

/// Regular tetrahedron with the given edge length, centred at the origin.
pub fn tetrahedron(edge: f64) -> Result<Polyhedron, InputError> {
    check_len("edge", edge)?;
    let s = edge / (2.0 * 2f64.sqrt());
    let verts = vec![
        Vec3::new(s, s, s),
        Vec3::new(s, -s, -s),
        Vec3::new(-s, s, -s),
        Vec3::new(-s, -s, s),
    ];
    let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]];
    Polyhedron::new(verts, faces)
}

/// Axis-aligned box `[0,a]×[0,b]×[0,c]`; vertex `i` sits at bits `(x, y, z) = i & 1, i & 2, i & 4`.
pub fn cuboid(a: f64, b: f64, c: f64) -> Result<Polyhedron, InputError> {
    check_len("a", a)?;
    check_len("b", b)?;
    check_len("c", c)?;
    let verts = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 != 0 { a } else { 0.0 },
                if i & 2 != 0 { b } else { 0.0 },
                if i & 4 != 0 { c } else { 0.0 },
            )
        })
        .collect();
    let faces = vec![
        vec![0, 2, 3, 1],
        vec![4, 5, 7, 6],
        vec![0, 1, 5, 4],
        vec![2, 6, 7, 3],
        vec![0, 4, 6, 2],
        vec![1, 3, 7, 5],
    ];
    Polyhedron::new(verts, faces)
}

/// Cube with the given side length.
pub fn cube(side: f64) -> Result<Polyhedron, InputError> {
    cuboid(side, side, side)
}

/// Regular octahedron with vertices at distance `r` on the coordinate axes.
pub fn octahedron(r: f64) -> Result<Polyhedron, InputError> {
    check_len("r", r)?;
    let verts = vec![
        Vec3::new(r, 0.0, 0.0),
        Vec3::new(-r, 0.0, 0.0),
        Vec3::new(0.0, r, 0.0),
        Vec3::new(0.0, -r, 0.0),
        Vec3::new(0.0, 0.0, r),
        Vec3::new(0.0, 0.0, -r),
    ];
    let faces = vec![
        vec![0, 2, 4],
        vec![2, 1, 4],
        vec![1, 3, 4],
        vec![3, 0, 4],
        vec![2, 0, 5],
        vec![1, 2, 5],
        vec![3, 1, 5],
        vec![0, 3, 5],
    ];
    Polyhedron::new(verts, faces)
}

/// Right prism over a regular `sides`-gon of circumradius `radius`.
pub fn prism(sides: usize, radius: f64, height: f64) -> Result<Polyhedron, InputError> {
    if sides < 3 {
        return Err(InputError::invalid_param("sides", sides, "must be >= 3"));
    }
    check_len("radius", radius)?;
    let base: Vec<Vector2<f64>> = (0..sides)
        .map(|i| {
            let th = std::f64::consts::TAU * i as f64 / sides as f64;
            Vector2::new(radius * th.cos(), radius * th.sin())
        })
        .collect();
    prism_over(&base, height)
}

/// Right prism over a convex polygon given counter-clockwise in the xy-plane.
///
/// Bottom ring gets ids `0..n`, top ring `n..2n`.
pub fn prism_over(base: &[Vector2<f64>], height: f64) -> Result<Polyhedron, InputError> {
    check_len("height", height)?;
    let n = base.len();
    if n < 3 {
        return Err(InputError::invalid_param("base", n, "needs >= 3 points"));
    }
    let mut verts = Vec::with_capacity(2 * n);
    verts.extend(base.iter().map(|p| Vec3::new(p.x, p.y, 0.0)));
    verts.extend(base.iter().map(|p| Vec3::new(p.x, p.y, height)));
    let mut faces = Vec::with_capacity(n + 2);
    faces.push((0..n).rev().collect());
    faces.push((n..2 * n).collect());
    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(vec![i, j, n + j, n + i]);
    }
    Polyhedron::new(verts, faces)
}
