//! Planar points, lines, hinge folds and the face-adjacency matrix.

use std::cmp::Ordering;

use nalgebra::Vector2;

use crate::geom3::{FaceId, VertexId};

/// Vertex laid into the unfolding plane.
///
/// `dist` is the planar distance from the origin (the unfolding source).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point2 {
    pub pos: Vector2<f64>,
    pub dist: f64,
    pub vertex: VertexId,
    pub visible: bool,
}

impl Point2 {
    #[inline]
    pub fn new(vertex: VertexId, pos: Vector2<f64>, visible: bool) -> Self {
        Self {
            pos,
            dist: pos.norm(),
            vertex,
            visible,
        }
    }

    /// Order by distance; distances within `eps` tie-break on vertex id.
    pub fn cmp_eps(&self, other: &Point2, eps: f64) -> Ordering {
        if (self.dist - other.dist).abs() < eps {
            self.vertex.cmp(&other.vertex)
        } else {
            self.dist.total_cmp(&other.dist)
        }
    }
}

/// Line `n·p + c = 0` with unit normal; `signed_dist` is positive on the normal side.
#[derive(Clone, Copy, Debug)]
pub struct Line2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Line2 {
    /// Line through two distinct points; `None` if they coincide.
    pub fn through(a: Vector2<f64>, b: Vector2<f64>) -> Option<Self> {
        let n = Vector2::new(a.y - b.y, b.x - a.x);
        let norm = n.norm();
        if !(norm.is_finite() && norm > 0.0) {
            return None;
        }
        let n = n / norm;
        Some(Self { n, c: -n.dot(&a) })
    }

    #[inline]
    pub fn signed_dist(&self, p: Vector2<f64>) -> f64 {
        self.n.dot(&p) + self.c
    }
}

/// z-component of the 2D cross product.
#[inline]
pub fn cross2(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Sector of directions seen from the origin, counter-clockwise from `lo` to `hi`.
///
/// Invariant: span strictly between 0 and π.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub lo: Vector2<f64>,
    pub hi: Vector2<f64>,
}

impl Window {
    /// Sector bounded by the rays through `a` and `b`; `None` if both lie on one line
    /// through the origin (including either point being the origin).
    pub fn spanned(a: Vector2<f64>, b: Vector2<f64>) -> Option<Self> {
        let c = cross2(a, b);
        if c > 0.0 {
            Some(Self { lo: a, hi: b })
        } else if c < 0.0 {
            Some(Self { lo: b, hi: a })
        } else {
            None
        }
    }

    /// Strict interior test.
    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        cross2(self.lo, p) > 0.0 && cross2(p, self.hi) > 0.0
    }

    /// Common part of two sectors; `None` if it has no interior.
    pub fn intersect(&self, other: &Window) -> Option<Window> {
        let lo = if cross2(self.lo, other.lo) > 0.0 {
            other.lo
        } else {
            self.lo
        };
        let hi = if cross2(self.hi, other.hi) < 0.0 {
            other.hi
        } else {
            self.hi
        };
        if cross2(lo, hi) <= 0.0 {
            return None;
        }
        let mid = lo.normalize() + hi.normalize();
        (self.contains(mid) && other.contains(mid)).then_some(Window { lo, hi })
    }
}

/// Distance from the origin to segment `[a, b]`.
pub fn origin_segment_dist(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= 0.0 {
        return a.norm();
    }
    let t = (-a.dot(&ab) / len2).clamp(0.0, 1.0);
    (a + ab * t).norm()
}

/// The two faces joined at a hinge edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeFold {
    pub first: FaceId,
    pub second: FaceId,
}

impl EdgeFold {
    /// The face across the hinge from `current`.
    #[inline]
    pub fn fold(&self, current: FaceId) -> FaceId {
        if current == self.first {
            self.second
        } else {
            self.first
        }
    }

    #[inline]
    pub fn touches(&self, face: FaceId) -> bool {
        self.first == face || self.second == face
    }
}

/// V×V matrix of hinge folds, symmetric by construction.
#[derive(Clone, Debug)]
pub struct Adjacency {
    n: usize,
    folds: Vec<Option<EdgeFold>>,
}

impl Adjacency {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            n: vertex_count,
            folds: vec![None; vertex_count * vertex_count],
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Fold registered for hinge `(a, b)`, if any.
    #[inline]
    pub fn get(&self, a: VertexId, b: VertexId) -> Option<EdgeFold> {
        if a.0 >= self.n || b.0 >= self.n {
            return None;
        }
        self.folds[a.0 * self.n + b.0]
    }

    /// Register `fold` under both orders of the hinge.
    pub(crate) fn set(&mut self, a: VertexId, b: VertexId, fold: EdgeFold) {
        self.folds[a.0 * self.n + b.0] = Some(fold);
        self.folds[b.0 * self.n + a.0] = Some(fold);
    }

    /// Registered hinges as unordered pairs `a < b`.
    pub fn hinges(&self) -> impl Iterator<Item = (VertexId, VertexId, EdgeFold)> + '_ {
        let n = self.n;
        (0..n).flat_map(move |a| {
            ((a + 1)..n).filter_map(move |b| {
                self.folds[a * n + b].map(|f| (VertexId(a), VertexId(b), f))
            })
        })
    }

    pub fn hinge_count(&self) -> usize {
        self.hinges().count()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|a| (0..self.n).all(|b| self.folds[a * self.n + b] == self.folds[b * self.n + a]))
    }
}
