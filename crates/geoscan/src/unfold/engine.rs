//! Worklist unfolding: lay faces into the plane hinge by hinge and collect distances.
//!
//! Each frame carries a `Window`, the sector of directions the source looks through
//! when it sees the frame's face. With `Visibility::Hinge` that is the wedge of the
//! hinge just crossed (the rays through its endpoints), and a hinge is crossed only
//! when one of its endpoints is visible. With `Visibility::Cumulative` the wedge is
//! intersected with the frame's window, so every recorded distance is a straight
//! line that stays on the surface and never undercuts the geodesic.

use nalgebra::Vector2;

use crate::cfg::{UnfoldCfg, Visibility};
use crate::error::{GeometryError, InputError, ScanError, TopologyError};
use crate::geom3::{FaceId, Polyhedron, VertexId};

use super::collect::{Collector, Mapper};
use super::types::{origin_segment_dist, Adjacency, Line2, Point2, Window};

/// Lay `face` into the plane across the hinge `(a, b)` whose endpoints are already placed.
///
/// Each remaining vertex is triangulated from its face distances to `a` and `b`
/// (law of cosines projected on `ab`), taking the half-plane solution on the opposite
/// side of `ab` from `reference`.
///
/// With `window = Some(w)` a new vertex is visible iff it lies strictly inside `w` and
/// on the far side of `ab` from the origin. With `None` the face is incident to the
/// source and every vertex is visible.
pub fn unfold_face(
    poly: &Polyhedron,
    face_id: FaceId,
    reference: Vector2<f64>,
    a: &Point2,
    b: &Point2,
    window: Option<&Window>,
    cfg: &UnfoldCfg,
) -> Result<Vec<Point2>, ScanError> {
    let face = poly.face(face_id);
    let not_on_face = |v: VertexId| TopologyError::AnchorNotOnFace {
        vertex: v.0,
        face: face_id.0,
    };
    let apos = face.position(a.vertex).ok_or_else(|| not_on_face(a.vertex))?;
    let bpos = face.position(b.vertex).ok_or_else(|| not_on_face(b.vertex))?;
    let d = face.distances[(apos, bpos)];
    let zero_hinge = || GeometryError::ZeroLengthHinge {
        face: face_id.0,
        a: a.vertex.0,
        b: b.vertex.0,
    };
    if d <= 0.0 {
        return Err(zero_hinge().into());
    }
    let ab = Line2::through(a.pos, b.pos).ok_or_else(zero_hinge)?;
    let u = (b.pos - a.pos) / d;
    let perp = Vector2::new(u.y, -u.x);
    let ref_side = ab.signed_dist(reference);
    let origin_side = ab.signed_dist(Vector2::zeros());

    let mut placed = Vec::with_capacity(face.len());
    for (k, &vid) in face.vertices.iter().enumerate() {
        if vid == a.vertex {
            placed.push(*a);
            continue;
        }
        if vid == b.vertex {
            placed.push(*b);
            continue;
        }
        let da = face.distances[(apos, k)];
        let db = face.distances[(bpos, k)];
        let q = (da * da - db * db + d * d) / (2.0 * d);
        let radicand = da * da - q * q;
        if radicand < -cfg.sqrt_slack {
            return Err(GeometryError::NegativeRadicand {
                face: face_id.0,
                vertex: vid.0,
                radicand,
            }
            .into());
        }
        let h = radicand.max(0.0).sqrt();
        let foot = a.pos + u * q;
        let mut pos = foot + perp * h;
        if ref_side * ab.signed_dist(pos) > 0.0 {
            pos = foot - perp * h;
        }
        let visible = match window {
            None => true,
            Some(w) => w.contains(pos) && origin_side * ab.signed_dist(pos) < 0.0,
        };
        placed.push(Point2::new(vid, pos, visible));
    }
    Ok(placed)
}

/// Lay the first face containing `source` with the source at the origin and its
/// successor on the face cycle along +x (remaining vertices at y > 0).
pub fn lay_source_face(
    poly: &Polyhedron,
    source: VertexId,
    cfg: &UnfoldCfg,
) -> Result<(FaceId, Vec<Point2>), ScanError> {
    let face_id = poly
        .first_face_with(source)
        .ok_or(TopologyError::IsolatedVertex { vertex: source.0 })?;
    let face = poly.face(face_id);
    let s = face.position(source).ok_or(TopologyError::AnchorNotOnFace {
        vertex: source.0,
        face: face_id.0,
    })?;
    let t = (s + 1) % face.len();
    let o = Point2::new(source, Vector2::zeros(), true);
    let a = Point2::new(
        face.vertices[t],
        Vector2::new(face.distances[(s, t)], 0.0),
        true,
    );
    let placed = unfold_face(poly, face_id, Vector2::new(0.0, -1.0), &o, &a, None, cfg)?;
    Ok((face_id, placed))
}

/// Window for the face across hinge `(a, b)` of a frame seen through `window`, or
/// `None` when the hinge is not crossed. Hinges through the origin are never crossed.
pub(super) fn crossing_window(
    mode: Visibility,
    window: &Window,
    a: &Point2,
    b: &Point2,
) -> Option<Window> {
    let wedge = Window::spanned(a.pos, b.pos)?;
    match mode {
        Visibility::Hinge => (a.visible || b.visible).then_some(wedge),
        Visibility::Cumulative => window.intersect(&wedge),
    }
}

/// One face layout on the worklist.
struct Frame {
    face: FaceId,
    points: Vec<Point2>,
    window: Window,
    entered_by: Option<(VertexId, VertexId)>,
    /// Layouts still allowed on this path, counting this one.
    budget: usize,
}

/// Neighbours of `source` on a laid face: (predecessor, successor) on the cycle.
fn corner(points: &[Point2], source: VertexId) -> Option<(Point2, Point2)> {
    let n = points.len();
    let s = points.iter().position(|p| p.vertex == source)?;
    Some((points[(s + n - 1) % n], points[(s + 1) % n]))
}

/// Lay every face around `source` by rotating about the origin across the hinges
/// incident to it, until the walk returns to the first face.
///
/// Each face gets its own corner at the origin as window. Geometry failures stop the
/// walk and are recorded; the faces laid so far are kept.
fn lay_star(
    poly: &Polyhedron,
    adj: &Adjacency,
    source: VertexId,
    budget: usize,
    out: &mut Collector,
    cfg: &UnfoldCfg,
) -> Result<Vec<Frame>, ScanError> {
    let (first, mut points) = lay_source_face(poly, source, cfg)?;
    let o = Point2::new(source, Vector2::zeros(), true);
    let missing = TopologyError::AnchorNotOnFace {
        vertex: source.0,
        face: first.0,
    };
    // walk away from the successor that was put on +x
    let mut came_from = corner(&points, source).ok_or(missing)?.1.vertex;
    let mut face = first;
    let mut frames = Vec::new();
    loop {
        let (prev, next) = corner(&points, source).ok_or(TopologyError::AnchorNotOnFace {
            vertex: source.0,
            face: face.0,
        })?;
        let Some(window) = Window::spanned(prev.pos, next.pos) else {
            let err = GeometryError::DegenerateCorner {
                face: face.0,
                vertex: source.0,
            };
            tracing::warn!(source = source.0, %err, "star walk stopped");
            out.record_degeneracy(err);
            break;
        };
        let (onward, behind) = if next.vertex == came_from {
            (prev, next)
        } else {
            (next, prev)
        };
        record(out, &points, &[source]);
        frames.push(Frame {
            face,
            points: points.clone(),
            window,
            entered_by: None,
            budget,
        });
        if frames.len() >= poly.face_count() {
            break;
        }
        let Some(fold) = adj.get(source, onward.vertex) else {
            break;
        };
        let nf = fold.fold(face);
        if nf == first {
            break;
        }
        match unfold_face(poly, nf, behind.pos, &o, &onward, None, cfg) {
            Ok(p) => points = p,
            Err(ScanError::Geometry(err)) => {
                tracing::warn!(source = source.0, %err, "star walk stopped");
                out.record_degeneracy(err);
                break;
            }
            Err(other) => return Err(other),
        }
        came_from = onward.vertex;
        face = nf;
    }
    Ok(frames)
}

/// Unfold the surface around `source` and collect every visible planar distance.
///
/// The worklist carries `(face, placed points, window, entry hinge, remaining budget)`
/// so the depth limit is independent of the native call stack. The faces around the
/// source all start with the full budget; each hinge crossing consumes one unit.
/// A budget of 0 yields empty sets, 1 records only the faces around the source.
/// Geometry degeneracies abort their path and are recorded on the returned mapper;
/// topology violations abort the run.
pub fn unfold_from(
    poly: &Polyhedron,
    adj: &Adjacency,
    source: VertexId,
    cfg: &UnfoldCfg,
) -> Result<Mapper, ScanError> {
    cfg.validate()?;
    if source.0 >= poly.vertex_count() {
        return Err(InputError::UnknownVertex {
            vertex: source.0,
            count: poly.vertex_count(),
        }
        .into());
    }
    let mut out = Collector::new(source, poly.vertex_count());
    if cfg.budget == 0 {
        return Ok(out.finish(cfg.dedup_eps));
    }
    let mut stack = lay_star(poly, adj, source, cfg.budget, &mut out, cfg)?;
    let mut layouts = stack.len();
    while let Some(frame) = stack.pop() {
        if frame.budget <= 1 {
            continue;
        }
        let n = frame.points.len();
        for i in 0..n {
            let reference = frame.points[i];
            let a = frame.points[(i + 1) % n];
            let b = frame.points[(i + 2) % n];
            if let Some((x, y)) = frame.entered_by {
                if (x == a.vertex && y == b.vertex) || (x == b.vertex && y == a.vertex) {
                    continue;
                }
            }
            // hinges through the origin are handled by the star walk
            let Some(window) = crossing_window(cfg.visibility, &frame.window, &a, &b) else {
                continue;
            };
            let Some(fold) = adj.get(a.vertex, b.vertex) else {
                continue;
            };
            if let Some(max) = cfg.max_distance {
                if origin_segment_dist(a.pos, b.pos) > max {
                    continue;
                }
            }
            let next = fold.fold(frame.face);
            match unfold_face(poly, next, reference.pos, &a, &b, Some(&window), cfg) {
                Ok(points) => {
                    layouts += 1;
                    record(&mut out, &points, &[a.vertex, b.vertex]);
                    stack.push(Frame {
                        face: next,
                        points,
                        window,
                        entered_by: Some((a.vertex, b.vertex)),
                        budget: frame.budget - 1,
                    });
                }
                Err(ScanError::Geometry(err)) => {
                    tracing::warn!(source = source.0, %err, "unfolding path aborted");
                    out.record_degeneracy(err);
                }
                Err(other) => return Err(other),
            }
        }
    }
    tracing::debug!(
        source = source.0,
        layouts,
        recorded = out.total(),
        "unfolding complete"
    );
    Ok(out.finish(cfg.dedup_eps))
}

fn record(out: &mut Collector, points: &[Point2], anchors: &[VertexId]) {
    for p in points {
        if p.visible && !anchors.contains(&p.vertex) {
            out.insert(p.vertex, p.dist);
        }
    }
}

/// Run one unfolding per source vertex, in vertex order.
pub fn map_all(
    poly: &Polyhedron,
    adj: &Adjacency,
    cfg: &UnfoldCfg,
) -> Result<Vec<Mapper>, ScanError> {
    (0..poly.vertex_count())
        .map(|v| unfold_from(poly, adj, VertexId(v), cfg))
        .collect()
}
