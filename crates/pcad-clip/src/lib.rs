#![warn(missing_docs)]

//! Board-boundary hole clipping.
//!
//! After layout, a drilled hole may cross the board outline. Such a hole
//! cannot be manufactured as a drill hit; this stage converts it into a
//! cutout whose polygon approximates the intersection of the hole circle
//! with the board rectangle. Holes fully inside the board are left alone,
//! as are holes fully outside it (see [`OUTSIDE_HOLE_POLICY`]).
//!
//! The clip is an approximation, not an exact Boolean: the polygon is
//! built from perimeter samples that fall inside the rectangle plus the
//! circle's intersection points with the rectangle edges, sorted by polar
//! angle around the original circle center. This is exact in the limit
//! for a circle crossing a single edge and degrades gracefully for
//! corner-crossing circles, which may get the corner shaved between two
//! intersection points.

use log::warn;
use std::f64::consts::PI;

use pcad_db::{BoardId, CircuitDb, CutoutShape, Hole, HoleShape};
use pcad_math::{Point2, Point2D, Rect, Tolerance};

/// Number of perimeter samples used to approximate a hole circle.
pub const CIRCLE_SEGMENTS: usize = 32;

/// Policy for holes whose circle does not touch the board rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutsideHolePolicy {
    /// Leave the hole record unmodified.
    Keep,
    /// Delete the hole record.
    Delete,
}

/// The active outside-hole policy.
///
/// A hole fully outside the board outline is kept as-is rather than
/// deleted; deciding what to do about off-board drills is left to later
/// review stages, and silently discarding them would hide layout bugs.
pub const OUTSIDE_HOLE_POLICY: OutsideHolePolicy = OutsideHolePolicy::Keep;

/// Position of a hole circle relative to the board rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleClass {
    /// Strictly contained on all four sides.
    Inside,
    /// Separated from the rectangle on some axis.
    Outside,
    /// Neither inside nor outside: the circle meets the boundary.
    Crossing,
}

/// Counts of what a clipping pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipOutcome {
    /// Holes converted into cutouts.
    pub clipped: usize,
    /// Holes deleted without replacement geometry (degenerate clips).
    pub dropped: usize,
}

/// Classify a circle against the board rectangle.
pub fn classify_circle(center: &Point2, radius: f64, bounds: &Rect) -> HoleClass {
    if bounds.is_circle_separated(center, radius) {
        HoleClass::Outside
    } else if bounds.strictly_contains_circle(center, radius) {
        HoleClass::Inside
    } else {
        HoleClass::Crossing
    }
}

/// Clip every circular hole that crosses the board outline, replacing it
/// with a polygon cutout that inherits the hole's group and subcircuit.
///
/// Outside holes are handled per [`OUTSIDE_HOLE_POLICY`]; use
/// [`clip_holes_to_board_with_policy`] to override it.
///
/// A missing board id is a silent no-op: boundary reconciliation simply
/// does not apply without a board. Non-circular hole shapes are skipped.
/// Each crossing hole is replaced in one delete + insert step; a clip
/// that yields fewer than three polygon points still deletes the hole
/// and logs the data loss.
pub fn clip_holes_to_board(db: &mut CircuitDb, board_id: BoardId) -> ClipOutcome {
    clip_holes_to_board_with_policy(db, board_id, OUTSIDE_HOLE_POLICY)
}

/// [`clip_holes_to_board`] with an explicit outside-hole policy.
pub fn clip_holes_to_board_with_policy(
    db: &mut CircuitDb,
    board_id: BoardId,
    outside_policy: OutsideHolePolicy,
) -> ClipOutcome {
    let mut outcome = ClipOutcome::default();
    let Some(board) = db.boards.get(board_id) else {
        return outcome;
    };
    let bounds = Rect::from_center_size(board.center.into(), board.width, board.height);
    let tol = Tolerance::DEFAULT;

    let holes: Vec<Hole> = db.holes.list().cloned().collect();
    for hole in holes {
        let HoleShape::Circle { center, diameter } = hole.shape;
        let center: Point2 = center.into();
        let radius = diameter / 2.0;

        match classify_circle(&center, radius, &bounds) {
            HoleClass::Inside => {}
            HoleClass::Outside => match outside_policy {
                OutsideHolePolicy::Keep => {}
                OutsideHolePolicy::Delete => {
                    db.holes.delete(hole.id);
                }
            },
            HoleClass::Crossing => {
                let points = clip_circle_to_rect(&center, radius, &bounds, &tol);
                db.holes.delete(hole.id);
                // Fewer than three points cannot form a polygon (e.g. a
                // circle tangent to an edge from outside, or one that
                // engulfs the whole board)
                if points.len() < 3 {
                    warn!(
                        "clipping {} produced degenerate geometry ({} points); \
                         hole deleted without replacement",
                        hole.id,
                        points.len()
                    );
                    outcome.dropped += 1;
                    continue;
                }
                let points = points.into_iter().map(Point2D::from).collect();
                db.add_cutout(
                    CutoutShape::Polygon { points },
                    hole.group,
                    hole.subcircuit,
                );
                outcome.clipped += 1;
            }
        }
    }
    outcome
}

/// Approximate the intersection of a circle with a rectangle as a polygon.
///
/// Perimeter samples inside the rectangle are merged with the circle's
/// intersection points against each rectangle edge, then sorted by polar
/// angle around the circle center (ascending, counter-clockwise) and
/// deduplicated: a sample landing exactly on an edge coincides with the
/// edge's intersection point.
pub fn clip_circle_to_rect(
    center: &Point2,
    radius: f64,
    bounds: &Rect,
    tol: &Tolerance,
) -> Vec<Point2> {
    let mut points = Vec::new();

    for i in 0..CIRCLE_SEGMENTS {
        let angle = 2.0 * PI * i as f64 / CIRCLE_SEGMENTS as f64;
        let (s, c) = angle.sin_cos();
        let p = Point2::new(center.x + radius * c, center.y + radius * s);
        if bounds.contains(&p) {
            points.push(p);
        }
    }

    for (start, end) in bounds.edges() {
        points.extend(segment_circle_intersections(&start, &end, center, radius, tol));
    }

    points.sort_by(|p, q| {
        let ap = (p.y - center.y).atan2(p.x - center.x);
        let aq = (q.y - center.y).atan2(q.x - center.x);
        ap.total_cmp(&aq)
    });
    points.dedup_by(|a, b| tol.points_equal(a, b));
    if points.len() >= 2 && tol.points_equal(&points[0], &points[points.len() - 1]) {
        points.pop();
    }

    points
}

/// Intersection points between a finite segment and a circle.
///
/// Solves the quadratic for the segment's parametric form and keeps
/// roots whose parameter lies in `[0, 1]` with endpoint tolerance.
/// A double root (tangency) yields a single point.
pub fn segment_circle_intersections(
    start: &Point2,
    end: &Point2,
    center: &Point2,
    radius: f64,
    tol: &Tolerance,
) -> Vec<Point2> {
    let d = end - start;
    let f = start - center;

    let a = d.dot(&d);
    if tol.is_zero(a) {
        // Degenerate segment
        return Vec::new();
    }
    let b = 2.0 * f.dot(&d);
    let c = f.dot(&f) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    let in_range = |t: f64| t >= -tol.parametric && t <= 1.0 + tol.parametric;
    let mut out = Vec::new();

    if in_range(t1) {
        out.push(start + t1 * d);
    }
    if in_range(t2) && (t2 - t1).abs() > tol.parametric {
        out.push(start + t2 * d);
    }
    out
}
