use crate::error::{OperationError, Result};
use crate::geometry::Polyline;
use crate::math::intersect_2d::{line_line_intersect_2d, point_at, segment_segment_intersect_2d};
use crate::math::{left_normal, same_point, Point2, Vector2, TOLERANCE};

/// When `cos(angle between consecutive segments) < this`, use a flat cap
/// instead of a miter join. Only for near-180° reversals (> ~169°).
const FLAT_CAP_COS: f64 = -0.98;

/// Maximum miter distance as a multiple of `|distance|`. When the miter
/// extends further than this, a bevel (two points) is used instead.
const MITER_LIMIT: f64 = 4.0;

/// Side of a directed guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetSide {
    /// Left of the walking direction.
    Left,
    /// Right of the walking direction.
    Right,
}

impl OffsetSide {
    /// Sign applied to an unsigned offset distance.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            OffsetSide::Left => 1.0,
            OffsetSide::Right => -1.0,
        }
    }
}

/// Offsets an open polyline to one side by a given distance.
///
/// # Algorithm
///
/// 1. Offset each segment perpendicular to its direction.
/// 2. Join consecutive offset segments at the intersection of their lines.
///    Near-antiparallel segments get a flat cap, over-long miters a bevel.
/// 3. Cut out the loops that inner corners leave behind.
///
/// # Sign Convention
///
/// - Positive distance: left offset (relative to walking direction)
/// - Negative distance: right offset
#[derive(Debug)]
pub struct PolylineOffset2D {
    points: Vec<Point2>,
    distance: f64,
}

impl PolylineOffset2D {
    /// Creates a new polyline offset operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, distance: f64) -> Self {
        Self { points, distance }
    }

    /// Creates an offset of `line` by `distance` toward `side`.
    #[must_use]
    pub fn toward(line: &Polyline, side: OffsetSide, distance: f64) -> Self {
        Self::new(line.points.clone(), side.sign() * distance)
    }

    /// Executes the offset operation.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if fewer than 2 points are provided or
    ///   a segment has zero length
    /// - `OperationError::Failed` if the offset collapses to fewer than 2 points
    pub fn execute(&self) -> Result<Polyline> {
        if self.points.len() < 2 {
            return Err(OperationError::InvalidInput(
                "at least 2 points are required for polyline offset".to_owned(),
            )
            .into());
        }

        if self.distance.abs() < TOLERANCE {
            return Ok(Polyline::open(self.points.clone()));
        }

        let raw = build_one_side_offset(&self.points, self.distance)?;
        let trimmed = trim_open_loops(raw);
        if trimmed.len() < 2 {
            return Err(
                OperationError::Failed("offset collapsed to fewer than 2 points".to_owned()).into(),
            );
        }
        Ok(Polyline::open(trimmed))
    }
}

/// Offsets every segment, then joins neighbours at their corners.
fn build_one_side_offset(points: &[Point2], distance: f64) -> Result<Vec<Point2>> {
    let n = points.len();
    let segment_count = n - 1;

    let mut offset_segments: Vec<(Point2, Point2)> = Vec::with_capacity(segment_count);
    let mut directions: Vec<Vector2> = Vec::with_capacity(segment_count);

    for i in 0..segment_count {
        let dir = segment_direction(&points[i], &points[i + 1])?;
        let offset = left_normal(&dir) * distance;
        offset_segments.push((points[i] + offset, points[i + 1] + offset));
        directions.push(dir);
    }

    let mut raw = Vec::with_capacity(n * 2);
    raw.push(offset_segments[0].0);
    for i in 1..n - 1 {
        push_corner(
            &mut raw,
            &offset_segments[i - 1],
            &offset_segments[i],
            &directions[i - 1],
            &directions[i],
            &points[i],
            distance,
        );
    }
    raw.push(offset_segments[segment_count - 1].1);

    Ok(raw)
}

/// Pushes corner point(s) into `raw`.
///
/// - Near-antiparallel segments: flat cap (two points).
/// - Miter exceeding `MITER_LIMIT`: bevel (two points).
/// - Normal corners: single miter intersection point.
fn push_corner(
    raw: &mut Vec<Point2>,
    seg_prev: &(Point2, Point2),
    seg_next: &(Point2, Point2),
    dir_prev: &Vector2,
    dir_next: &Vector2,
    original_corner: &Point2,
    distance: f64,
) {
    if dir_prev.dot(dir_next) < FLAT_CAP_COS {
        raw.push(seg_prev.1);
        raw.push(seg_next.0);
        return;
    }

    let corner = intersect_offset_lines(seg_prev, seg_next, original_corner, distance);
    let limit = MITER_LIMIT * distance.abs();
    if (corner - original_corner).norm_squared() > limit * limit {
        raw.push(seg_prev.1);
        raw.push(seg_next.0);
    } else {
        raw.push(corner);
    }
}

/// Computes the normalized direction from point `a` to point `b`.
fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(OperationError::InvalidInput(format!(
            "zero-length segment between ({}, {}) and ({}, {})",
            a.x, a.y, b.x, b.y
        ))
        .into());
    }
    Ok(d / len)
}

/// Intersects two offset lines and returns the corner point.
///
/// Falls back to shifting the original corner if the lines are parallel.
fn intersect_offset_lines(
    seg_prev: &(Point2, Point2),
    seg_next: &(Point2, Point2),
    original_corner: &Point2,
    distance: f64,
) -> Point2 {
    let d_prev = seg_prev.1 - seg_prev.0;
    let d_next = seg_next.1 - seg_next.0;

    if let Some((t, _u)) = line_line_intersect_2d(&seg_prev.1, &d_prev, &seg_next.0, &d_next) {
        point_at(&seg_prev.1, &d_prev, t)
    } else {
        let normal = left_normal(&d_prev.try_normalize(TOLERANCE).unwrap_or(Vector2::x()));
        original_corner + normal * distance
    }
}

/// Finds the first crossing between non-adjacent segments of an open path.
///
/// Endpoint-to-endpoint touches are skipped. Returns `(i, j, point)` with `i < j`.
fn find_first_self_intersection(points: &[Point2]) -> Option<(usize, usize, Point2)> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    let eps = TOLERANCE * 100.0;
    for i in 0..n - 1 {
        for j in (i + 2)..n - 1 {
            if let Some((pt, t, u)) =
                segment_segment_intersect_2d(&points[i], &points[i + 1], &points[j], &points[j + 1])
            {
                let t_at_end = t < eps || t > 1.0 - eps;
                let u_at_end = u < eps || u > 1.0 - eps;
                if t_at_end && u_at_end {
                    continue;
                }
                return Some((i, j, pt));
            }
        }
    }
    None
}

/// Repeatedly cuts the loop between two crossing segments out of the path.
///
/// Each cut strictly reduces the vertex count, so the loop terminates.
fn trim_open_loops(mut points: Vec<Point2>) -> Vec<Point2> {
    while let Some((i, j, pt)) = find_first_self_intersection(&points) {
        let mut cut = Vec::with_capacity(points.len() - (j - i) + 1);
        cut.extend_from_slice(&points[..=i]);
        cut.push(pt);
        cut.extend_from_slice(&points[j + 1..]);
        cut.dedup_by(|b, a| same_point(a, b, TOLERANCE));
        points = cut;
    }
    points
}
