use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{closest_param_on_segment, segment_to_segment_dist};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::{unit, Point2, Vector2, TOLERANCE};

/// Result of a closest point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// The closest point on the curve.
    pub point: Point2,
    /// Index of the segment holding the closest point.
    pub segment: usize,
    /// Parameter of the closest point on that segment, in `[0, 1]`.
    pub parameter: f64,
    /// The distance from the query point to the closest point.
    pub distance: f64,
}

/// Planar piecewise-linear curve.
///
/// Implementors only expose their segments; distance, tangent and
/// intersection queries are derived from them.
pub trait Curve {
    /// Returns the number of straight segments.
    fn segment_count(&self) -> usize;

    /// Returns the endpoints of segment `index`.
    ///
    /// Callers must keep `index < segment_count()`.
    fn segment(&self, index: usize) -> (Point2, Point2);

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Finds the closest point on the curve, or `None` for an empty curve.
    fn closest_point(&self, p: &Point2) -> Option<ClosestPoint> {
        let mut best: Option<ClosestPoint> = None;
        for i in 0..self.segment_count() {
            let (a, b) = self.segment(i);
            let t = closest_param_on_segment(p, &a, &b);
            let point = a + (b - a) * t;
            let distance = (p - point).norm();
            if best.is_none_or(|c| distance < c.distance) {
                best = Some(ClosestPoint {
                    point,
                    segment: i,
                    parameter: t,
                    distance,
                });
            }
        }
        best
    }

    /// Distance from `p` to the curve; infinite for an empty curve.
    fn distance_to(&self, p: &Point2) -> f64 {
        self.closest_point(p).map_or(f64::INFINITY, |c| c.distance)
    }

    /// Unit tangent at the point of the curve closest to `p`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for an empty curve and
    /// `GeometryError::ZeroVector` when the nearest segment has zero length.
    fn tangent_at(&self, p: &Point2) -> Result<Vector2> {
        let closest = self
            .closest_point(p)
            .ok_or_else(|| GeometryError::Degenerate("curve has no segments".to_owned()))?;
        let (a, b) = self.segment(closest.segment);
        unit(&(b - a))
    }

    /// Minimum distance between the curve and the segment `a → b`.
    fn distance_to_segment(&self, a: &Point2, b: &Point2) -> f64 {
        (0..self.segment_count())
            .map(|i| {
                let (c, d) = self.segment(i);
                segment_to_segment_dist(a, b, &c, &d)
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Minimum distance between two curves.
    fn distance_to_curve(&self, other: &dyn Curve) -> f64 {
        (0..other.segment_count())
            .map(|i| {
                let (a, b) = other.segment(i);
                self.distance_to_segment(&a, &b)
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Counts the crossings of segment `a → b` with the curve.
    ///
    /// A crossing through a shared vertex is counted once.
    fn intersection_count_with_segment(&self, a: &Point2, b: &Point2) -> usize {
        let n = self.segment_count();
        let mut count = 0;
        for i in 0..n {
            let (c, d) = self.segment(i);
            if let Some((_, _, u)) = segment_segment_intersect_2d(a, b, &c, &d) {
                let has_predecessor = i > 0 || self.is_closed();
                if u <= TOLERANCE && has_predecessor {
                    continue;
                }
                count += 1;
            }
        }
        count
    }

    /// Counts the crossings of two curves.
    fn intersection_count(&self, other: &dyn Curve) -> usize {
        (0..other.segment_count())
            .map(|i| {
                let (a, b) = other.segment(i);
                self.intersection_count_with_segment(&a, &b)
            })
            .sum()
    }
}
