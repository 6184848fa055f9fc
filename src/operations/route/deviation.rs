use std::f64::consts::TAU;

use crate::geometry::Curve;
use crate::math::{left_normal, same_point, unit, Point2, TOLERANCE};

use super::Search;

impl Search<'_> {
    /// Walks around the clearance zone of `blocker`, starting next to `start`.
    ///
    /// The walk follows the contour at distance `clearance + Δ` in the
    /// direction of the obstacle tangent multiplied by `sense`, and ends at the
    /// first contour point from which the target is visible past the zone.
    /// Only the turning points of the walk are returned, so every leg between
    /// consecutive vertices stays clear.
    ///
    /// When the walk runs into another obstacle, the last safe point is
    /// returned instead so the caller can continue from there. `None` means
    /// the walk made no progress or circled the zone without seeing the target.
    pub(super) fn trace_contour(
        &self,
        start: Point2,
        blocker: usize,
        sense: f64,
    ) -> Option<Vec<Point2>> {
        let obstacle = self.obstacles.get(blocker)?;
        let curve = &obstacle.curve;
        let step = self.config.step;
        let radius = obstacle.clearance + step;
        let ignore = self.violated_at(&start);

        let closest = curve.closest_point(&start)?;
        let tangent = curve.tangent_at(&start).ok();
        let mut normal = match (unit(&(start - closest.point)), tangent) {
            (Ok(n), _) => n,
            (Err(_), Some(t)) => left_normal(&t),
            (Err(_), None) => return None,
        };
        let heading = tangent.unwrap_or_else(|| left_normal(&normal)) * sense;
        let orient = if left_normal(&normal).dot(&heading) < 0.0 {
            -1.0
        } else {
            1.0
        };

        let first = closest.point + normal * radius;
        if self.hits_other(&start, &first, blocker, &ignore) {
            return None;
        }
        let mut vertices = vec![first];
        let mut anchor = first;
        let mut current = first;

        let max_steps = contour_step_limit(curve.length(), radius, step);
        for _ in 0..max_steps {
            let moved = current + left_normal(&normal) * (orient * step);
            let foot = curve.closest_point(&moved)?;
            normal = unit(&(moved - foot.point)).unwrap_or(normal);
            let next = foot.point + normal * radius;

            if self.hits_other(&current, &next, blocker, &ignore) {
                if same_point(&current, &first, TOLERANCE) {
                    return None;
                }
                if vertices.last() != Some(&current) {
                    vertices.push(current);
                }
                return Some(vertices);
            }

            if !self.leg_clear(&anchor, &next, None, &ignore) {
                if vertices.last() != Some(&current) {
                    vertices.push(current);
                }
                anchor = current;
            }
            current = next;

            if self.sees_target(&current, blocker) {
                if vertices.last() != Some(&current) {
                    vertices.push(current);
                }
                return Some(vertices);
            }
        }
        None
    }

    /// Returns `true` when the leg `a → b` enters the zone of, or crosses,
    /// an obstacle other than `blocker` that `ignore` does not exempt.
    fn hits_other(&self, a: &Point2, b: &Point2, blocker: usize, ignore: &[bool]) -> bool {
        self.obstacles.iter().enumerate().any(|(i, o)| {
            i != blocker
                && !ignore.get(i).copied().unwrap_or(false)
                && (o.violated_by(b) || o.curve.intersection_count_with_segment(a, b) > 0)
        })
    }

    /// Returns `true` when the straight leg from `p` to the target passes the
    /// blocker without crossing it or entering its zone.
    ///
    /// A target that itself lies inside the zone only has to be approached
    /// without getting closer than the target already is.
    fn sees_target(&self, p: &Point2, blocker: usize) -> bool {
        let Some(obstacle) = self.obstacles.get(blocker) else {
            return true;
        };
        let curve = &obstacle.curve;
        if curve.intersection_count_with_segment(p, &self.to) > 0 {
            return false;
        }
        let leg = curve.distance_to_segment(p, &self.to);
        let target = curve.distance_to(&self.to);
        if target < obstacle.clearance {
            leg >= target - TOLERANCE
        } else {
            leg >= obstacle.clearance
        }
    }
}

/// Upper bound on contour steps: twice the curve length plus one full turn.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn contour_step_limit(length: f64, radius: f64, step: f64) -> usize {
    ((2.0 * length + TAU * radius) / step).ceil() as usize + 2
}
