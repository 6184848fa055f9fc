use tracing::trace;

use crate::geometry::Curve;
use crate::math::{left_normal, unit, Point2, TOLERANCE};

use super::Search;

impl Search<'_> {
    /// Crosses `blocker` from `start`, meeting it at no less than the minimum
    /// turn angle.
    ///
    /// Keeps the straight heading toward the target when that already meets
    /// the angle; otherwise bends toward the obstacle normal just enough.
    /// Returns the first point past the curve that is clear of its zone
    /// again, or `None` when crossing is disabled, the blocker is a boundary,
    /// the straight leg crosses it too often, or another obstacle is in the way.
    pub(super) fn cross(&self, start: Point2, blocker: usize) -> Option<Vec<Point2>> {
        let obstacle = self.obstacles.get(blocker)?;
        if !self.config.allow_intersection || obstacle.boundary {
            return None;
        }
        let curve = &obstacle.curve;
        if curve.intersection_count_with_segment(&start, &self.to) >= self.config.max_crossings {
            return None;
        }

        let ahead = unit(&(self.to - start)).ok()?;
        let closest = curve.closest_point(&start)?;
        let (a, b) = curve.segment(closest.segment);
        let tangent = unit(&(b - a)).ok()?;
        let mut inward = left_normal(&tangent);
        let toward = closest.point - start;
        let reference = if toward.norm() > TOLERANCE { toward } else { ahead };
        if inward.dot(&reference) < 0.0 {
            inward = -inward;
        }

        let min_angle = self.config.min_turn_angle();
        let approach = ahead.dot(&inward);
        let dir = if approach > 0.0 && approach.clamp(-1.0, 1.0).asin() >= min_angle - TOLERANCE {
            ahead
        } else {
            let along = if ahead.dot(&tangent) < 0.0 { -tangent } else { tangent };
            along * min_angle.cos() + inward * min_angle.sin()
        };

        let step = self.config.step;
        let exit = obstacle.clearance + step;
        let ignore = self.violated_at(&start);
        let max_steps = crossing_step_limit(exit, min_angle.sin(), step);

        let mut previous = start;
        for k in 1..=max_steps {
            #[allow(clippy::cast_precision_loss)]
            let q = start + dir * (k as f64 * step);
            let blocked = self.obstacles.iter().enumerate().any(|(i, o)| {
                i != blocker
                    && !ignore.get(i).copied().unwrap_or(false)
                    && (o.violated_by(&q)
                        || o.curve.intersection_count_with_segment(&previous, &q) > 0)
            });
            if blocked {
                trace!(blocker, "crossing runs into another obstacle");
                return None;
            }
            let crossed = curve.intersection_count_with_segment(&start, &q) > 0;
            if crossed && curve.distance_to(&q) >= exit {
                return Some(vec![q]);
            }
            previous = q;
        }
        None
    }
}

/// Steps needed to traverse a zone of half-width `exit` at `sin_angle`, with room to spare.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn crossing_step_limit(exit: f64, sin_angle: f64, step: f64) -> usize {
    ((2.0 * exit / sin_angle.max(0.1) + 2.0 * exit) / step).ceil() as usize + 2
}
