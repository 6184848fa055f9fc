use crate::geometry::Curve;
use crate::math::{same_point, Point2, TOLERANCE};

use super::Search;

impl Search<'_> {
    /// Advances from `from` straight toward the target in steps of Δ.
    ///
    /// Returns the farthest reachable point and, unless the target was
    /// reached, the index of the obstacle that stopped the advance. Points
    /// within 2Δ of the target snap onto it.
    pub(super) fn last_good_point(&self, from: Point2) -> (Point2, Option<usize>) {
        let step = self.config.step;
        let offset = self.to - from;
        let total = offset.norm();
        if total <= 2.0 * step || same_point(&from, &self.to, TOLERANCE) {
            return (self.to, None);
        }
        let dir = offset / total;

        let mut current = from;
        let mut k = 1.0;
        loop {
            if (self.to - current).norm() <= 2.0 * step {
                return (self.to, None);
            }
            // Stepping from `from` keeps drift from accumulating.
            let next = from + dir * (k * step);
            if let Some(blocker) = self.step_blocker(&current, &next) {
                return (current, Some(blocker));
            }
            current = next;
            k += 1.0;
        }
    }

    /// Returns the obstacle that forbids the step `current → next`, if any.
    ///
    /// A step is forbidden when it crosses an obstacle curve, or when it comes
    /// closer than the clearance without already being inside that zone and
    /// moving out of it. Among several, the deepest violation wins.
    fn step_blocker(&self, current: &Point2, next: &Point2) -> Option<usize> {
        let mut blocker: Option<(usize, f64)> = None;
        for (i, o) in self.obstacles.iter().enumerate() {
            let crosses = o.curve.intersection_count_with_segment(current, next) > 0;
            if !crosses && o.curve.distance_to_segment(current, next) >= o.clearance {
                continue;
            }
            let d_current = o.curve.distance_to(current);
            let d_next = o.curve.distance_to(next);
            let escaping = d_current < o.clearance && d_next >= d_current;
            if escaping && !crosses {
                continue;
            }
            let margin = d_next - o.clearance;
            if blocker.is_none_or(|(_, m)| margin < m) {
                blocker = Some((i, margin));
            }
        }
        blocker.map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingConfig;
    use crate::geometry::Polyline;
    use crate::obstacle::Obstacle;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn search<'a>(obstacles: &'a [Obstacle], config: &'a RoutingConfig, to: Point2) -> Search<'a> {
        Search {
            obstacles,
            config,
            to,
            best_length: f64::INFINITY,
        }
    }

    #[test]
    fn stops_at_clearance_boundary() {
        let config = RoutingConfig::default();
        let obstacles = [Obstacle::new(
            Polyline::open(vec![p(5.0, -2.0), p(5.0, 2.0)]),
            1.0,
        )];
        let (reached, blocker) =
            search(&obstacles, &config, p(10.0, 0.0)).last_good_point(p(0.0, 0.0));
        assert_eq!(blocker, Some(0));
        assert!(reached.x <= 4.0 + 1e-9 && reached.x > 4.0 - config.step - 1e-9, "{reached:?}");
    }

    #[test]
    fn snaps_to_target_within_two_steps() {
        let config = RoutingConfig::default();
        let (reached, blocker) = search(&[], &config, p(0.08, 0.0)).last_good_point(p(0.0, 0.0));
        assert_eq!(reached, p(0.08, 0.0));
        assert_eq!(blocker, None);
    }

    #[test]
    fn zero_clearance_line_cannot_be_stepped_over() {
        let config = RoutingConfig::default();
        let obstacles = [Obstacle::boundary(
            Polyline::open(vec![p(1.025, -1.0), p(1.025, 1.0)]),
            0.0,
        )];
        let (reached, blocker) =
            search(&obstacles, &config, p(3.0, 0.0)).last_good_point(p(0.0, 0.0));
        assert_eq!(blocker, Some(0));
        assert!(reached.x < 1.025);
    }

    #[test]
    fn start_inside_zone_may_escape() {
        let config = RoutingConfig::default();
        let obstacles = [Obstacle::new(
            Polyline::open(vec![p(0.0, -1.0), p(0.0, 1.0)]),
            1.0,
        )];
        let (reached, blocker) =
            search(&obstacles, &config, p(5.0, 0.0)).last_good_point(p(0.2, 0.0));
        assert_eq!(blocker, None);
        assert_eq!(reached, p(5.0, 0.0));
    }
}
