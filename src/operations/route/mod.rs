//! Clearance-constrained path construction between two points.

mod crossing;
mod deviation;
mod march;

use tracing::{debug, trace, warn};

use crate::config::RoutingConfig;
use crate::geometry::{Curve, Polyline};
use crate::math::{is_finite, same_point, Point2, TOLERANCE};
use crate::obstacle::Obstacle;

/// Finds the shortest polyline from `from` to `to` that keeps every obstacle
/// at least its clearance away.
///
/// # Algorithm
///
/// 1. March straight toward the target in steps of Δ (`config.step`) until the
///    next step would enter a clearance zone.
/// 2. Trace the blocking obstacle's clearance contour in both directions until
///    the target is visible past the zone, or another obstacle is hit.
/// 3. When crossings are allowed, also try crossing the blocker at no less
///    than the minimum turn angle, from the blocked point and from every
///    turning point of the contours.
/// 4. Recurse from each candidate and keep the shortest complete path.
///
/// The search depth is bounded by `config.max_depth`; exhausting it, or
/// running out of candidates, makes the route infeasible.
#[derive(Debug)]
pub struct RouteBetween<'a> {
    from: Point2,
    to: Point2,
    obstacles: &'a [Obstacle],
    config: &'a RoutingConfig,
}

impl<'a> RouteBetween<'a> {
    /// Creates a new routing operation.
    #[must_use]
    pub fn new(
        from: Point2,
        to: Point2,
        obstacles: &'a [Obstacle],
        config: &'a RoutingConfig,
    ) -> Self {
        Self {
            from,
            to,
            obstacles,
            config,
        }
    }

    /// Executes the search, returning the path or `None` when no feasible
    /// route exists within the depth limit. An invalid configuration has no
    /// feasible route.
    #[must_use]
    pub fn execute(&self) -> Option<Polyline> {
        if let Err(err) = self.config.validate() {
            warn!(%err, "refusing to route with invalid configuration");
            return None;
        }
        if !is_finite(&self.from) || !is_finite(&self.to) {
            return None;
        }
        let mut search = Search {
            obstacles: self.obstacles,
            config: self.config,
            to: self.to,
            best_length: f64::INFINITY,
        };
        let points = search.route(self.from, 0, 0.0);
        match points {
            Some(points) => {
                let path = Polyline::open(points).deduplicated();
                debug!(
                    vertices = path.points.len(),
                    length = path.length(),
                    "route found"
                );
                Some(path)
            }
            None => {
                debug!(from = ?self.from, to = ?self.to, "no feasible route");
                None
            }
        }
    }
}

/// Immutable inputs of one search plus the running branch-and-bound limit.
struct Search<'a> {
    obstacles: &'a [Obstacle],
    config: &'a RoutingConfig,
    to: Point2,
    best_length: f64,
}

impl Search<'_> {
    /// Returns the shortest path from `from` to the target found below `depth`,
    /// given that `prefix_length` has already been travelled.
    fn route(&mut self, from: Point2, depth: usize, prefix_length: f64) -> Option<Vec<Point2>> {
        if depth > self.config.max_depth {
            return None;
        }

        let (reached, blocker) = self.last_good_point(from);
        if same_point(&reached, &self.to, TOLERANCE) {
            if same_point(&from, &self.to, TOLERANCE) {
                return Some(vec![self.to]);
            }
            self.record(prefix_length + (self.to - from).norm());
            return Some(vec![from, self.to]);
        }
        let blocker = blocker?;

        let mut head = vec![from];
        if !same_point(&reached, &from, TOLERANCE) {
            head.push(reached);
        }
        let head_length = (reached - from).norm();
        if prefix_length + head_length + (self.to - reached).norm() >= self.best_length {
            return None;
        }

        let candidates = self.candidates(reached, blocker);

        let mut best: Option<(f64, Vec<Point2>)> = None;
        for candidate in candidates {
            let Some(&last) = candidate.last() else {
                continue;
            };
            if !candidate.iter().all(is_finite) || same_point(&last, &reached, TOLERANCE) {
                continue;
            }
            let detour_length = polyline_length(&reached, &candidate);
            trace!(depth, vertices = candidate.len(), "trying deviation");
            let Some(tail) =
                self.route(last, depth + 1, prefix_length + head_length + detour_length)
            else {
                continue;
            };

            let mut full = head.clone();
            full.extend_from_slice(&candidate);
            full.extend_from_slice(&tail[1..]);
            let length = polyline_length(&from, &full[1..]);
            if best.as_ref().is_none_or(|(l, _)| length < *l) {
                best = Some((length, full));
            }
        }

        let (length, full) = best?;
        self.record(prefix_length + length);
        Some(full)
    }

    /// Deviations around `blocker` from the blocked point `reached`.
    ///
    /// The direct crossing comes first, then each contour preceded by the
    /// crossings that leave it from one of its turning points.
    fn candidates(&self, reached: Point2, blocker: usize) -> Vec<Vec<Point2>> {
        let mut candidates: Vec<Vec<Point2>> = self.cross(reached, blocker).into_iter().collect();
        for sense in [1.0, -1.0] {
            let Some(contour) = self.trace_contour(reached, blocker, sense) else {
                continue;
            };
            if self.config.allow_intersection {
                let turning_points = contour.len().saturating_sub(1);
                for (i, vertex) in contour.iter().enumerate().take(turning_points) {
                    if let Some(crossing) = self.cross(*vertex, blocker) {
                        let mut variant = contour[..=i].to_vec();
                        variant.extend(crossing);
                        candidates.push(variant);
                    }
                }
            }
            candidates.push(contour);
        }
        candidates
    }

    /// Lowers the branch-and-bound limit to a newly completed path length.
    fn record(&mut self, total_length: f64) {
        if total_length < self.best_length {
            self.best_length = total_length;
        }
    }

    /// Clearance zones `p` already sits in; these may be left but not
    /// re-entered deeper.
    fn violated_at(&self, p: &Point2) -> Vec<bool> {
        self.obstacles.iter().map(|o| o.violated_by(p)).collect()
    }

    /// Returns `true` when the leg `a → b` keeps clear of every obstacle
    /// except `skip` and those flagged in `ignore`.
    fn leg_clear(&self, a: &Point2, b: &Point2, skip: Option<usize>, ignore: &[bool]) -> bool {
        self.obstacles.iter().enumerate().all(|(i, o)| {
            Some(i) == skip
                || ignore.get(i).copied().unwrap_or(false)
                || o.curve.distance_to_segment(a, b) >= o.clearance
        })
    }
}

/// Length of the polyline `start, points[0], points[1], ...`.
fn polyline_length(start: &Point2, points: &[Point2]) -> f64 {
    let mut length = 0.0;
    let mut prev = start;
    for p in points {
        length += (p - prev).norm();
        prev = p;
    }
    length
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn barrier() -> Obstacle {
        Obstacle::new(Polyline::open(vec![p(5.0, -2.0), p(5.0, 2.0)]), 1.0)
    }

    /// Smallest distance from any sampled point of `path` to `obstacle`.
    fn min_distance(path: &Polyline, obstacle: &Obstacle) -> f64 {
        let mut min = f64::INFINITY;
        for i in 0..path.segment_count() {
            let (a, b) = path.segment(i);
            for k in 0..=100 {
                let t = f64::from(k) / 100.0;
                min = min.min(obstacle.curve.distance_to(&(a + (b - a) * t)));
            }
        }
        min
    }

    #[test]
    fn unobstructed_route_is_straight() {
        let config = RoutingConfig::default();
        let path = RouteBetween::new(p(0.0, 0.0), p(10.0, 0.0), &[], &config)
            .execute()
            .unwrap();
        assert_eq!(path.points, vec![p(0.0, 0.0), p(10.0, 0.0)]);
    }

    #[test]
    fn coincident_endpoints_give_single_point() {
        let config = RoutingConfig::default();
        let path = RouteBetween::new(p(1.0, 1.0), p(1.0, 1.0), &[barrier()], &config)
            .execute()
            .unwrap();
        assert_eq!(path.points, vec![p(1.0, 1.0)]);
    }

    #[test]
    fn detours_around_vertical_barrier() {
        let config = RoutingConfig::default();
        let obstacles = [barrier()];
        let path = RouteBetween::new(p(0.0, 0.0), p(10.0, 0.0), &obstacles, &config)
            .execute()
            .unwrap();

        assert!(path.points.len() >= 4, "got {:?}", path.points);
        assert_eq!(path.first(), Some(&p(0.0, 0.0)));
        assert_eq!(path.last(), Some(&p(10.0, 0.0)));
        for v in &path.points {
            assert!(obstacles[0].curve.distance_to(v) >= 1.0 - 1e-9, "vertex {v:?}");
        }
        assert!(min_distance(&path, &obstacles[0]) >= 1.0 - 1e-6);

        // Goes over or under the barrier, not through it.
        let extreme = path
            .points
            .iter()
            .map(|v| v.y.abs())
            .fold(0.0_f64, f64::max);
        assert!(extreme > 2.0, "extreme={extreme}");
    }

    #[test]
    fn depth_zero_blocked_route_is_infeasible() {
        let config = RoutingConfig {
            max_depth: 0,
            ..RoutingConfig::default()
        };
        let path = RouteBetween::new(p(0.0, 0.0), p(10.0, 0.0), &[barrier()], &config).execute();
        assert!(path.is_none());
    }

    #[test]
    fn depth_zero_clear_route_still_succeeds() {
        let config = RoutingConfig {
            max_depth: 0,
            ..RoutingConfig::default()
        };
        let path = RouteBetween::new(p(0.0, 5.0), p(10.0, 5.0), &[barrier()], &config).execute();
        assert_eq!(path.unwrap().points.len(), 2);
    }

    #[test]
    fn enclosed_target_is_infeasible() {
        let config = RoutingConfig::default();
        let ring = Obstacle::boundary(
            Polyline::closed(vec![p(-3.0, -3.0), p(3.0, -3.0), p(3.0, 3.0), p(-3.0, 3.0)]),
            0.5,
        );
        let path = RouteBetween::new(p(-10.0, 0.0), p(0.0, 0.0), &[ring], &config).execute();
        assert!(path.is_none());
    }

    #[test]
    fn non_finite_endpoint_is_rejected() {
        let config = RoutingConfig::default();
        let path = RouteBetween::new(p(f64::NAN, 0.0), p(1.0, 0.0), &[], &config).execute();
        assert!(path.is_none());
    }

    #[test]
    fn routes_between_two_barriers() {
        let config = RoutingConfig::default();
        let obstacles = [
            Obstacle::new(Polyline::open(vec![p(3.0, -1.0), p(3.0, 3.0)]), 0.5),
            Obstacle::new(Polyline::open(vec![p(7.0, -3.0), p(7.0, 1.0)]), 0.5),
        ];
        let path = RouteBetween::new(p(0.0, 0.0), p(10.0, 0.0), &obstacles, &config)
            .execute()
            .unwrap();
        assert_eq!(path.last(), Some(&p(10.0, 0.0)));
        for o in &obstacles {
            assert!(min_distance(&path, o) >= o.clearance - 1e-6);
        }
    }

    #[test]
    fn crossing_allowed_goes_straight_through() {
        let config = RoutingConfig {
            allow_intersection: true,
            ..RoutingConfig::default()
        };
        let obstacles = [barrier()];
        let path = RouteBetween::new(p(0.0, 0.0), p(10.0, 0.0), &obstacles, &config)
            .execute()
            .unwrap();
        // Perpendicular approach satisfies the 90° minimum: no detour needed.
        assert!((path.length() - 10.0).abs() < 1e-6, "length={}", path.length());
    }

    /// Routes `(0, 0) → (10, 0)` past `obstacle` and checks the clearance
    /// along every leg.
    fn assert_route_keeps_clearance(obstacle: Obstacle) {
        let config = RoutingConfig::default();
        let obstacles = [obstacle];
        let path = RouteBetween::new(p(0.0, 0.0), p(10.0, 0.0), &obstacles, &config)
            .execute()
            .unwrap();
        assert_eq!(path.first(), Some(&p(0.0, 0.0)));
        assert_eq!(path.last(), Some(&p(10.0, 0.0)));

        let o = &obstacles[0];
        assert_eq!(path.intersection_count(&o.curve), 0);
        let closest = o.curve.distance_to_curve(&path);
        assert!(closest >= o.clearance - 1e-6, "closest={closest} path={:?}", path.points);
    }

    #[test]
    fn slanted_obstacle_keeps_clearance() {
        assert_route_keeps_clearance(Obstacle::new(
            Polyline::open(vec![p(4.0, -3.0), p(6.0, 3.0)]),
            0.8,
        ));
    }

    #[test]
    fn concave_obstacle_keeps_clearance() {
        assert_route_keeps_clearance(Obstacle::new(
            Polyline::open(vec![p(3.0, 3.0), p(6.0, 0.5), p(6.0, -0.5), p(3.0, -3.0)]),
            0.5,
        ));
    }

    #[test]
    fn u_shaped_pocket_keeps_clearance() {
        assert_route_keeps_clearance(Obstacle::new(
            Polyline::open(vec![p(3.0, 2.0), p(6.0, 2.0), p(6.0, -2.0), p(3.0, -2.0)]),
            0.5,
        ));
    }

    #[test]
    fn non_positive_step_is_rejected() {
        for step in [0.0, -0.05, f64::NAN] {
            let config = RoutingConfig {
                step,
                ..RoutingConfig::default()
            };
            let path = RouteBetween::new(p(0.0, 0.0), p(10.0, 0.0), &[], &config).execute();
            assert!(path.is_none(), "step={step}");
        }
    }

    #[test]
    fn crossing_leaves_the_contour_when_the_direct_one_is_blocked() {
        let config = RoutingConfig {
            allow_intersection: true,
            min_turn_angle_deg: 30.0,
            ..RoutingConfig::default()
        };
        let wall = barrier();
        let behind = Obstacle::new(Polyline::open(vec![p(6.5, -1.5), p(6.5, -1.1)]), 0.3);
        let obstacles = [wall.clone(), behind];
        let search = Search {
            obstacles: &obstacles,
            config: &config,
            to: p(10.0, -2.0),
            best_length: f64::INFINITY,
        };

        let (reached, blocker) = search.last_good_point(p(0.0, 0.0));
        assert_eq!(blocker, Some(0));
        assert!(search.cross(reached, 0).is_none(), "straight crossing hits the stub");

        let crossing = search.candidates(reached, 0).into_iter().find(|c| {
            let mut legs = vec![reached];
            legs.extend_from_slice(c);
            Polyline::open(legs).intersection_count(&wall.curve) > 0
        });
        let crossing = crossing.unwrap();
        let end = crossing.last().unwrap();
        assert!(wall.curve.distance_to(end) >= wall.clearance);
        assert!(!obstacles[1].violated_by(end));
    }

    #[test]
    fn boundary_is_never_crossed() {
        let config = RoutingConfig {
            allow_intersection: true,
            ..RoutingConfig::default()
        };
        let red_line = Obstacle::boundary(Polyline::open(vec![p(5.0, -2.0), p(5.0, 2.0)]), 1.0);
        let path = RouteBetween::new(p(0.0, 0.0), p(10.0, 0.0), &[red_line.clone()], &config)
            .execute()
            .unwrap();
        assert!(min_distance(&path, &red_line) >= 1.0 - 1e-6);
    }
}
