use tracing::debug;

use crate::geometry::{Curve, Polyline};
use crate::math::{cross_2d, same_point, Point2, TOLERANCE};
use crate::obstacle::Obstacle;

/// Removes redundant vertices from a routed path.
///
/// Runs two passes until neither removes anything:
/// - collinear vertices and consecutive duplicates are dropped outright;
/// - an interior vertex is dropped when the straight shortcut between its
///   neighbours stays at least `clearance + margin` from every obstacle.
///
/// Endpoints are never removed.
#[derive(Debug)]
pub struct SimplifyPath<'a> {
    obstacles: &'a [Obstacle],
    margin: f64,
}

impl<'a> SimplifyPath<'a> {
    /// Creates a new simplification against `obstacles`.
    #[must_use]
    pub fn new(obstacles: &'a [Obstacle], margin: f64) -> Self {
        Self { obstacles, margin }
    }

    /// Executes the simplification.
    #[must_use]
    pub fn execute(&self, path: &Polyline) -> Polyline {
        let mut points = path.points.clone();
        let mut removed = 0;
        loop {
            let pass = remove_collinear(&mut points)
                + remove_slack(&mut points, self.obstacles, self.margin);
            if pass == 0 {
                break;
            }
            removed += pass;
        }
        if removed > 0 {
            debug!(removed, vertices = points.len(), "simplified path");
        }
        Polyline::new(points, path.closed)
    }
}

/// Drops consecutive duplicates and vertices lying on the segment between
/// their neighbours. Returns the number of vertices removed.
pub fn remove_collinear(points: &mut Vec<Point2>) -> usize {
    let before = points.len();
    points.dedup_by(|b, a| same_point(a, b, TOLERANCE));

    let mut i = 1;
    while i + 1 < points.len() {
        if lies_between(&points[i], &points[i - 1], &points[i + 1]) {
            points.remove(i);
        } else {
            i += 1;
        }
    }
    before - points.len()
}

/// Drops interior vertices whose shortcut keeps `clearance + margin` from
/// every obstacle. Returns the number of vertices removed.
pub fn remove_slack(points: &mut Vec<Point2>, obstacles: &[Obstacle], margin: f64) -> usize {
    let before = points.len();
    let mut i = 1;
    while i + 1 < points.len() {
        let (a, c) = (points[i - 1], points[i + 1]);
        let clear = obstacles
            .iter()
            .all(|o| o.curve.distance_to_segment(&a, &c) >= o.clearance + margin);
        if clear {
            points.remove(i);
        } else {
            i += 1;
        }
    }
    before - points.len()
}

fn lies_between(p: &Point2, a: &Point2, b: &Point2) -> bool {
    let ab = b - a;
    let ap = p - a;
    let len = ab.norm();
    if len <= TOLERANCE {
        return same_point(p, a, TOLERANCE);
    }
    cross_2d(&ab, &ap).abs() <= TOLERANCE * len && (0.0..=len * len).contains(&ab.dot(&ap))
}
