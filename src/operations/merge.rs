use tracing::debug;

use crate::geometry::Polyline;
use crate::math::polygon_2d::gift_wrap_hull;
use crate::obstacle::{Obstacle, ObstacleId, ObstacleSet};

/// Folds obstacles with overlapping clearance zones into single hull obstacles.
///
/// Two obstacles overlap when `clearance(A) + clearance(B) > distance(A, B)`.
/// The pair is replaced by the gift-wrapping hull of their vertices, carrying
/// the smaller of the two clearances. Merging repeats until no pair overlaps,
/// so a grown hull can absorb further neighbours. Boundary obstacles are left
/// untouched.
#[derive(Debug)]
pub struct MergeObstacles {
    obstacles: Vec<Obstacle>,
}

impl MergeObstacles {
    /// Creates a new merge operation.
    #[must_use]
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Executes the merge, returning the reduced obstacle list.
    #[must_use]
    pub fn execute(&self) -> Vec<Obstacle> {
        let mut set: ObstacleSet = self.obstacles.iter().cloned().collect();
        merge_in_place(&mut set);
        set.snapshot()
    }
}

/// Merges overlapping obstacles of `set` in place until none overlap.
///
/// Returns the number of pairwise merges performed.
pub fn merge_in_place(set: &mut ObstacleSet) -> usize {
    let mut merges = 0;
    while let Some((a, b)) = find_overlapping_pair(set) {
        let (Some(first), Some(second)) = (set.remove(a), set.remove(b)) else {
            break;
        };
        let merged = merge_pair(&first, &second);
        debug!(
            vertices = merged.curve.points.len(),
            clearance = merged.clearance,
            "merged overlapping obstacles"
        );
        set.insert(merged);
        merges += 1;
    }
    merges
}

/// Returns the first pair of mergeable obstacles whose zones overlap.
fn find_overlapping_pair(set: &ObstacleSet) -> Option<(ObstacleId, ObstacleId)> {
    let candidates: Vec<(ObstacleId, &Obstacle)> =
        set.iter().filter(|(_, o)| !o.boundary).collect();
    for (i, (id_a, a)) in candidates.iter().enumerate() {
        for (id_b, b) in &candidates[i + 1..] {
            if a.overlaps(b) {
                return Some((*id_a, *id_b));
            }
        }
    }
    None
}

/// Synthesizes the obstacle covering both inputs.
fn merge_pair(a: &Obstacle, b: &Obstacle) -> Obstacle {
    let mut points = a.curve.points.clone();
    points.extend_from_slice(&b.curve.points);
    let hull = gift_wrap_hull(&points);
    let curve = if hull.len() >= 3 {
        Polyline::closed(hull)
    } else {
        Polyline::open(hull)
    };
    Obstacle::new(curve, a.clearance.min(b.clearance))
}
