use slotmap::SlotMap;

use crate::geometry::{Curve, Polyline};
use crate::math::polygon_2d::point_in_polygon_2d;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for an obstacle in an [`ObstacleSet`].
    pub struct ObstacleId;
}

/// A curve that routed paths must keep `clearance` away from.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// The obstacle geometry.
    pub curve: Polyline,
    /// Minimum allowed distance from `curve` to any routed path.
    pub clearance: f64,
    /// Red-line boundary: never crossed and never merged.
    pub boundary: bool,
}

impl Obstacle {
    /// Creates a regular obstacle.
    #[must_use]
    pub fn new(curve: Polyline, clearance: f64) -> Self {
        Self {
            curve,
            clearance,
            boundary: false,
        }
    }

    /// Creates a boundary obstacle.
    #[must_use]
    pub fn boundary(curve: Polyline, clearance: f64) -> Self {
        Self {
            curve,
            clearance,
            boundary: true,
        }
    }

    /// Signed margin of `p` against this obstacle: negative inside the zone.
    #[must_use]
    pub fn margin(&self, p: &Point2) -> f64 {
        self.curve.distance_to(p) - self.clearance
    }

    /// Returns `true` when `p` lies strictly inside the clearance zone.
    #[must_use]
    pub fn violated_by(&self, p: &Point2) -> bool {
        self.margin(p) < 0.0
    }

    /// Returns `true` when the clearance zones of the two obstacles overlap.
    ///
    /// A curve lying inside a closed curve counts as touching it.
    #[must_use]
    pub fn overlaps(&self, other: &Obstacle) -> bool {
        encloses(&self.curve, &other.curve)
            || encloses(&other.curve, &self.curve)
            || self.clearance + other.clearance > self.curve.distance_to_curve(&other.curve)
    }
}

fn encloses(outer: &Polyline, inner: &Polyline) -> bool {
    outer.closed
        && inner
            .points
            .iter()
            .any(|p| point_in_polygon_2d(p, &outer.points))
}

/// Arena of obstacles with stable identifiers.
///
/// Used where obstacles are folded together or appended while other code
/// still refers to the survivors.
#[derive(Debug, Default, Clone)]
pub struct ObstacleSet {
    obstacles: SlotMap<ObstacleId, Obstacle>,
}

impl ObstacleSet {
    /// Creates a new, empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an obstacle and returns its ID.
    pub fn insert(&mut self, obstacle: Obstacle) -> ObstacleId {
        self.obstacles.insert(obstacle)
    }

    /// Removes an obstacle, returning it if it was present.
    pub fn remove(&mut self, id: ObstacleId) -> Option<Obstacle> {
        self.obstacles.remove(id)
    }

    /// Returns a reference to an obstacle.
    #[must_use]
    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    /// Number of obstacles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// Returns `true` when the set holds no obstacle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Iterates over `(id, obstacle)` pairs in insertion-slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.obstacles.iter()
    }

    /// Takes a snapshot of the current obstacles.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Obstacle> {
        self.obstacles.values().cloned().collect()
    }
}

impl FromIterator<Obstacle> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Obstacle>>(iter: I) -> Self {
        let mut set = Self::new();
        for obstacle in iter {
            set.insert(obstacle);
        }
        set
    }
}
