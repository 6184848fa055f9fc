use crate::math::{is_finite, same_point, Point2, TOLERANCE};

use super::curve::Curve;

/// A polyline made of straight segments.
///
/// For closed polylines, the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    pub points: Vec<Point2>,
    pub closed: bool,
}

impl Polyline {
    /// Creates a polyline from its vertices.
    #[must_use]
    pub fn new(points: Vec<Point2>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Creates an open polyline.
    #[must_use]
    pub fn open(points: Vec<Point2>) -> Self {
        Self::new(points, false)
    }

    /// Creates a closed polyline.
    #[must_use]
    pub fn closed(points: Vec<Point2>) -> Self {
        Self::new(points, true)
    }

    /// Total length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        (0..self.segment_count())
            .map(|i| {
                let (a, b) = self.segment(i);
                (b - a).norm()
            })
            .sum()
    }

    /// Returns the first vertex.
    #[must_use]
    pub fn first(&self) -> Option<&Point2> {
        self.points.first()
    }

    /// Returns the last vertex.
    #[must_use]
    pub fn last(&self) -> Option<&Point2> {
        self.points.last()
    }

    /// Returns `true` when every vertex has finite coordinates.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(is_finite)
    }

    /// Returns a copy without consecutive duplicate vertices.
    ///
    /// For closed polylines a trailing vertex equal to the first one is
    /// dropped as well.
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        let mut points: Vec<Point2> = Vec::with_capacity(self.points.len());
        for pt in &self.points {
            if points.last().is_some_and(|last| same_point(last, pt, TOLERANCE)) {
                continue;
            }
            points.push(*pt);
        }
        if self.closed && points.len() > 1 {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if same_point(first, last, TOLERANCE) {
                    points.pop();
                }
            }
        }
        Self {
            points,
            closed: self.closed,
        }
    }
}

impl Curve for Polyline {
    fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    fn segment(&self, index: usize) -> (Point2, Point2) {
        let n = self.points.len();
        (self.points[index], self.points[(index + 1) % n])
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
