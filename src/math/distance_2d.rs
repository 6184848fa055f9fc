use super::intersect_2d::segment_segment_intersect_2d;
use super::Point2;

/// Returns the parameter `t ∈ [0, 1]` of the point on segment `a → b`
/// closest to `p`.
#[must_use]
pub fn closest_param_on_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return 0.0;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0)
}

/// Returns the minimum distance from point `p` to the line segment `a → b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let t = closest_param_on_segment(p, a, b);
    let closest = a + (b - a) * t;
    (p - closest).norm()
}

/// Returns the minimum distance between segments `a0 → a1` and `b0 → b1`.
///
/// Zero when the segments touch or cross.
#[must_use]
pub fn segment_to_segment_dist(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> f64 {
    if segment_segment_intersect_2d(a0, a1, b0, b1).is_some() {
        return 0.0;
    }
    point_to_segment_dist(a0, b0, b1)
        .min(point_to_segment_dist(a1, b0, b1))
        .min(point_to_segment_dist(b0, a0, a1))
        .min(point_to_segment_dist(b1, a0, a1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    // ── point_to_segment_dist tests ──

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        // Zero-length segment: distance is point-to-point.
        let d = point_to_segment_dist(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    // ── segment_to_segment_dist tests ──

    #[test]
    fn crossing_segments_have_zero_distance() {
        let d = segment_to_segment_dist(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0));
        assert!(d.abs() < TOL, "d={d}");
    }

    #[test]
    fn parallel_segments_distance() {
        let d = segment_to_segment_dist(&p(0.0, 0.0), &p(4.0, 0.0), &p(1.0, 3.0), &p(3.0, 3.0));
        assert!((d - 3.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn endpoint_to_interior_distance() {
        // T-shape with a gap: (1, 1)→(1, 5) above (0,0)→(2,0).
        let d = segment_to_segment_dist(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 1.0), &p(1.0, 5.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }
}
