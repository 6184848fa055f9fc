use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let delta = p2 - p1;
    let t = cross_2d(&delta, d2) / cross;
    let u = cross_2d(&delta, d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Collinear overlapping segments report the first shared endpoint.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = cross_2d(&da, &db);
    if cross.abs() < TOLERANCE {
        return collinear_overlap(a0, a1, b0, b1);
    }

    let delta = b0 - a0;
    let t = cross_2d(&delta, &db) / cross;
    let u = cross_2d(&delta, &da) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((point_at(a0, &da, t_clamped), t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Handles the parallel case of [`segment_segment_intersect_2d`].
fn collinear_overlap(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    if cross_2d(&da, &(b0 - a0)).abs() > TOLERANCE * da.norm().max(1.0) {
        return None;
    }
    let len_sq = da.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return None;
    }
    let db = b1 - b0;
    let db_len_sq = db.norm_squared().max(TOLERANCE * TOLERANCE);
    for b in [b0, b1] {
        let t = (b - a0).dot(&da) / len_sq;
        if (-TOLERANCE..=1.0 + TOLERANCE).contains(&t) {
            let u = (b - b0).dot(&db) / db_len_sq;
            return Some((*b, t.clamp(0.0, 1.0), u.clamp(0.0, 1.0)));
        }
    }
    let u = (a0 - b0).dot(&db) / db_len_sq;
    if (-TOLERANCE..=1.0 + TOLERANCE).contains(&u) {
        return Some((*a0, 0.0, u.clamp(0.0, 1.0)));
    }
    None
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments() {
        let (pt, t, u) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0))
                .unwrap();
        assert!((pt.x - 1.0).abs() < 1e-12 && (pt.y - 1.0).abs() < 1e-12);
        assert!((t - 0.5).abs() < 1e-12 && (u - 0.5).abs() < 1e-12);
    }

    #[test]
    fn disjoint_segments() {
        let r =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 1.0), &p(2.0, -1.0));
        assert!(r.is_none());
    }

    #[test]
    fn touching_at_endpoint() {
        let r =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0));
        assert!(r.is_some());
    }

    #[test]
    fn collinear_overlap_detected() {
        let r =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0));
        assert!(r.is_some());
        let r =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0), &p(3.0, 0.0));
        assert!(r.is_none());
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        let r = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(0.0, 1.0),
            &Vector2::new(2.0, 0.0),
        );
        assert!(r.is_none());
    }
}
