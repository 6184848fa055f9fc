pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

use crate::error::{GeometryError, Result};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Z component of the cross product of two planar vectors.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Normalizes `v`, failing on zero-length input.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if `|v| < TOLERANCE`.
pub fn unit(v: &Vector2) -> Result<Vector2> {
    v.try_normalize(TOLERANCE)
        .ok_or_else(|| GeometryError::ZeroVector.into())
}

/// Returns `true` when both coordinates are finite.
#[must_use]
pub fn is_finite(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// Returns `true` when the points coincide within `tol`.
#[must_use]
pub fn same_point(a: &Point2, b: &Point2, tol: f64) -> bool {
    (a - b).norm_squared() <= tol * tol
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn unit_rejects_zero_vector() {
        assert!(unit(&Vector2::zeros()).is_err());
        let u = unit(&Vector2::new(3.0, 4.0)).unwrap();
        assert_abs_diff_eq!(u.x, 0.6, epsilon = TOLERANCE);
        assert_abs_diff_eq!(u.y, 0.8, epsilon = TOLERANCE);
    }

    #[test]
    fn cross_sign_gives_turn_direction() {
        let a = Vector2::new(1.0, 0.0);
        assert!(cross_2d(&a, &Vector2::new(0.0, 1.0)) > 0.0);
        assert!(cross_2d(&a, &Vector2::new(0.0, -1.0)) < 0.0);
        assert_abs_diff_eq!(left_normal(&a), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn non_finite_points_detected() {
        assert!(is_finite(&Point2::new(1.0, 2.0)));
        assert!(!is_finite(&Point2::new(f64::NAN, 0.0)));
        assert!(!is_finite(&Point2::new(0.0, f64::INFINITY)));
    }
}
