//! Vector helpers layered on top of [`glam::DVec3`].
//!
//! glam already covers arithmetic, dot/cross, lerp, component-wise min/max
//! and guarded normalization (`try_normalize`, `normalize_or_zero`). The
//! extension trait adds the few operations the ribbon pipeline needs that
//! glam does not define with the required boundary behavior.

use glam::DVec3;

/// Squared length below which a vector is treated as zero.
pub const DEGENERATE_LENGTH_SQ: f64 = 1e-18;

/// Extra vector operations used to seed and repair extrusion frames.
pub trait VectorExt {
    /// Canonical unit vector orthogonal to `self`.
    ///
    /// Vectors on the Z axis map to `(0, 1, 0)`; the zero vector maps to the
    /// zero vector. Every other input yields `normalize((-y, x, 0))`.
    fn perpendicular(self) -> DVec3;

    /// Smallest of the three components.
    fn min_component(self) -> f64;

    /// Largest of the three components.
    fn max_component(self) -> f64;

    /// Whether the vector is too short to normalize safely.
    fn is_degenerate(self) -> bool;
}

impl VectorExt for DVec3 {
    fn perpendicular(self) -> DVec3 {
        if self.x == 0.0 && self.y == 0.0 {
            if self.z == 0.0 {
                return DVec3::ZERO;
            }
            return DVec3::Y;
        }
        DVec3::new(-self.y, self.x, 0.0).normalize()
    }

    fn min_component(self) -> f64 {
        self.min_element()
    }

    fn max_component(self) -> f64 {
        self.max_element()
    }

    fn is_degenerate(self) -> bool {
        self.length_squared() < DEGENERATE_LENGTH_SQ
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_of_zero_is_zero() {
        assert_eq!(DVec3::ZERO.perpendicular(), DVec3::ZERO);
    }

    #[test]
    fn perpendicular_of_z_axis_is_y() {
        assert_eq!(DVec3::new(0.0, 0.0, 5.0).perpendicular(), DVec3::Y);
        assert_eq!(DVec3::new(0.0, 0.0, -2.0).perpendicular(), DVec3::Y);
    }

    #[test]
    fn perpendicular_is_unit_and_orthogonal() {
        let inputs = [
            DVec3::X,
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(-0.3, 0.001, 7.0),
            DVec3::new(1e-3, -4.0, 0.0),
        ];
        for v in inputs {
            let p = v.perpendicular();
            assert!(
                (p.length() - 1.0).abs() < 1e-12,
                "{v:?}: |p| = {}",
                p.length()
            );
            assert!(v.dot(p).abs() < 1e-12, "{v:?}: not orthogonal to {p:?}");
        }
    }

    #[test]
    fn min_max_components() {
        let v = DVec3::new(3.0, -1.0, 2.0);
        assert_eq!(v.min_component(), -1.0);
        assert_eq!(v.max_component(), 3.0);
    }

    #[test]
    fn degenerate_threshold() {
        assert!(DVec3::ZERO.is_degenerate());
        assert!(DVec3::splat(1e-10).is_degenerate());
        assert!(!DVec3::new(1e-6, 0.0, 0.0).is_degenerate());
    }
}
