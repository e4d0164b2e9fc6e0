pub trait FloatExt {
    fn approximately_eq(self, other: Self) -> bool;

    /// True when `|self - other| <= tolerance`. NaN never compares equal.
    fn within(self, other: Self, tolerance: Self) -> bool;
}

impl FloatExt for f32 {
    fn approximately_eq(self, other: Self) -> bool {
        (self - other).abs() < crate::EPSILON as f32
    }

    fn within(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() <= tolerance
    }
}

impl FloatExt for f64 {
    fn approximately_eq(self, other: Self) -> bool {
        (self - other).abs() < crate::EPSILON
    }

    fn within(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() <= tolerance
    }
}

/// Largest absolute element-wise difference between two equally sized slices.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "slices must have equal length");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_approximately_eq() {
        assert!(1.0_f64.approximately_eq(1.0));
        assert!((0.1_f64 + 0.2_f64).approximately_eq(0.3));
        assert!(!1.0_f64.approximately_eq(1.000_001));
    }

    #[test]
    fn test_nan_is_never_equal() {
        assert!(!f64::NAN.approximately_eq(f64::NAN));
        assert!(!f64::NAN.within(0.0, 1.0));
        assert!(!f32::NAN.within(f32::NAN, f32::INFINITY));
    }

    #[test]
    fn test_within_is_inclusive() {
        assert!(1.0_f64.within(1.5, 0.5));
        assert!(!1.0_f64.within(1.5, 0.49));
        assert!((-2.0_f32).within(-2.25, 0.25));
    }

    #[test]
    fn test_max_abs_diff_picks_largest_gap() {
        let a = [1.0, -2.0, 3.0];
        let b = [1.5, 2.0, 3.0];
        assert_eq!(max_abs_diff(&a, &b), 4.0);
        assert_eq!(max_abs_diff(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic(expected = "slices must have equal length")]
    fn test_max_abs_diff_panics_on_length_mismatch() {
        max_abs_diff(&[1.0], &[1.0, 2.0]);
    }
}
