//! Closeness test for result value pairs.

/// True when `test` lies within `abs_tol + rel_tol * |reference|` of
/// `reference`.
///
/// The relative term scales with the reference value, so the test is
/// asymmetric: the reference file decides how much slack a pair gets.
/// Any comparison involving NaN fails.
pub fn is_close(test: f64, reference: f64, abs_tol: f64, rel_tol: f64) -> bool {
    (test - reference).abs() <= abs_tol + rel_tol * reference.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_passes_with_zero_tolerances() {
        assert!(is_close(1.5, 1.5, 0.0, 0.0));
        assert!(is_close(0.0, 0.0, 0.0, 0.0));
        assert!(is_close(-0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn any_difference_fails_with_zero_tolerances() {
        assert!(!is_close(1.5, 1.5000001, 0.0, 0.0));
    }

    #[test]
    fn absolute_tolerance_bounds_the_difference() {
        assert!(is_close(10.0, 10.5, 0.5, 0.0));
        assert!(!is_close(10.0, 10.51, 0.5, 0.0));
    }

    #[test]
    fn relative_tolerance_scales_with_reference() {
        assert!(is_close(100.0, 102.0, 0.0, 0.02));
        assert!(!is_close(100.0, 102.0, 0.0, 0.01));
    }

    #[test]
    fn relative_term_is_asymmetric() {
        assert!(is_close(0.9, 1.0, 0.0, 0.1));
        assert!(!is_close(1.0, 0.9, 0.0, 0.1));
    }

    #[test]
    fn nan_never_passes() {
        assert!(!is_close(f64::NAN, 1.0, 1000.0, 1000.0));
        assert!(!is_close(1.0, f64::NAN, 1000.0, 1000.0));
        assert!(!is_close(f64::NAN, f64::NAN, 1000.0, 1000.0));
    }

    #[test]
    fn equal_infinities_do_not_pass() {
        assert!(!is_close(f64::INFINITY, f64::INFINITY, 0.0, 0.0));
    }
}
