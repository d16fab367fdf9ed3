use crate::types::Profitability;

/// Tolerance used when comparing compounded rates against break-even (1.0)
/// and against each other.
pub const RATE_EPSILON: f64 = 1e-9;

/// Multiplies rates together in the order they are yielded.
///
/// The accumulation order is fixed by the caller (cycle order), so repeated
/// evaluations of the same cycle round identically.
pub fn compound<I>(rates: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    rates.into_iter().fold(1.0, |acc, rate| acc * rate)
}

/// Buckets a compounded rate against break-even with an epsilon gate.
///
/// - `rate > 1.0 + eps` → [`Profitability::Profitable`]
/// - `|rate - 1.0| <= eps` → [`Profitability::Neutral`]
/// - otherwise → [`Profitability::Unprofitable`]
pub fn classify(rate: f64, eps: f64) -> Profitability {
    if rate > 1.0 + eps {
        Profitability::Profitable
    } else if rate >= 1.0 - eps {
        Profitability::Neutral
    } else {
        Profitability::Unprofitable
    }
}

/// Returns true if `candidate` beats `incumbent` by more than `eps`.
///
/// Values within `eps` of each other are treated as a tie, which the
/// incumbent wins.
pub fn strictly_greater(candidate: f64, incumbent: f64, eps: f64) -> bool {
    candidate > incumbent + eps
}

/// Returns true if a rate can be stored on an edge: finite and positive.
pub fn is_valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

#[cfg(test)]
mod numerical_kernel_tests {
    use super::*;

    fn assert_approx_eq(a: f64, b: f64) {
        assert!(
            (a - b).abs() < 1e-12,
            "{} is not approximately equal to {}",
            a,
            b
        );
    }

    #[test]
    fn test_compound_multiplies_in_order() {
        assert_approx_eq(compound([2.0, 3.0, 0.2]), 1.2);
        assert_approx_eq(compound([1.05]), 1.05);
    }

    #[test]
    fn test_compound_of_nothing_is_identity() {
        assert_eq!(compound(std::iter::empty()), 1.0);
    }

    #[test]
    fn test_classify_break_even_is_neutral() {
        // 2.0 * 0.5 is exactly 1.0 in binary floating point.
        assert_eq!(classify(compound([2.0, 0.5]), RATE_EPSILON), Profitability::Neutral);

        // Drift well inside the gate must not open it.
        assert_eq!(classify(1.0 + 1e-12, RATE_EPSILON), Profitability::Neutral);
        assert_eq!(classify(1.0 - 1e-12, RATE_EPSILON), Profitability::Neutral);
    }

    #[test]
    fn test_classify_outside_gate() {
        assert_eq!(classify(1.2, RATE_EPSILON), Profitability::Profitable);
        assert_eq!(classify(0.8, RATE_EPSILON), Profitability::Unprofitable);
        assert_eq!(classify(1.0 + 1e-6, RATE_EPSILON), Profitability::Profitable);
    }

    #[test]
    fn test_classify_with_wide_epsilon() {
        assert_eq!(classify(1.05, 0.1), Profitability::Neutral);
        assert_eq!(classify(0.95, 0.1), Profitability::Neutral);
        assert_eq!(classify(1.2, 0.1), Profitability::Profitable);
    }

    #[test]
    fn test_strictly_greater_treats_close_values_as_tie() {
        assert!(strictly_greater(1.5, 1.2, RATE_EPSILON));
        assert!(!strictly_greater(1.2, 1.5, RATE_EPSILON));
        assert!(!strictly_greater(1.2 + 1e-12, 1.2, RATE_EPSILON));
    }

    #[test]
    fn test_rate_validity() {
        assert!(is_valid_rate(0.0001));
        assert!(!is_valid_rate(0.0));
        assert!(!is_valid_rate(-1.0));
        assert!(!is_valid_rate(f64::NAN));
        assert!(!is_valid_rate(f64::INFINITY));
    }
}
