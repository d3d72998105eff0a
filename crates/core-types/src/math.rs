//! Numeric helpers shared by every engine.
//!
//! None of these functions can produce `NaN` or an infinity: a zero or
//! non-finite denominator yields `0.0`.

/// Maps `NaN` and the infinities to `0.0`.
#[inline]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Divides `numerator` by `denominator`, returning `0.0` when the denominator
/// is zero or the quotient is not finite.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// Arithmetic mean of two balances.
#[inline]
pub fn average(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Percentage change from `prior` to `current`, measured against `|prior|` so
/// that a move from a negative base reads with the right sign.
#[inline]
pub fn growth_pct(current: f64, prior: f64) -> f64 {
    safe_div(current - prior, prior.abs()) * 100.0
}

/// Clamps a score into `[min, max]`, treating a non-finite score as `min`.
#[inline]
pub fn clamp_score(score: f64, min: f64, max: f64) -> f64 {
    if !score.is_finite() {
        return min;
    }
    score.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_safe_div_zero_denominator() {
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_div(10.0, -0.0), 0.0);
        assert_eq!(safe_div(10.0, f64::NAN), 0.0);
        assert_eq!(safe_div(f64::INFINITY, 2.0), 0.0);
    }

    #[test]
    fn test_safe_div_regular() {
        assert_relative_eq!(safe_div(10.0, 4.0), 2.5);
        assert_relative_eq!(safe_div(-3.0, 2.0), -1.5);
    }

    #[test]
    fn test_growth_pct_uses_absolute_base() {
        assert_relative_eq!(growth_pct(120.0, 100.0), 20.0);
        // From -100 to -50 is an improvement.
        assert_relative_eq!(growth_pct(-50.0, -100.0), 50.0);
        assert_eq!(growth_pct(50.0, 0.0), 0.0);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(150.0, 10.0, 100.0), 100.0);
        assert_eq!(clamp_score(-3.0, 10.0, 100.0), 10.0);
        assert_eq!(clamp_score(f64::NAN, 10.0, 100.0), 10.0);
        assert_eq!(clamp_score(42.0, 10.0, 100.0), 42.0);
    }
}
