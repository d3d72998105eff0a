//! Unsmoothed growth extrapolation for balance-sheet lines and short history.

use core_types::MONTHS_PER_YEAR;

/// Monthly growth implied by the trailing twelve months against the twelve
/// before them: `(recent / prior)^(1/12) - 1`.
///
/// Returns 0 with fewer than 24 values or a non-positive average on either side.
pub fn trailing_monthly_growth(values: &[f64]) -> f64 {
    let n = values.len();
    if n < MONTHS_PER_YEAR * 2 {
        return 0.0;
    }
    let mean = |window: &[f64]| window.iter().sum::<f64>() / window.len() as f64;
    let recent = mean(&values[n - MONTHS_PER_YEAR..]);
    let prior = mean(&values[n - 2 * MONTHS_PER_YEAR..n - MONTHS_PER_YEAR]);
    if prior <= 0.0 || recent <= 0.0 {
        return 0.0;
    }
    finite_rate((recent / prior).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0)
}

/// Compound monthly growth from the first to the last value:
/// `(last / first)^(1/(n-1)) - 1`.
///
/// Returns 0 with fewer than two values or a non-positive value at either end.
pub fn compound_monthly_growth(values: &[f64]) -> f64 {
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return 0.0;
    };
    let periods = values.len() - 1;
    if periods == 0 || first <= 0.0 || last <= 0.0 {
        return 0.0;
    }
    finite_rate((last / first).powf(1.0 / periods as f64) - 1.0)
}

/// `last * (1 + rate)^h` for `h = 1..=horizon`, floored at 0.
pub fn project_compound(last: f64, rate: f64, horizon: usize) -> Vec<f64> {
    (1..=horizon)
        .map(|h| {
            let value = last * (1.0 + rate).powi(h as i32);
            if value.is_finite() { value.max(0.0) } else { 0.0 }
        })
        .collect()
}

fn finite_rate(rate: f64) -> f64 {
    if rate.is_finite() { rate } else { 0.0 }
}
