//! Seasonal triple exponential smoothing.
//!
//! The model moves through two typed states: `HoltWinters::seed` turns raw
//! observations into a `SeededModel` (or refuses when history is short), and
//! `SeededModel::project` produces the forecast. Nothing survives the call.

use core_types::MONTHS_PER_YEAR;
use core_types::math::safe_div;

/// Smoothing constants. Fixed for the engine; exposed for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParams {
    /// Level smoothing.
    pub alpha: f64,
    /// Trend smoothing.
    pub beta: f64,
    /// Seasonal smoothing.
    pub gamma: f64,
    pub season_length: usize,
}

impl SmoothingParams {
    pub const STANDARD: Self = Self {
        alpha: 0.2,
        beta: 0.1,
        gamma: 0.1,
        season_length: MONTHS_PER_YEAR,
    };

    /// Observations needed to seed: two full seasons.
    pub fn min_observations(&self) -> usize {
        self.season_length * 2
    }
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The unseeded model.
pub struct HoltWinters;

impl HoltWinters {
    /// Fits level, trend and seasonal indices to `data`.
    ///
    /// Returns `None` with fewer than two seasons of observations.
    pub fn seed(data: &[f64], params: &SmoothingParams) -> Option<SeededModel> {
        let period = params.season_length;
        if period == 0 || data.len() < params.min_observations() {
            return None;
        }
        let SmoothingParams {
            alpha, beta, gamma, ..
        } = *params;

        // One seasonal index per observation, seeded from each of the first
        // two seasons against their overall average. Reads take the cycle
        // slot `t % period`; writes land on the observation's own position.
        let warmup = &data[..period * 2];
        let average = warmup.iter().sum::<f64>() / warmup.len() as f64;
        let mut seasonal: Vec<f64> = warmup
            .iter()
            .map(|&value| if average == 0.0 { 1.0 } else { value / average })
            .collect();
        seasonal.resize(data.len(), 1.0);

        let mut level = safe_div(data[0], seasonal[0]);
        let mut trend = (data[period] - data[0]) / period as f64;

        for (t, &observed) in data.iter().enumerate().skip(1) {
            let index = seasonal[t % period];

            let previous_level = level;
            level = alpha * safe_div(observed, index) + (1.0 - alpha) * (level + trend);
            trend = beta * (level - previous_level) + (1.0 - beta) * trend;
            seasonal[t] = gamma * safe_div(observed, level) + (1.0 - gamma) * index;
        }

        tracing::debug!(level, trend, observations = data.len(), "Seeded Holt-Winters model.");

        Some(SeededModel {
            level,
            trend,
            seasonal,
            season_length: period,
        })
    }
}

/// A fitted model, ready to project.
#[derive(Debug, Clone, PartialEq)]
pub struct SeededModel {
    level: f64,
    trend: f64,
    seasonal: Vec<f64>,
    season_length: usize,
}

impl SeededModel {
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Seasonal indices, one per observation. Projection reads the first
    /// `season_length` of them.
    pub fn seasonal(&self) -> &[f64] {
        &self.seasonal
    }

    /// Projects `horizon` periods ahead with the trend scaled by
    /// `trend_multiplier`. Values are floored at 0.
    pub fn project(&self, horizon: usize, trend_multiplier: f64) -> Vec<f64> {
        let period = self.season_length;
        let observations = self.seasonal.len();
        let trend = self.trend * trend_multiplier;
        (1..=horizon)
            .map(|h| {
                let index = self.seasonal[(observations + h - 1) % period];
                let value = (self.level + h as f64 * trend) * index;
                if value.is_finite() { value.max(0.0) } else { 0.0 }
            })
            .collect()
    }
}
