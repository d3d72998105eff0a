use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// The root configuration structure for the analytics engines.
///
/// Every section is optional in the file; omitted sections fall back to the
/// documented defaults, which reproduce the established ratio and forecast
/// output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ratios: RatioPolicy,
    pub scenarios: ScenarioSet,
}

/// Where coverage ratios take their interest figure from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestBasis {
    /// A fixed share of LTM operating expense stands in for interest.
    #[default]
    LtmOpexProxy,
    /// The LTM sum of each record's reported interest expense.
    Reported,
}

/// Parameters of the ratio formulas that are modeling choices rather than
/// accounting identities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioPolicy {
    pub interest_basis: InterestBasis,
    /// Share of LTM operating expense used as interest under `LtmOpexProxy`.
    /// 0.05 corresponds to 5%.
    pub interest_proxy_rate: f64,
    /// Share of long-term debt assumed due within a year for debt-service coverage.
    pub debt_service_principal_rate: f64,
    /// Day count used to turn turnover ratios into days.
    pub days_in_year: f64,
}

impl Default for RatioPolicy {
    fn default() -> Self {
        Self {
            interest_basis: InterestBasis::LtmOpexProxy,
            interest_proxy_rate: 0.05,
            debt_service_principal_rate: 0.10,
            days_in_year: 365.0,
        }
    }
}

/// Multipliers that turn the shared forecast estimate into one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMultipliers {
    /// Applied to the smoothed revenue trend.
    pub revenue_trend: f64,
    /// Applied to the smoothed COGS and operating-expense trends.
    pub cost_trend: f64,
    /// Applied to the realized monthly growth rate of total assets.
    pub asset_growth: f64,
    /// Applied to the realized monthly growth rate of total liabilities.
    pub liability_growth: f64,
    /// Uniform band on projected revenue when history is too short to smooth.
    pub revenue_band: f64,
    /// Uniform band on projected costs when history is too short to smooth.
    pub cost_band: f64,
}

impl ScenarioMultipliers {
    pub const MOST_LIKELY: Self = Self {
        revenue_trend: 1.0,
        cost_trend: 1.0,
        asset_growth: 1.0,
        liability_growth: 1.0,
        revenue_band: 1.0,
        cost_band: 1.0,
    };

    pub const BEST_CASE: Self = Self {
        revenue_trend: 1.5,
        cost_trend: 0.5,
        asset_growth: 1.2,
        liability_growth: 0.8,
        revenue_band: 1.1,
        cost_band: 0.9,
    };

    pub const WORST_CASE: Self = Self {
        revenue_trend: 0.5,
        cost_trend: 1.5,
        asset_growth: 0.8,
        liability_growth: 1.2,
        revenue_band: 0.9,
        cost_band: 1.1,
    };

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let fields = [
            ("revenue_trend", self.revenue_trend),
            ("cost_trend", self.cost_trend),
            ("asset_growth", self.asset_growth),
            ("liability_growth", self.liability_growth),
            ("revenue_band", self.revenue_band),
            ("cost_band", self.cost_band),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "scenarios.{name}.{field} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }
}

/// The three sibling scenarios produced by every forecast.
///
/// Each section of the file may name only some keys; the rest come from that
/// scenario's named constant (`BEST_CASE` for `best_case`, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ScenarioOverrides")]
pub struct ScenarioSet {
    pub most_likely: ScenarioMultipliers,
    pub best_case: ScenarioMultipliers,
    pub worst_case: ScenarioMultipliers,
}

impl ScenarioSet {
    pub const STANDARD: Self = Self {
        most_likely: ScenarioMultipliers::MOST_LIKELY,
        best_case: ScenarioMultipliers::BEST_CASE,
        worst_case: ScenarioMultipliers::WORST_CASE,
    };
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A scenario section as written in the file, every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MultiplierOverrides {
    revenue_trend: Option<f64>,
    cost_trend: Option<f64>,
    asset_growth: Option<f64>,
    liability_growth: Option<f64>,
    revenue_band: Option<f64>,
    cost_band: Option<f64>,
}

impl MultiplierOverrides {
    fn apply_to(self, base: ScenarioMultipliers) -> ScenarioMultipliers {
        ScenarioMultipliers {
            revenue_trend: self.revenue_trend.unwrap_or(base.revenue_trend),
            cost_trend: self.cost_trend.unwrap_or(base.cost_trend),
            asset_growth: self.asset_growth.unwrap_or(base.asset_growth),
            liability_growth: self.liability_growth.unwrap_or(base.liability_growth),
            revenue_band: self.revenue_band.unwrap_or(base.revenue_band),
            cost_band: self.cost_band.unwrap_or(base.cost_band),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScenarioOverrides {
    most_likely: MultiplierOverrides,
    best_case: MultiplierOverrides,
    worst_case: MultiplierOverrides,
}

impl From<ScenarioOverrides> for ScenarioSet {
    fn from(overrides: ScenarioOverrides) -> Self {
        Self {
            most_likely: overrides.most_likely.apply_to(ScenarioMultipliers::MOST_LIKELY),
            best_case: overrides.best_case.apply_to(ScenarioMultipliers::BEST_CASE),
            worst_case: overrides.worst_case.apply_to(ScenarioMultipliers::WORST_CASE),
        }
    }
}

impl EngineConfig {
    /// Checks the values that deserialization alone cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let policy = &self.ratios;
        for (field, value) in [
            ("interest_proxy_rate", policy.interest_proxy_rate),
            ("debt_service_principal_rate", policy.debt_service_principal_rate),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "ratios.{field} must be between 0 and 1 (got {value})"
                )));
            }
        }
        if !policy.days_in_year.is_finite() || policy.days_in_year <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "ratios.days_in_year must be greater than 0 (got {})",
                policy.days_in_year
            )));
        }

        self.scenarios.most_likely.validate("most_likely")?;
        self.scenarios.best_case.validate("best_case")?;
        self.scenarios.worst_case.validate("worst_case")?;
        Ok(())
    }
}
