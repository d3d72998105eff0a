use serde::{Deserialize, Serialize};

/// Display band of a financial score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthRating {
    Strong,
    Healthy,
    Watch,
    AtRisk,
}

impl HealthRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthRating::Strong
        } else if score >= 60.0 {
            HealthRating::Healthy
        } else if score >= 40.0 {
            HealthRating::Watch
        } else {
            HealthRating::AtRisk
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthRating::Strong => "Strong",
            HealthRating::Healthy => "Healthy",
            HealthRating::Watch => "Watch",
            HealthRating::AtRisk => "At Risk",
        }
    }
}

/// Every stage of the score for one month.
///
/// `profitability_score` and `asset_development_score` are in `[10, 100]`;
/// `financial_score` is their mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub financial_score: f64,
    pub profitability_score: f64,
    pub asset_development_score: f64,

    // Revenue growth stages
    #[serde(rename = "baseRGS")]
    pub base_rgs: f64,
    #[serde(rename = "adjustedRGS")]
    pub adjusted_rgs: f64,
    pub expense_adjustment: f64,

    // Asset development stages
    #[serde(rename = "baseADS")]
    pub base_ads: f64,
    #[serde(rename = "adsAdjustment")]
    pub ads_adjustment: f64,

    // Inputs, in percent
    #[serde(rename = "growth24mo")]
    pub growth_24mo: f64,
    #[serde(rename = "growth6mo")]
    pub growth_6mo: f64,
    #[serde(rename = "expenseGrowth24mo")]
    pub expense_growth_24mo: f64,
    pub asset_liability_ratio: f64,
    pub asset_liability_growth: f64,

    pub rating: HealthRating,
}
