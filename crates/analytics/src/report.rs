use forecast::ForecastResult;
use ratios::{FinancialRatios, LtmSummary};
use scoring::ScoreSummary;
use serde::{Deserialize, Serialize};
use trend::TrendSeries;

/// Everything derived from one series of monthly records.
///
/// This is the single output of the `AnalyticsEngine` and the data transfer
/// object handed to whatever renders the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedBundle {
    /// Months in the normalized series.
    pub months: usize,

    // I. Latest Month
    pub latest_ratios: FinancialRatios,
    pub latest_ltm: LtmSummary,
    pub score: ScoreSummary,

    // II. History
    pub trend: TrendSeries,

    // III. Projection
    pub forecast: ForecastResult,
}
