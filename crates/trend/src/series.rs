use chrono::NaiveDate;
use core_types::MonthKey;
use ratios::{FinancialRatios, LtmSummary};
use scoring::ScoreSummary;
use serde::{Deserialize, Serialize};

/// Ratios and scores for one month, computed over the trailing year ending there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub date: NaiveDate,
    pub month: MonthKey,
    pub ratios: FinancialRatios,
    pub ltm: LtmSummary,
    pub score: ScoreSummary,
}

/// One `TrendPoint` per eligible month, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    pub fn new(points: Vec<TrendPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&TrendPoint> {
        self.points.last()
    }

    /// One named figure across every point, for charting.
    ///
    /// Accepts any ratio name (`"currentRatio"`, ...) or one of the score
    /// names `"financialScore"`, `"profitabilityScore"`,
    /// `"assetDevelopmentScore"`.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let extract: fn(&TrendPoint, &str) -> Option<f64> = |point, name| match name {
            "financialScore" => Some(point.score.financial_score),
            "profitabilityScore" => Some(point.score.profitability_score),
            "assetDevelopmentScore" => Some(point.score.asset_development_score),
            other => point.ratios.get(other),
        };
        self.points.iter().map(|p| extract(p, name)).collect()
    }
}

impl IntoIterator for TrendSeries {
    type Item = TrendPoint;
    type IntoIter = std::vec::IntoIter<TrendPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a TrendSeries {
    type Item = &'a TrendPoint;
    type IntoIter = std::slice::Iter<'a, TrendPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::TrendSeriesBuilder;
    use core_types::FinancialSeries;
    use core_types::fixtures::flat_series;
    use ratios::RatioEngine;

    #[test]
    fn test_column_extraction() {
        let series = FinancialSeries::new(&flat_series(15, 1000.0));
        let trend = TrendSeriesBuilder::new(&series, RatioEngine::default()).build();

        assert_eq!(trend.column("financialScore"), Some(vec![75.0; 3]));
        assert_eq!(trend.column("leverage"), Some(vec![4.0; 3]));
        assert_eq!(trend.column("nope"), None);
    }

    #[test]
    fn test_column_of_empty_series() {
        let trend = super::TrendSeries::default();
        assert_eq!(trend.column("leverage"), Some(vec![]));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let series = FinancialSeries::new(&flat_series(13, 1000.0));
        let trend = TrendSeriesBuilder::new(&series, RatioEngine::default()).build();

        let json = serde_json::to_value(&trend).unwrap();
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["score"]["financialScore"], 75.0);
        assert_eq!(array[0]["score"]["baseRGS"], 50.0);
    }
}
