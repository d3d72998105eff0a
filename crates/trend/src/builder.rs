use crate::series::{TrendPoint, TrendSeries};
use core_types::{FinancialSeries, MONTHS_PER_YEAR};
use ratios::RatioEngine;
use scoring::ScoreEngine;
use std::ops::Range;

/// The first position with a full trailing year behind it.
pub const FIRST_ELIGIBLE_INDEX: usize = MONTHS_PER_YEAR;

/// Slides a twelve-month window across the whole history, producing one
/// `TrendPoint` per eligible month.
///
/// The builder holds no iteration state: every call to `iter` starts over,
/// and any single month can be recomputed with `point_at`.
#[derive(Debug, Clone)]
pub struct TrendSeriesBuilder<'a> {
    series: &'a FinancialSeries,
    ratio_engine: RatioEngine,
    score_engine: ScoreEngine,
}

impl<'a> TrendSeriesBuilder<'a> {
    pub fn new(series: &'a FinancialSeries, ratio_engine: RatioEngine) -> Self {
        Self {
            series,
            ratio_engine,
            score_engine: ScoreEngine::new(),
        }
    }

    pub fn with_score_engine(mut self, score_engine: ScoreEngine) -> Self {
        self.score_engine = score_engine;
        self
    }

    /// Positions that produce a trend point; empty below 13 months.
    pub fn eligible_range(&self) -> Range<usize> {
        FIRST_ELIGIBLE_INDEX.min(self.series.len())..self.series.len()
    }

    /// The trend point for position `i`, if `i` is eligible.
    pub fn point_at(&self, i: usize) -> Option<TrendPoint> {
        if !self.eligible_range().contains(&i) {
            return None;
        }
        let record = self.series.get(i)?;

        Some(TrendPoint {
            label: record.label.clone(),
            date: record.date,
            month: record.month_key(),
            ratios: self.ratio_engine.calculate(self.series, i),
            ltm: self.ratio_engine.ltm(self.series, i),
            score: self.score_engine.score_at(self.series, i),
        })
    }

    /// A lazy, finite pass over every eligible month, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = TrendPoint> + '_ {
        self.eligible_range().filter_map(move |i| self.point_at(i))
    }

    pub fn build(&self) -> TrendSeries {
        let points: Vec<TrendPoint> = self.iter().collect();
        tracing::debug!(
            months = self.series.len(),
            points = points.len(),
            "Built trend series."
        );
        TrendSeries::new(points)
    }
}
