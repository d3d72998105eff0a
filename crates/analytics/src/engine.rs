use crate::report::DerivedBundle;
use configuration::EngineConfig;
use core_types::{FinancialSeries, MonthlyFinancialRecord};
use forecast::ForecastEngine;
use ratios::RatioEngine;
use scoring::ScoreEngine;
use trend::TrendSeriesBuilder;

/// Runs every engine over one series and collects the results.
///
/// `calculate` is a pure function of its input: the same records always
/// produce the same bundle and nothing is cached between calls. Callers that
/// want memoization can key on `SeriesFingerprint`.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: EngineConfig,
}

impl AnalyticsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn calculate(&self, records: &[MonthlyFinancialRecord]) -> DerivedBundle {
        let series = FinancialSeries::new(records);
        self.calculate_series(&series)
    }

    /// As `calculate`, for a series the caller has already normalized.
    pub fn calculate_series(&self, series: &FinancialSeries) -> DerivedBundle {
        let ratio_engine = RatioEngine::new(self.config.ratios.clone());
        let score_engine = ScoreEngine::new();
        let latest = series.len().saturating_sub(1);

        let latest_ratios = ratio_engine.calculate(series, latest);
        let latest_ltm = ratio_engine.ltm(series, latest);
        let score = score_engine.latest(series);
        let trend = TrendSeriesBuilder::new(series, ratio_engine)
            .with_score_engine(score_engine)
            .build();
        let forecast = ForecastEngine::new(self.config.scenarios).forecast(series);

        tracing::info!(
            months = series.len(),
            trend_points = trend.len(),
            financial_score = score.financial_score,
            forecast_method = ?forecast.method,
            "Derived financial health bundle."
        );

        DerivedBundle {
            months: series.len(),
            latest_ratios,
            latest_ltm,
            score,
            trend,
            forecast,
        }
    }
}
