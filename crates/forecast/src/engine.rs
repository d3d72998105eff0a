use crate::growth::{compound_monthly_growth, project_compound, trailing_monthly_growth};
use crate::holt_winters::{HoltWinters, SeededModel, SmoothingParams};
use crate::result::{ForecastMethod, ForecastPoint, ForecastResult, ForecastScenario, ScenarioKind};
use chrono::NaiveDate;
use configuration::{ScenarioMultipliers, ScenarioSet};
use core_types::{FinancialSeries, MONTHS_PER_YEAR, MonthlyFinancialRecord};

/// Months projected by every forecast.
pub const FORECAST_HORIZON: usize = MONTHS_PER_YEAR;

/// Fewest months the compound-growth fallback accepts.
pub const MIN_FALLBACK_HISTORY: usize = 2;

/// The raw monthly lines a forecast reads.
struct HistoricalLines {
    revenue: Vec<f64>,
    cogs: Vec<f64>,
    operating_expenses: Vec<f64>,
    total_assets: Vec<f64>,
    total_liabilities: Vec<f64>,
}

impl HistoricalLines {
    fn from_series(series: &FinancialSeries) -> Self {
        Self {
            revenue: series.column(MonthlyFinancialRecord::revenue),
            cogs: series.column(MonthlyFinancialRecord::total_cogs),
            operating_expenses: series.column(MonthlyFinancialRecord::total_operating_expenses),
            total_assets: series.column(|r| r.balance.total_assets),
            total_liabilities: series.column(|r| r.balance.total_liabilities),
        }
    }
}

/// One scenario's projected lines before they are dated.
struct ProjectedLines {
    revenue: Vec<f64>,
    cogs: Vec<f64>,
    operating_expenses: Vec<f64>,
    total_assets: Vec<f64>,
    total_liabilities: Vec<f64>,
}

/// Fitted models for the income-statement lines plus the realized
/// balance-sheet growth rates. Shared by all three scenarios.
struct SeasonalBasis {
    revenue: SeededModel,
    cogs: SeededModel,
    operating_expenses: SeededModel,
    asset_growth: f64,
    liability_growth: f64,
    last_assets: f64,
    last_liabilities: f64,
}

/// Compound growth rates and the last observed values, for short history.
struct CompoundBasis {
    revenue: (f64, f64),
    cogs: (f64, f64),
    operating_expenses: (f64, f64),
    total_assets: (f64, f64),
    total_liabilities: (f64, f64),
}

enum Basis {
    Seasonal(SeasonalBasis),
    Compound(CompoundBasis),
}

/// Projects the next twelve months under three scenarios.
///
/// Every call fits its own models from the series it is given; nothing is
/// cached between calls, so the same series always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    scenarios: ScenarioSet,
    smoothing: SmoothingParams,
}

impl ForecastEngine {
    pub fn new(scenarios: ScenarioSet) -> Self {
        Self {
            scenarios,
            smoothing: SmoothingParams::STANDARD,
        }
    }

    pub fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    pub fn forecast(&self, series: &FinancialSeries) -> ForecastResult {
        let Some(last) = series.last() else {
            return ForecastResult::insufficient();
        };
        if series.len() < MIN_FALLBACK_HISTORY {
            tracing::debug!(months = series.len(), "Too little history to forecast.");
            return ForecastResult::insufficient();
        }

        let lines = HistoricalLines::from_series(series);
        let (method, basis) = self.fit(&lines);
        let months = future_months(last, FORECAST_HORIZON);

        tracing::debug!(?method, months = series.len(), "Projecting forecast scenarios.");

        let build = |kind: ScenarioKind, multipliers: &ScenarioMultipliers| {
            let projected = project(&basis, multipliers);
            assemble(kind, &months, projected)
        };

        ForecastResult {
            method,
            most_likely: build(ScenarioKind::MostLikely, &self.scenarios.most_likely),
            best_case: build(ScenarioKind::BestCase, &self.scenarios.best_case),
            worst_case: build(ScenarioKind::WorstCase, &self.scenarios.worst_case),
        }
    }

    fn fit(&self, lines: &HistoricalLines) -> (ForecastMethod, Basis) {
        let seeded = (
            HoltWinters::seed(&lines.revenue, &self.smoothing),
            HoltWinters::seed(&lines.cogs, &self.smoothing),
            HoltWinters::seed(&lines.operating_expenses, &self.smoothing),
        );
        if let (Some(revenue), Some(cogs), Some(operating_expenses)) = seeded {
            let basis = SeasonalBasis {
                revenue,
                cogs,
                operating_expenses,
                asset_growth: trailing_monthly_growth(&lines.total_assets),
                liability_growth: trailing_monthly_growth(&lines.total_liabilities),
                last_assets: last_value(&lines.total_assets),
                last_liabilities: last_value(&lines.total_liabilities),
            };
            return (ForecastMethod::HoltWinters, Basis::Seasonal(basis));
        }

        let compound = |values: &[f64]| (compound_monthly_growth(values), last_value(values));
        let basis = CompoundBasis {
            revenue: compound(&lines.revenue),
            cogs: compound(&lines.cogs),
            operating_expenses: compound(&lines.operating_expenses),
            total_assets: compound(&lines.total_assets),
            total_liabilities: compound(&lines.total_liabilities),
        };
        (ForecastMethod::CompoundGrowth, Basis::Compound(basis))
    }
}

fn project(basis: &Basis, m: &ScenarioMultipliers) -> ProjectedLines {
    let horizon = FORECAST_HORIZON;
    match basis {
        Basis::Seasonal(b) => ProjectedLines {
            revenue: b.revenue.project(horizon, m.revenue_trend),
            cogs: b.cogs.project(horizon, m.cost_trend),
            operating_expenses: b.operating_expenses.project(horizon, m.cost_trend),
            total_assets: project_compound(b.last_assets, b.asset_growth * m.asset_growth, horizon),
            total_liabilities: project_compound(
                b.last_liabilities,
                b.liability_growth * m.liability_growth,
                horizon,
            ),
        },
        Basis::Compound(b) => {
            let banded = |(rate, last): (f64, f64), band: f64| -> Vec<f64> {
                project_compound(last, rate, horizon)
                    .into_iter()
                    .map(|v| v * band)
                    .collect()
            };
            let (asset_rate, last_assets) = b.total_assets;
            let (liability_rate, last_liabilities) = b.total_liabilities;
            ProjectedLines {
                revenue: banded(b.revenue, m.revenue_band),
                cogs: banded(b.cogs, m.cost_band),
                operating_expenses: banded(b.operating_expenses, m.cost_band),
                total_assets: project_compound(last_assets, asset_rate * m.asset_growth, horizon),
                total_liabilities: project_compound(
                    last_liabilities,
                    liability_rate * m.liability_growth,
                    horizon,
                ),
            }
        }
    }
}

fn assemble(kind: ScenarioKind, months: &[NaiveDate], lines: ProjectedLines) -> ForecastScenario {
    let points = months
        .iter()
        .enumerate()
        .map(|(h, date)| {
            let revenue = lines.revenue[h];
            let cogs = lines.cogs[h];
            let operating_expenses = lines.operating_expenses[h];
            let expense = cogs + operating_expenses;
            let total_assets = lines.total_assets[h];
            let total_liabilities = lines.total_liabilities[h];
            ForecastPoint {
                label: date.format("%b %Y").to_string(),
                date: *date,
                revenue,
                cogs,
                operating_expenses,
                expense,
                net_income: revenue - expense,
                total_assets,
                total_liabilities,
                total_equity: total_assets - total_liabilities,
            }
        })
        .collect();
    ForecastScenario { kind, points }
}

/// The first day of each of the `horizon` months after `last`.
fn future_months(last: &MonthlyFinancialRecord, horizon: usize) -> Vec<NaiveDate> {
    let key = last.month_key();
    (1..=horizon as i32)
        .filter_map(|h| key.offset(h).first_day())
        .collect()
}

fn last_value(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(0.0)
}
