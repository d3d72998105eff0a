use core_types::math::{growth_pct, safe_div};
use core_types::{FinancialSeries, MONTHS_PER_YEAR, MonthlyFinancialRecord};
use serde::{Deserialize, Serialize};

/// Months of history needed before the 24-month growth rate is measured.
pub const LONG_GROWTH_HISTORY: usize = 24;
/// Months of history needed before the 6-month growth rate is measured.
pub const SHORT_GROWTH_HISTORY: usize = 12;

const HALF_YEAR: usize = 6;

/// The growth rates and balance-sheet level the score tiers are evaluated on.
///
/// Rates are percentages (`25.0` is 25%). A rate whose history is too short
/// is `0.0`, which scores as the flat-growth tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthInputs {
    /// LTM revenue against the twelve months before it.
    pub revenue_growth_24: f64,
    /// Last six months of revenue against the six months before them.
    pub revenue_growth_6: f64,
    /// LTM expenses (COGS + opex) against the twelve months before them.
    pub expense_growth_24: f64,
    /// Current assets over current liabilities.
    pub asset_liability_ratio: f64,
    /// Change in that ratio against the same month a year earlier.
    pub asset_liability_growth: f64,
}

impl GrowthInputs {
    /// Derives the inputs for the month at position `i`.
    pub fn at(series: &FinancialSeries, i: usize) -> Self {
        let (Some(current), Some(end)) = (series.get(i), series.key_at(i)) else {
            return Self::default();
        };
        let history = i + 1;

        let period_growth = |months: usize, value: fn(&MonthlyFinancialRecord) -> f64| {
            let recent = series.sum_window(end, months, value);
            let earlier = series.sum_window(end.offset(-(months as i32)), months, value);
            growth_pct(recent, earlier)
        };

        let (revenue_growth_24, expense_growth_24) = if history >= LONG_GROWTH_HISTORY {
            (
                period_growth(MONTHS_PER_YEAR, MonthlyFinancialRecord::revenue),
                period_growth(MONTHS_PER_YEAR, MonthlyFinancialRecord::total_expenses),
            )
        } else {
            (0.0, 0.0)
        };

        let revenue_growth_6 = if history >= SHORT_GROWTH_HISTORY {
            period_growth(HALF_YEAR, MonthlyFinancialRecord::revenue)
        } else {
            0.0
        };

        let asset_liability_ratio = current_asset_cover(current);
        let asset_liability_growth = series
            .months_before(i, MONTHS_PER_YEAR as u32)
            .map_or(0.0, |prior| {
                growth_pct(asset_liability_ratio, current_asset_cover(prior))
            });

        Self {
            revenue_growth_24,
            revenue_growth_6,
            expense_growth_24,
            asset_liability_ratio,
            asset_liability_growth,
        }
    }

    /// Revenue growth less expense growth over the 24-month horizon.
    pub fn expense_spread(&self) -> f64 {
        self.revenue_growth_24 - self.expense_growth_24
    }
}

fn current_asset_cover(record: &MonthlyFinancialRecord) -> f64 {
    safe_div(
        record.balance.total_current_assets,
        record.balance.total_current_liabilities.abs(),
    )
}
