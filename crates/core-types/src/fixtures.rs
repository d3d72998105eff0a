//! Synthetic monthly series for tests across the workspace.
//!
//! Enabled inside this crate's own tests and, for downstream crates, through
//! the `fixtures` feature in their `[dev-dependencies]`.

use crate::record::{MonthKey, MonthlyFinancialRecord};

/// The first month of every generated series.
pub const FIXTURE_START: MonthKey = MonthKey {
    year: 2022,
    month: 1,
};

/// An empty record dated the first of the given month.
pub fn record(year: i32, month: u32) -> MonthlyFinancialRecord {
    let key = MonthKey::new(year, month);
    let date = key.first_day().expect("fixture month is valid");
    MonthlyFinancialRecord::new(date.format("%b %Y").to_string(), date)
}

/// Builds `months` consecutive records from `FIXTURE_START`, letting `fill`
/// populate each one from its position.
pub fn monthly_records<F>(months: usize, mut fill: F) -> Vec<MonthlyFinancialRecord>
where
    F: FnMut(usize, &mut MonthlyFinancialRecord),
{
    (0..months)
        .map(|i| {
            let key = FIXTURE_START.offset(i as i32);
            let mut r = record(key.year, key.month);
            fill(i, &mut r);
            r
        })
        .collect()
}

/// Fills the income statement from revenue: COGS 40%, opex 30% and
/// net profit 30% of revenue.
pub fn fill_income(r: &mut MonthlyFinancialRecord, revenue: f64) {
    r.income.revenue = revenue;
    r.income.cogs.materials = revenue * 0.4;
    r.income.operating_expenses.rent = revenue * 0.3;
    r.income.net_profit = revenue * 0.3;
}

/// A steady balance sheet with a current ratio of exactly 1.0.
pub fn fill_balance(r: &mut MonthlyFinancialRecord) {
    let b = &mut r.balance;
    b.cash = 400.0;
    b.accounts_receivable = 300.0;
    b.inventory = 200.0;
    b.other_current_assets = 100.0;
    b.total_current_assets = 1000.0;
    b.fixed_assets = 1000.0;
    b.total_assets = 2000.0;
    b.accounts_payable = 500.0;
    b.other_current_liabilities = 500.0;
    b.total_current_liabilities = 1000.0;
    b.long_term_debt = 500.0;
    b.total_liabilities = 1500.0;
    b.owner_capital = 300.0;
    b.retained_earnings = 200.0;
    b.total_equity = 500.0;
}

/// Flat revenue and expenses with a steady balance sheet.
pub fn flat_series(months: usize, revenue: f64) -> Vec<MonthlyFinancialRecord> {
    monthly_records(months, |_, r| {
        fill_income(r, revenue);
        fill_balance(r);
    })
}

/// One record per revenue figure, with proportional expenses and a steady
/// balance sheet.
pub fn series_from_revenue(revenues: &[f64]) -> Vec<MonthlyFinancialRecord> {
    monthly_records(revenues.len(), |i, r| {
        fill_income(r, revenues[i]);
        fill_balance(r);
    })
}

/// The same 12-month revenue pattern repeated `cycles` times.
pub fn seasonal_series(pattern: &[f64; 12], cycles: usize) -> Vec<MonthlyFinancialRecord> {
    let revenues: Vec<f64> = pattern.iter().copied().cycle().take(12 * cycles).collect();
    series_from_revenue(&revenues)
}

/// Revenue compounding at `monthly_rate` from `start`.
pub fn growing_series(months: usize, start: f64, monthly_rate: f64) -> Vec<MonthlyFinancialRecord> {
    let revenues: Vec<f64> = (0..months)
        .map(|i| start * (1.0 + monthly_rate).powi(i as i32))
        .collect();
    series_from_revenue(&revenues)
}

/// A retail-like seasonal shape with a December peak.
pub const RETAIL_PATTERN: [f64; 12] = [
    80.0, 75.0, 90.0, 95.0, 100.0, 105.0, 100.0, 98.0, 102.0, 110.0, 130.0, 160.0,
];
