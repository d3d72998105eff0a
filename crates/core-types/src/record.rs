use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treats an explicit JSON `null` the same as an absent field.
fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A calendar month, the identity used for every "N months ago" lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month of the year.
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month `delta` months away from this one (negative = earlier).
    pub fn offset(self, delta: i32) -> Self {
        let ordinal = self.year * 12 + self.month as i32 - 1 + delta;
        Self {
            year: ordinal.div_euclid(12),
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// The first day of this month, if it is representable.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Cost of goods sold, broken down the way bookkeeping exports report it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostOfGoodsSold {
    #[serde(deserialize_with = "zero_if_null")]
    pub payroll: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub owner_pay: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub contractors: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub materials: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub commissions: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub other: f64,
}

impl CostOfGoodsSold {
    pub fn total(&self) -> f64 {
        self.amounts().iter().sum()
    }

    fn amounts(&self) -> [f64; 6] {
        [
            self.payroll,
            self.owner_pay,
            self.contractors,
            self.materials,
            self.commissions,
            self.other,
        ]
    }

    fn amounts_mut(&mut self) -> [&mut f64; 6] {
        [
            &mut self.payroll,
            &mut self.owner_pay,
            &mut self.contractors,
            &mut self.materials,
            &mut self.commissions,
            &mut self.other,
        ]
    }
}

/// Operating expenses, excluding depreciation and amortization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingExpenses {
    #[serde(deserialize_with = "zero_if_null")]
    pub payroll: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub owner_pay: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub rent: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub insurance: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub professional_fees: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub utilities: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub marketing: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub office: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub travel: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub other: f64,
}

impl OperatingExpenses {
    pub fn total(&self) -> f64 {
        self.amounts().iter().sum()
    }

    fn amounts(&self) -> [f64; 10] {
        [
            self.payroll,
            self.owner_pay,
            self.rent,
            self.insurance,
            self.professional_fees,
            self.utilities,
            self.marketing,
            self.office,
            self.travel,
            self.other,
        ]
    }

    fn amounts_mut(&mut self) -> [&mut f64; 10] {
        [
            &mut self.payroll,
            &mut self.owner_pay,
            &mut self.rent,
            &mut self.insurance,
            &mut self.professional_fees,
            &mut self.utilities,
            &mut self.marketing,
            &mut self.office,
            &mut self.travel,
            &mut self.other,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncomeStatement {
    #[serde(deserialize_with = "zero_if_null")]
    pub revenue: f64,
    pub cogs: CostOfGoodsSold,
    pub operating_expenses: OperatingExpenses,
    #[serde(deserialize_with = "zero_if_null")]
    pub interest_expense: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub depreciation_amortization: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub non_operating_income: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub extraordinary_items: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub net_profit: f64,
}

impl IncomeStatement {
    fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        [
            self.revenue,
            self.interest_expense,
            self.depreciation_amortization,
            self.non_operating_income,
            self.extraordinary_items,
            self.net_profit,
        ]
        .into_iter()
        .chain(self.cogs.amounts())
        .chain(self.operating_expenses.amounts())
    }

    fn amounts_mut(&mut self) -> impl Iterator<Item = &mut f64> + '_ {
        [
            &mut self.revenue,
            &mut self.interest_expense,
            &mut self.depreciation_amortization,
            &mut self.non_operating_income,
            &mut self.extraordinary_items,
            &mut self.net_profit,
        ]
        .into_iter()
        .chain(self.cogs.amounts_mut())
        .chain(self.operating_expenses.amounts_mut())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BalanceSheet {
    // Assets
    #[serde(deserialize_with = "zero_if_null")]
    pub cash: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub accounts_receivable: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub inventory: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_current_assets: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub total_current_assets: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub fixed_assets: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_assets: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub total_assets: f64,

    // Liabilities
    #[serde(deserialize_with = "zero_if_null")]
    pub accounts_payable: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_current_liabilities: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub total_current_liabilities: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub long_term_debt: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub total_liabilities: f64,

    // Equity
    #[serde(deserialize_with = "zero_if_null")]
    pub owner_capital: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub retained_earnings: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_equity: f64,
    #[serde(deserialize_with = "zero_if_null")]
    pub total_equity: f64,
}

impl BalanceSheet {
    fn amounts(&self) -> [f64; 17] {
        [
            self.cash,
            self.accounts_receivable,
            self.inventory,
            self.other_current_assets,
            self.total_current_assets,
            self.fixed_assets,
            self.other_assets,
            self.total_assets,
            self.accounts_payable,
            self.other_current_liabilities,
            self.total_current_liabilities,
            self.long_term_debt,
            self.total_liabilities,
            self.owner_capital,
            self.retained_earnings,
            self.other_equity,
            self.total_equity,
        ]
    }

    fn amounts_mut(&mut self) -> [&mut f64; 17] {
        [
            &mut self.cash,
            &mut self.accounts_receivable,
            &mut self.inventory,
            &mut self.other_current_assets,
            &mut self.total_current_assets,
            &mut self.fixed_assets,
            &mut self.other_assets,
            &mut self.total_assets,
            &mut self.accounts_payable,
            &mut self.other_current_liabilities,
            &mut self.total_current_liabilities,
            &mut self.long_term_debt,
            &mut self.total_liabilities,
            &mut self.owner_capital,
            &mut self.retained_earnings,
            &mut self.other_equity,
            &mut self.total_equity,
        ]
    }
}

/// One calendar month of a company's income statement and closing balance sheet.
///
/// This is the canonical record supplied by the ingestion layer. Absent and
/// `null` amounts deserialize to `0.0`; non-finite amounts are zeroed when the
/// record enters a `FinancialSeries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFinancialRecord {
    /// Display label, e.g. "Jan 2024".
    pub label: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub income: IncomeStatement,
    #[serde(default)]
    pub balance: BalanceSheet,
}

impl MonthlyFinancialRecord {
    pub fn new(label: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            label: label.into(),
            date,
            income: IncomeStatement::default(),
            balance: BalanceSheet::default(),
        }
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn revenue(&self) -> f64 {
        self.income.revenue
    }

    pub fn total_cogs(&self) -> f64 {
        self.income.cogs.total()
    }

    pub fn total_operating_expenses(&self) -> f64 {
        self.income.operating_expenses.total()
    }

    /// COGS plus operating expenses.
    pub fn total_expenses(&self) -> f64 {
        self.total_cogs() + self.total_operating_expenses()
    }

    pub fn gross_profit(&self) -> f64 {
        self.income.revenue - self.total_cogs()
    }

    /// Revenue less COGS and operating expenses.
    pub fn ebitda(&self) -> f64 {
        self.income.revenue - self.total_expenses()
    }

    pub fn ebit(&self) -> f64 {
        self.ebitda() - self.income.depreciation_amortization
    }

    pub fn net_profit(&self) -> f64 {
        self.income.net_profit
    }

    pub fn working_capital(&self) -> f64 {
        self.balance.total_current_assets - self.balance.total_current_liabilities
    }

    /// Every numeric field, in a fixed order.
    pub fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.income.amounts().chain(self.balance.amounts())
    }

    /// Replaces every non-finite amount with `0.0` and returns how many were replaced.
    pub fn sanitize(&mut self) -> usize {
        let mut replaced = 0;
        for amount in self
            .income
            .amounts_mut()
            .chain(self.balance.amounts_mut())
        {
            if !amount.is_finite() {
                *amount = 0.0;
                replaced += 1;
            }
        }
        replaced
    }
}
