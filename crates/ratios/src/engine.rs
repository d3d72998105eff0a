use crate::report::{FinancialRatios, LtmSummary};
use configuration::{InterestBasis, RatioPolicy};
use core_types::math::{average, safe_div};
use core_types::{FinancialSeries, MONTHS_PER_YEAR, MonthlyFinancialRecord};

/// A stateless calculator for the standard liquidity, activity, coverage,
/// leverage and profitability ratios of one month.
#[derive(Debug, Clone, Default)]
pub struct RatioEngine {
    policy: RatioPolicy,
}

impl RatioEngine {
    pub fn new(policy: RatioPolicy) -> Self {
        Self { policy }
    }

    /// Trailing-twelve-month totals ending at position `i`.
    pub fn ltm(&self, series: &FinancialSeries, i: usize) -> LtmSummary {
        let Some(end) = series.key_at(i) else {
            return LtmSummary::default();
        };

        let mut ltm = LtmSummary::default();
        let mut reported_interest = 0.0;
        for record in series.window_ending(end, MONTHS_PER_YEAR) {
            ltm.months += 1;
            ltm.revenue += record.revenue();
            ltm.cogs += record.total_cogs();
            ltm.operating_expenses += record.total_operating_expenses();
            ltm.ebitda += record.ebitda();
            ltm.ebit += record.ebit();
            ltm.net_profit += record.net_profit();
            reported_interest += record.income.interest_expense;
        }

        ltm.interest = match self.policy.interest_basis {
            InterestBasis::LtmOpexProxy => self.policy.interest_proxy_rate * ltm.operating_expenses,
            InterestBasis::Reported => reported_interest,
        };
        ltm
    }

    /// Computes every ratio for the month at position `i`.
    ///
    /// Comparisons against "last month" and "a year ago" resolve by calendar
    /// month; when that month is not in the series the dependent ratios are 0.
    pub fn calculate(&self, series: &FinancialSeries, i: usize) -> FinancialRatios {
        let Some(current) = series.get(i) else {
            return FinancialRatios::default();
        };
        let prior_month = series.months_before(i, 1);
        let prior_year = series.months_before(i, MONTHS_PER_YEAR as u32);
        let ltm = self.ltm(series, i);

        let ratios = self.liquidity(current);
        let ratios = self.activity(ratios, current, prior_month, prior_year, &ltm);
        let ratios = self.coverage(ratios, current, &ltm);
        let ratios = self.leverage(ratios, current);
        let ratios = self.operating(ratios, current, prior_month);

        tracing::debug!(
            month = %current.label,
            current_ratio = ratios.current_ratio,
            interest_coverage = ratios.interest_coverage,
            ltm_months = ltm.months,
            "Calculated ratios."
        );

        ratios.into_finite()
    }

    fn liquidity(&self, current: &MonthlyFinancialRecord) -> FinancialRatios {
        let b = &current.balance;
        let current_liabilities = b.total_current_liabilities.abs();
        FinancialRatios {
            current_ratio: safe_div(b.total_current_assets, current_liabilities),
            quick_ratio: safe_div(b.cash + b.accounts_receivable, current_liabilities),
            ..Default::default()
        }
    }

    /// Turnover ratios average this month's balance with the same month a year
    /// earlier; sales to working capital averages with last month.
    fn activity(
        &self,
        ratios: FinancialRatios,
        current: &MonthlyFinancialRecord,
        prior_month: Option<&MonthlyFinancialRecord>,
        prior_year: Option<&MonthlyFinancialRecord>,
        ltm: &LtmSummary,
    ) -> FinancialRatios {
        let b = &current.balance;
        let days = self.policy.days_in_year;

        let (inventory_turnover, receivables_turnover, payables_turnover) = match prior_year {
            Some(p) => (
                safe_div(ltm.cogs, average(b.inventory, p.balance.inventory)),
                safe_div(ltm.revenue, average(b.accounts_receivable, p.balance.accounts_receivable)),
                safe_div(ltm.cogs, average(b.accounts_payable, p.balance.accounts_payable)),
            ),
            None => (0.0, 0.0, 0.0),
        };

        let sales_to_working_capital = prior_month.map_or(0.0, |p| {
            safe_div(
                current.revenue(),
                average(current.working_capital(), p.working_capital()),
            )
        });

        FinancialRatios {
            inventory_turnover,
            days_inventory: safe_div(days, inventory_turnover),
            receivables_turnover,
            days_receivables: safe_div(days, receivables_turnover),
            payables_turnover,
            days_payables: safe_div(days, payables_turnover),
            sales_to_working_capital,
            ..ratios
        }
    }

    fn coverage(
        &self,
        ratios: FinancialRatios,
        current: &MonthlyFinancialRecord,
        ltm: &LtmSummary,
    ) -> FinancialRatios {
        let principal_due = self.policy.debt_service_principal_rate * current.balance.long_term_debt;
        FinancialRatios {
            interest_coverage: safe_div(ltm.ebit, ltm.interest),
            debt_service_coverage: safe_div(ltm.ebit, principal_due + ltm.interest),
            ..ratios
        }
    }

    fn leverage(&self, ratios: FinancialRatios, current: &MonthlyFinancialRecord) -> FinancialRatios {
        let b = &current.balance;
        FinancialRatios {
            debt_to_net_worth: safe_div(b.total_liabilities, b.total_equity),
            leverage: safe_div(b.total_assets, b.total_equity),
            fixed_assets_to_net_worth: safe_div(b.fixed_assets, b.total_equity),
            ..ratios
        }
    }

    /// Return and turnover figures annualize the current month (x12) against
    /// the average of this and last month's balance; margins are current-month.
    fn operating(
        &self,
        ratios: FinancialRatios,
        current: &MonthlyFinancialRecord,
        prior_month: Option<&MonthlyFinancialRecord>,
    ) -> FinancialRatios {
        let annual_revenue = current.revenue() * MONTHS_PER_YEAR as f64;
        let annual_profit = current.net_profit() * MONTHS_PER_YEAR as f64;
        let b = &current.balance;

        let (total_asset_turnover, return_on_equity, return_on_assets) = match prior_month {
            Some(p) => {
                let avg_assets = average(b.total_assets, p.balance.total_assets);
                let avg_equity = average(b.total_equity, p.balance.total_equity);
                (
                    safe_div(annual_revenue, avg_assets),
                    safe_div(annual_profit, avg_equity) * 100.0,
                    safe_div(annual_profit, avg_assets) * 100.0,
                )
            }
            None => (0.0, 0.0, 0.0),
        };

        let revenue = current.revenue();
        FinancialRatios {
            total_asset_turnover,
            return_on_equity,
            return_on_assets,
            ebit_margin: safe_div(current.ebit(), revenue) * 100.0,
            ebitda_margin: safe_div(current.ebitda(), revenue) * 100.0,
            gross_margin: safe_div(current.gross_profit(), revenue) * 100.0,
            net_profit_margin: safe_div(current.net_profit(), revenue) * 100.0,
            ..ratios
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core_types::fixtures::{fill_balance, fill_income, flat_series, monthly_records, record};

    fn engine() -> RatioEngine {
        RatioEngine::default()
    }

    #[test]
    fn test_liquidity_ratios() {
        let series = FinancialSeries::new(&flat_series(1, 1000.0));
        let ratios = engine().calculate(&series, 0);

        assert_relative_eq!(ratios.current_ratio, 1.0);
        assert_relative_eq!(ratios.quick_ratio, 0.7);
    }

    #[test]
    fn test_current_ratio_uses_absolute_liabilities() {
        let mut r = record(2024, 1);
        r.balance.total_current_assets = 500.0;
        r.balance.total_current_liabilities = -250.0;
        let series = FinancialSeries::new(&[r]);

        assert_relative_eq!(engine().calculate(&series, 0).current_ratio, 2.0);
    }

    #[test]
    fn test_turnover_needs_year_ago_balance() {
        let series = FinancialSeries::new(&flat_series(13, 1000.0));
        let e = engine();

        let early = e.calculate(&series, 11);
        assert_eq!(early.inventory_turnover, 0.0);
        assert_eq!(early.days_inventory, 0.0);

        // LTM COGS = 12 * 400, average inventory = 200.
        let ratios = e.calculate(&series, 12);
        assert_relative_eq!(ratios.inventory_turnover, 24.0);
        assert_relative_eq!(ratios.days_inventory, 365.0 / 24.0);
        // LTM revenue = 12000, average AR = 300.
        assert_relative_eq!(ratios.receivables_turnover, 40.0);
        // LTM COGS / average AP = 4800 / 500.
        assert_relative_eq!(ratios.payables_turnover, 9.6);
        assert_relative_eq!(ratios.days_payables, 365.0 / 9.6);
    }

    #[test]
    fn test_coverage_uses_opex_proxy_by_default() {
        let series = FinancialSeries::new(&flat_series(12, 1000.0));
        let ltm = engine().ltm(&series, 11);
        let ratios = engine().calculate(&series, 11);

        // EBIT 300/month, opex 300/month -> proxy interest 5% of 3600 = 180.
        assert_relative_eq!(ltm.ebit, 3600.0);
        assert_relative_eq!(ltm.interest, 180.0);
        assert_relative_eq!(ratios.interest_coverage, 20.0);
        // 10% of 500 long-term debt = 50.
        assert_relative_eq!(ratios.debt_service_coverage, 3600.0 / 230.0);
    }

    #[test]
    fn test_coverage_with_reported_interest() {
        let records = monthly_records(12, |_, r| {
            fill_income(r, 1000.0);
            fill_balance(r);
            r.income.interest_expense = 10.0;
        });
        let series = FinancialSeries::new(&records);
        let engine = RatioEngine::new(RatioPolicy {
            interest_basis: InterestBasis::Reported,
            ..Default::default()
        });

        let ratios = engine.calculate(&series, 11);
        assert_relative_eq!(ratios.interest_coverage, 3600.0 / 120.0);
    }

    #[test]
    fn test_leverage_ratios() {
        let series = FinancialSeries::new(&flat_series(1, 1000.0));
        let ratios = engine().calculate(&series, 0);

        assert_relative_eq!(ratios.debt_to_net_worth, 3.0);
        assert_relative_eq!(ratios.leverage, 4.0);
        assert_relative_eq!(ratios.fixed_assets_to_net_worth, 2.0);
    }

    #[test]
    fn test_operating_ratios_annualize_current_month() {
        let series = FinancialSeries::new(&flat_series(2, 1000.0));
        let e = engine();

        let first = e.calculate(&series, 0);
        assert_eq!(first.total_asset_turnover, 0.0);
        assert_eq!(first.return_on_equity, 0.0);
        assert_eq!(first.sales_to_working_capital, 0.0);

        let ratios = e.calculate(&series, 1);
        // 12 * 1000 / 2000
        assert_relative_eq!(ratios.total_asset_turnover, 6.0);
        // 12 * 300 / 500 * 100
        assert_relative_eq!(ratios.return_on_equity, 720.0);
        // 12 * 300 / 2000 * 100
        assert_relative_eq!(ratios.return_on_assets, 180.0);
        assert_relative_eq!(ratios.ebitda_margin, 30.0);
        assert_relative_eq!(ratios.ebit_margin, 30.0);
        assert_relative_eq!(ratios.gross_margin, 60.0);
        assert_relative_eq!(ratios.net_profit_margin, 30.0);
        // Working capital is 0 in the fixture.
        assert_eq!(ratios.sales_to_working_capital, 0.0);
    }

    #[test]
    fn test_all_zero_record_yields_all_zero_ratios() {
        let series = FinancialSeries::new(&[record(2024, 1), record(2024, 2)]);
        let ratios = engine().calculate(&series, 1);
        assert!(ratios.as_pairs().iter().all(|&(_, v)| v == 0.0));
    }

    #[test]
    fn test_ratios_are_finite_for_hostile_inputs() {
        let records = monthly_records(26, |i, r| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            r.income.revenue = sign * 1e300;
            r.income.cogs.materials = -1e300;
            r.income.net_profit = 1e300;
            r.balance.total_equity = if i % 3 == 0 { 0.0 } else { sign * 1e-300 };
            r.balance.total_assets = -r.balance.total_equity;
            r.balance.inventory = sign;
            r.balance.total_current_liabilities = if i % 5 == 0 { 0.0 } else { -1.0 };
            r.balance.total_current_assets = f64::NAN;
        });
        let series = FinancialSeries::new(&records);
        let e = engine();

        for i in 0..series.len() {
            for (name, value) in e.calculate(&series, i).as_pairs() {
                assert!(value.is_finite(), "{name} at {i} was {value}");
            }
        }
    }

    #[test]
    fn test_missing_month_zeroes_dependent_ratios() {
        // Twelve months with the year-ago month removed.
        let mut records = flat_series(13, 1000.0);
        records.remove(0);
        let series = FinancialSeries::new(&records);

        let ratios = engine().calculate(&series, 11);
        assert_eq!(ratios.inventory_turnover, 0.0);
        assert_relative_eq!(ratios.current_ratio, 1.0);
    }

    #[test]
    fn test_out_of_range_index() {
        let series = FinancialSeries::new(&flat_series(3, 1000.0));
        assert_eq!(engine().calculate(&series, 3), FinancialRatios::default());
        assert_eq!(engine().ltm(&series, 3), LtmSummary::default());
    }
}
