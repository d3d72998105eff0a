use core_types::math::finite_or_zero;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declares `FinancialRatios` together with its name table so the struct,
/// the name → value mapping and the sanitizing pass cannot drift apart.
macro_rules! ratio_set {
    ($( $(#[$doc:meta])* $field:ident => $name:literal, )*) => {
        /// Every ratio derived for one month.
        ///
        /// A ratio whose denominator is zero, or whose required history is
        /// absent, is `0.0`.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct FinancialRatios {
            $( $(#[$doc])* pub $field: f64, )*
        }

        impl FinancialRatios {
            /// Ratio names in display order.
            pub const NAMES: &'static [&'static str] = &[$($name),*];

            /// `(name, value)` pairs in display order.
            pub fn as_pairs(&self) -> Vec<(&'static str, f64)> {
                vec![$(($name, self.$field)),*]
            }

            /// Looks a ratio up by its name.
            pub fn get(&self, name: &str) -> Option<f64> {
                match name {
                    $($name => Some(self.$field),)*
                    _ => None,
                }
            }

            /// Replaces any non-finite value with `0.0`.
            pub(crate) fn into_finite(self) -> Self {
                Self { $($field: finite_or_zero(self.$field),)* }
            }
        }
    };
}

ratio_set! {
    // Liquidity
    current_ratio => "currentRatio",
    quick_ratio => "quickRatio",
    // Activity
    inventory_turnover => "inventoryTurnover",
    days_inventory => "daysInventory",
    receivables_turnover => "receivablesTurnover",
    days_receivables => "daysReceivables",
    payables_turnover => "payablesTurnover",
    days_payables => "daysPayables",
    sales_to_working_capital => "salesToWorkingCapital",
    // Coverage
    interest_coverage => "interestCoverage",
    debt_service_coverage => "debtServiceCoverage",
    // Leverage
    debt_to_net_worth => "debtToNetWorth",
    leverage => "leverage",
    fixed_assets_to_net_worth => "fixedAssetsToNetWorth",
    // Operating
    /// Annualized current-month revenue over average total assets.
    total_asset_turnover => "totalAssetTurnover",
    /// Percent.
    return_on_equity => "returnOnEquity",
    /// Percent.
    return_on_assets => "returnOnAssets",
    /// Percent of current-month revenue.
    ebit_margin => "ebitMargin",
    /// Percent of current-month revenue.
    ebitda_margin => "ebitdaMargin",
    /// Percent of current-month revenue.
    gross_margin => "grossMargin",
    /// Percent of current-month revenue.
    net_profit_margin => "netProfitMargin",
}

impl FinancialRatios {
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        self.as_pairs().into_iter().collect()
    }
}

/// Trailing-twelve-month totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LtmSummary {
    /// How many of the twelve calendar months were present.
    pub months: usize,
    pub revenue: f64,
    pub cogs: f64,
    pub operating_expenses: f64,
    pub ebitda: f64,
    pub ebit: f64,
    /// Interest under the configured basis (proxy or reported).
    pub interest: f64,
    pub net_profit: f64,
}
