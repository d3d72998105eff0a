use crate::growth::GrowthInputs;
use crate::summary::{HealthRating, ScoreSummary};
use crate::tiers::{Adjustment, Tier, TierTable};
use core_types::FinancialSeries;
use core_types::math::clamp_score;

pub const SCORE_FLOOR: f64 = 10.0;
pub const SCORE_CEILING: f64 = 100.0;

// Stage A: base revenue growth score by 24-month revenue growth.
const BASE_RGS_TIERS: &[Tier<f64>] = &[
    Tier::at_least(25.0, 100.0),
    Tier::at_least(15.0, 80.0),
    Tier::at_least(5.0, 60.0),
    Tier::at_least(0.0, 50.0),
    Tier::at_least(-5.0, 40.0),
    Tier::at_least(-15.0, 20.0),
    Tier::otherwise(10.0),
];

// Stage B: momentum adjustment by 6-month revenue growth.
const RGS_MOMENTUM_TIERS: &[Tier<Adjustment>] = &[
    Tier::at_least(25.0, Adjustment::Add(50.0)),
    Tier::at_least(15.0, Adjustment::TowardCeiling(0.8)),
    Tier::at_least(5.0, Adjustment::TowardCeiling(0.6)),
    Tier::at_least(0.0, Adjustment::TowardCeiling(0.4)),
    Tier::at_least(-5.0, Adjustment::Scale(0.9)),
    Tier::at_least(-15.0, Adjustment::Scale(0.7)),
    Tier::at_least(-25.0, Adjustment::Scale(0.5)),
    Tier::otherwise(Adjustment::Scale(0.3)),
];

// Stage C: expense discipline by revenue growth less expense growth.
const EXPENSE_DISCIPLINE_TIERS: &[Tier<f64>] = &[
    Tier::above(10.0, 30.0),
    Tier::at_least(0.0, 10.0),
    Tier::at_least(-5.0, -10.0),
    Tier::otherwise(-30.0),
];

// Asset development base by current assets over current liabilities.
const ADS_BASE_TIERS: &[Tier<f64>] = &[
    Tier::at_least(1.5, 100.0),
    Tier::at_least(1.2, 90.0),
    Tier::at_least(0.8, 70.0),
    Tier::at_least(0.6, 50.0),
    Tier::at_least(0.4, 30.0),
    Tier::otherwise(10.0),
];

// Asset development adjustment by the 12-month change of that ratio.
const ADS_GROWTH_TIERS: &[Tier<f64>] = &[
    Tier::at_least(50.0, 20.0),
    Tier::at_least(30.0, 15.0),
    Tier::at_least(15.0, 10.0),
    Tier::at_least(5.0, 5.0),
    Tier::at_least(-5.0, 0.0),
    Tier::at_least(-15.0, -5.0),
    Tier::at_least(-30.0, -10.0),
    Tier::at_least(-50.0, -15.0),
    Tier::otherwise(-20.0),
];

/// The five tier tables the score is built from.
#[derive(Debug, Clone, Copy)]
pub struct ScoreTables {
    pub base_rgs: TierTable<f64>,
    pub rgs_momentum: TierTable<Adjustment>,
    pub expense_discipline: TierTable<f64>,
    pub ads_base: TierTable<f64>,
    pub ads_growth: TierTable<f64>,
}

impl ScoreTables {
    pub const STANDARD: Self = Self {
        base_rgs: TierTable::new(BASE_RGS_TIERS),
        rgs_momentum: TierTable::new(RGS_MOMENTUM_TIERS),
        expense_discipline: TierTable::new(EXPENSE_DISCIPLINE_TIERS),
        ads_base: TierTable::new(ADS_BASE_TIERS),
        ads_growth: TierTable::new(ADS_GROWTH_TIERS),
    };
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A stateless, rule-based scorer.
///
/// The same tables serve the latest-month summary and every point of the
/// trend series.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine {
    tables: ScoreTables,
}

impl ScoreEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage A.
    pub fn base_rgs(&self, growth_24: f64) -> f64 {
        *self.tables.base_rgs.select(growth_24)
    }

    /// Stage B, clamped to `[10, 100]`.
    pub fn adjusted_rgs(&self, base: f64, growth_6: f64) -> f64 {
        let adjustment = *self.tables.rgs_momentum.select(growth_6);
        clamp_score(adjustment.apply(base, SCORE_CEILING), SCORE_FLOOR, SCORE_CEILING)
    }

    /// Stage C.
    pub fn expense_adjustment(&self, spread: f64) -> f64 {
        *self.tables.expense_discipline.select(spread)
    }

    /// Returns `(base, adjustment, score)`.
    pub fn asset_development(&self, ratio: f64, growth: f64) -> (f64, f64, f64) {
        let base = *self.tables.ads_base.select(ratio);
        let adjustment = *self.tables.ads_growth.select(growth);
        let score = clamp_score(base + adjustment, SCORE_FLOOR, SCORE_CEILING);
        (base, adjustment, score)
    }

    /// Scores a set of growth inputs.
    pub fn score(&self, inputs: &GrowthInputs) -> ScoreSummary {
        let base_rgs = self.base_rgs(inputs.revenue_growth_24);
        let adjusted_rgs = self.adjusted_rgs(base_rgs, inputs.revenue_growth_6);
        let expense_adjustment = self.expense_adjustment(inputs.expense_spread());
        let profitability_score =
            clamp_score(adjusted_rgs + expense_adjustment, SCORE_FLOOR, SCORE_CEILING);

        let (base_ads, ads_adjustment, asset_development_score) = self.asset_development(
            inputs.asset_liability_ratio,
            inputs.asset_liability_growth,
        );

        let financial_score = (profitability_score + asset_development_score) / 2.0;

        tracing::debug!(
            base_rgs,
            adjusted_rgs,
            expense_adjustment,
            profitability_score,
            asset_development_score,
            financial_score,
            "Scored growth inputs."
        );

        ScoreSummary {
            financial_score,
            profitability_score,
            asset_development_score,
            base_rgs,
            adjusted_rgs,
            expense_adjustment,
            base_ads,
            ads_adjustment,
            growth_24mo: inputs.revenue_growth_24,
            growth_6mo: inputs.revenue_growth_6,
            expense_growth_24mo: inputs.expense_growth_24,
            asset_liability_ratio: inputs.asset_liability_ratio,
            asset_liability_growth: inputs.asset_liability_growth,
            rating: HealthRating::from_score(financial_score),
        }
    }

    /// Scores the month at position `i`.
    pub fn score_at(&self, series: &FinancialSeries, i: usize) -> ScoreSummary {
        self.score(&GrowthInputs::at(series, i))
    }

    /// Scores the most recent month. An empty series scores as all-zero inputs.
    pub fn latest(&self, series: &FinancialSeries) -> ScoreSummary {
        match series.len() {
            0 => self.score(&GrowthInputs::default()),
            n => self.score_at(series, n - 1),
        }
    }
}
