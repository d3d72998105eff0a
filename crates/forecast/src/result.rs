use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which of the three sibling scenarios a projection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioKind {
    BestCase,
    MostLikely,
    WorstCase,
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::BestCase => "Best case",
            ScenarioKind::MostLikely => "Most likely",
            ScenarioKind::WorstCase => "Worst case",
        }
    }
}

/// How the projection was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForecastMethod {
    /// Seasonal triple exponential smoothing (24+ months of history).
    HoltWinters,
    /// First-to-last compound growth (2 to 23 months of history).
    CompoundGrowth,
    /// Fewer than two months; every scenario is empty.
    Insufficient,
}

/// One projected month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub label: String,
    pub date: NaiveDate,
    pub revenue: f64,
    pub cogs: f64,
    pub operating_expenses: f64,
    /// COGS plus operating expenses.
    pub expense: f64,
    pub net_income: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    /// Always `total_assets - total_liabilities`.
    pub total_equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastScenario {
    pub kind: ScenarioKind,
    pub points: Vec<ForecastPoint>,
}

impl ForecastScenario {
    pub fn empty(kind: ScenarioKind) -> Self {
        Self {
            kind,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn revenue(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.revenue).collect()
    }

    /// Projected net income summed over the horizon.
    pub fn total_net_income(&self) -> f64 {
        self.points.iter().map(|p| p.net_income).sum()
    }
}

/// The three scenarios produced by one forecast call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub method: ForecastMethod,
    pub most_likely: ForecastScenario,
    pub best_case: ForecastScenario,
    pub worst_case: ForecastScenario,
}

impl ForecastResult {
    pub fn insufficient() -> Self {
        Self {
            method: ForecastMethod::Insufficient,
            most_likely: ForecastScenario::empty(ScenarioKind::MostLikely),
            best_case: ForecastScenario::empty(ScenarioKind::BestCase),
            worst_case: ForecastScenario::empty(ScenarioKind::WorstCase),
        }
    }

    /// Best, most likely and worst, in display order.
    pub fn scenarios(&self) -> [&ForecastScenario; 3] {
        [&self.best_case, &self.most_likely, &self.worst_case]
    }
}
