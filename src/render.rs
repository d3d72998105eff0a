//! Terminal tables for the CLI.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use forecast::ForecastScenario;
use ratios::FinancialRatios;
use scoring::ScoreSummary;
use trend::TrendSeries;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn number(value: f64) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

fn money(value: f64) -> Cell {
    Cell::new(format!("{value:.0}")).set_alignment(CellAlignment::Right)
}

pub fn score_table(score: &ScoreSummary) -> Table {
    let mut table = new_table(vec!["Score", "Value"]);
    let rows = [
        ("Financial Score", score.financial_score),
        ("Profitability Score", score.profitability_score),
        ("Asset Development Score", score.asset_development_score),
        ("Base RGS", score.base_rgs),
        ("Adjusted RGS", score.adjusted_rgs),
        ("Expense adjustment", score.expense_adjustment),
        ("Base ADS", score.base_ads),
        ("ADS adjustment", score.ads_adjustment),
        ("Revenue growth, 24 mo (%)", score.growth_24mo),
        ("Revenue growth, 6 mo (%)", score.growth_6mo),
        ("Expense growth, 24 mo (%)", score.expense_growth_24mo),
        ("Asset/liability ratio", score.asset_liability_ratio),
        ("Asset/liability growth (%)", score.asset_liability_growth),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), number(value)]);
    }
    table.add_row(vec![Cell::new("Rating"), Cell::new(score.rating.as_str())]);
    table
}

pub fn ratio_table(ratios: &FinancialRatios) -> Table {
    let mut table = new_table(vec!["Ratio", "Value"]);
    for (name, value) in ratios.as_pairs() {
        table.add_row(vec![Cell::new(name), number(value)]);
    }
    table
}

pub fn trend_table(trend: &TrendSeries) -> Table {
    let mut table = new_table(vec![
        "Month",
        "Financial",
        "Profitability",
        "Asset Dev.",
        "Current",
        "Quick",
        "Leverage",
        "Net Margin",
    ]);
    for point in trend {
        table.add_row(vec![
            Cell::new(&point.label),
            number(point.score.financial_score),
            number(point.score.profitability_score),
            number(point.score.asset_development_score),
            number(point.ratios.current_ratio),
            number(point.ratios.quick_ratio),
            number(point.ratios.leverage),
            number(point.ratios.net_profit_margin),
        ]);
    }
    table
}

pub fn forecast_table(scenario: &ForecastScenario) -> Table {
    let mut table = new_table(vec![
        "Month",
        "Revenue",
        "Expense",
        "Net Income",
        "Assets",
        "Liabilities",
        "Equity",
    ]);
    for p in &scenario.points {
        table.add_row(vec![
            Cell::new(&p.label),
            money(p.revenue),
            money(p.expense),
            money(p.net_income),
            money(p.total_assets),
            money(p.total_liabilities),
            money(p.total_equity),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total net income"),
        Cell::new(""),
        Cell::new(""),
        money(scenario.total_net_income()),
    ]);
    table
}
