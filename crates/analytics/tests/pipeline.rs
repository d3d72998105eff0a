use analytics::{AnalyticsEngine, SeriesFingerprint};
use approx::assert_relative_eq;
use configuration::{EngineConfig, load_config_from_str};
use core_types::MonthlyFinancialRecord;
use core_types::fixtures::{RETAIL_PATTERN, flat_series, growing_series, seasonal_series};
use forecast::ForecastMethod;
use scoring::HealthRating;

#[test]
fn test_flat_business_end_to_end() {
    let bundle = AnalyticsEngine::default().calculate(&flat_series(25, 1000.0));

    assert_eq!(bundle.months, 25);
    assert_eq!(bundle.trend.len(), 13);
    assert_eq!(bundle.score.financial_score, 75.0);
    assert_eq!(bundle.score.rating, HealthRating::Healthy);
    assert_relative_eq!(bundle.latest_ratios.current_ratio, 1.0);
    assert_relative_eq!(bundle.latest_ratios.interest_coverage, 20.0);
    assert_relative_eq!(bundle.latest_ltm.revenue, 12_000.0);
    assert_eq!(bundle.forecast.method, ForecastMethod::HoltWinters);
}

#[test]
fn test_seasonal_history_forecasts_the_next_cycle() {
    let bundle = AnalyticsEngine::default().calculate(&seasonal_series(&RETAIL_PATTERN, 3));

    let revenue = bundle.forecast.most_likely.revenue();
    assert_eq!(revenue.len(), 12);
    for (projected, expected) in revenue.iter().zip(RETAIL_PATTERN.iter()) {
        assert_relative_eq!(*projected, *expected, max_relative = 1e-9);
    }
}

#[test]
fn test_short_history_degrades_without_failing() {
    let engine = AnalyticsEngine::default();

    let one = engine.calculate(&flat_series(1, 1000.0));
    assert!(one.trend.is_empty());
    assert_eq!(one.forecast.method, ForecastMethod::Insufficient);

    let six = engine.calculate(&growing_series(6, 100.0, 0.1));
    assert!(six.trend.is_empty());
    assert_eq!(six.forecast.method, ForecastMethod::CompoundGrowth);
    assert_eq!(six.score.growth_24mo, 0.0);
}

#[test]
fn test_calculation_is_idempotent() {
    let records = growing_series(30, 100.0, 0.02);
    let engine = AnalyticsEngine::default();
    assert_eq!(engine.calculate(&records), engine.calculate(&records));
}

#[test]
fn test_input_order_and_duplicates_are_normalized() {
    let records = flat_series(14, 1000.0);
    let mut shuffled = records.clone();
    shuffled.reverse();

    let mut duplicated = records.clone();
    let mut stale = records[5].clone();
    stale.income.revenue = 1.0;
    duplicated.insert(5, stale);

    let engine = AnalyticsEngine::default();
    let expected = engine.calculate(&records);
    assert_eq!(engine.calculate(&shuffled), expected);
    assert_eq!(engine.calculate(&duplicated), expected);
}

#[test]
fn test_non_finite_amounts_are_treated_as_zero() {
    let mut records = flat_series(14, 1000.0);
    records[13].balance.inventory = f64::NAN;
    records[13].balance.cash = f64::INFINITY;

    let bundle = AnalyticsEngine::default().calculate(&records);
    let json = serde_json::to_string(&bundle).unwrap();
    assert!(!json.contains("NaN"));
    assert!(bundle.latest_ratios.as_pairs().iter().all(|(_, v)| v.is_finite()));
}

#[test]
fn test_reported_interest_basis_from_config() {
    let config = load_config_from_str("[ratios]\ninterest_basis = \"reported\"\n").unwrap();
    let mut records: Vec<MonthlyFinancialRecord> = flat_series(14, 1000.0);
    for r in &mut records {
        r.income.interest_expense = 60.0;
    }

    let bundle = AnalyticsEngine::new(config).calculate(&records);
    // 3600 LTM EBIT over 720 LTM interest.
    assert_relative_eq!(bundle.latest_ratios.interest_coverage, 5.0);
}

#[test]
fn test_bundle_serializes_in_camel_case() {
    let bundle = AnalyticsEngine::new(EngineConfig::default()).calculate(&flat_series(13, 1000.0));
    let json = serde_json::to_value(&bundle).unwrap();

    assert_eq!(json["months"], 13);
    assert!(json["latestRatios"]["currentRatio"].is_number());
    assert_eq!(json["score"]["financialScore"], 75.0);
    assert!(json["trend"].is_array());
    assert!(json["forecast"]["mostLikely"]["points"].is_array());
    assert!(json["forecast"]["bestCase"].is_object());
}

#[test]
fn test_fingerprint_tracks_recalculation_needs() {
    let records = flat_series(14, 1000.0);
    let before = SeriesFingerprint::of(&records);

    let mut edited = records.clone();
    edited[0].income.revenue = 999.0;
    assert_ne!(SeriesFingerprint::of(&edited), before);
    assert_eq!(SeriesFingerprint::of(&records.clone()), before);
}
