//! End-to-end pipeline integration: mock fetch -> indicator enrichment ->
//! strategy evaluation -> model bake-off.

use siglab_core::data::provider::Period;
use siglab_core::data::fetch;
use siglab_core::domain::{Bar, Series, SignalStrength};
use siglab_core::indicators::engine::{self, col};
use siglab_core::logging::RunLog;
use siglab_core::ml::{self, MlError, ModelKind};
use siglab_core::strategy::{self, StrategyConfig};

#[test]
fn full_pipeline_on_mock_data() {
    let log = RunLog::new();

    let raw = fetch("RELIANCE.NS", Period::SixMonths, "1d", true, &log).unwrap();
    assert_eq!(raw.len(), 130);

    let enriched = engine::enrich(raw, &log).unwrap();
    // Longest warm-up is the 50-bar SMA: 49 rows dropped.
    assert_eq!(enriched.len(), 130 - 49);
    assert_eq!(enriched.column_count(), 27);
    for name in enriched.column_names() {
        assert!(enriched.column(name).unwrap().iter().all(|v| v.is_finite()));
    }

    let signals = strategy::evaluate(&enriched, &StrategyConfig::default(), &log);
    // The rule conjunction is strict; any signals that do fire must be
    // properly formed and dated within the series.
    let first = enriched.bars().first().unwrap().date;
    let last = enriched.bars().last().unwrap().date;
    for row in &signals.rows {
        assert!(row.date >= first && row.date <= last);
        assert!(row.close > 0.0);
        assert!(matches!(
            row.strength,
            SignalStrength::Buy | SignalStrength::StrongBuy
        ));
    }
    assert!(signals.strong_count() <= signals.len());

    let report = ml::train(&enriched, &log).unwrap();
    assert_eq!(report.features_used.len(), 21);
    assert!(report.accuracy >= 0.0 && report.accuracy <= 1.0);
    // 81 enriched rows minus the unlabeled final row.
    assert_eq!(report.train_rows + report.test_rows, 80);
    match report.model {
        ModelKind::DecisionTree => assert!(report.feature_importance.len() <= 10),
        ModelKind::LogisticRegression => assert!(report.feature_importance.is_empty()),
    }
}

#[test]
fn pipeline_is_deterministic_end_to_end() {
    let run = || {
        let log = RunLog::new();
        let raw = fetch("TCS.NS", Period::SixMonths, "1d", true, &log).unwrap();
        let enriched = engine::enrich(raw, &log).unwrap();
        let signals = strategy::evaluate(&enriched, &StrategyConfig::default(), &log);
        let report = ml::train(&enriched, &log).unwrap();
        (signals.len(), report.model, report.accuracy)
    };
    assert_eq!(run(), run());
}

#[test]
fn short_period_still_trains() {
    let log = RunLog::new();
    let raw = fetch("INFY.NS", Period::ThreeMonths, "1d", true, &log).unwrap();
    let enriched = engine::enrich(raw, &log).unwrap();
    // 65 bars leave 16 enriched rows and 15 labeled rows: below the
    // 20-row training floor.
    assert_eq!(enriched.len(), 65 - 49);
    assert!(matches!(
        ml::train(&enriched, &log),
        Err(MlError::NotEnoughRows { .. })
    ));
}

#[test]
fn training_aborts_below_the_feature_floor() {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars: Vec<Bar> = (0..60)
        .map(|i| {
            let c = 100.0 + (i % 3) as f64;
            Bar {
                date: base + chrono::Duration::days(i),
                open: c,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 1000,
            }
        })
        .collect();
    let mut series = Series::new("SPARSE", bars);
    for name in [col::RSI_14, col::MACD, col::STOCH_K, col::ATR_14] {
        series.insert_column(name, vec![1.0; 60]);
    }

    let log = RunLog::new();
    match ml::train(&series, &log) {
        Err(MlError::InsufficientFeatures { available }) => assert_eq!(available, 4),
        other => panic!("expected InsufficientFeatures, got {other:?}"),
    }
    assert!(log
        .records()
        .iter()
        .any(|r| r.message.contains("insufficient features")));
}
