//! Integration tests for the universe batch and report tables.

use cc_stats::config::{AnalysisConfig, DegenerateRangePolicy};
use cc_stats::coverage::CoverageAnalyzer;
use cc_stats::error::CoverageError;
use cc_stats::models::{Observation, TimeSeries};
use cc_stats::stats::{compute_stats_for_universe, InMemorySource, StatColumn};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 9, 9, 0, 0, 0).unwrap()
}

/// Hourly series over `hours` entries, with every `gap_every`-th entry missing.
fn hourly(hours: usize, gap_every: Option<usize>) -> TimeSeries {
    let values = (0..hours).map(|i| match gap_every {
        Some(n) if i % n == n - 1 => None,
        _ => Some(100.0 + i as f64),
    });
    TimeSeries::from_values(t0(), Duration::hours(1), values).unwrap()
}

fn source() -> InMemorySource {
    let irregular = TimeSeries::new(
        [0, 1, 4, 9, 16]
            .iter()
            .map(|&h| Observation::new(t0() + Duration::hours(h), Some(1.0)))
            .collect(),
    )
    .unwrap();

    InMemorySource::new()
        .with_series("binance", "BTC/USDT", hourly(24 * 10 + 1, None))
        .with_series("binance", "ETH/USDT", hourly(24 * 5 + 1, Some(4)))
        .with_series("kucoin", "BTC/USDT", hourly(24 * 3 + 1, Some(10)))
        .with_series("kucoin", "ADA/USDT", irregular)
}

fn universe() -> Vec<(&'static str, &'static str)> {
    vec![
        ("binance", "BTC/USDT"),
        ("binance", "ETH/USDT"),
        ("kucoin", "BTC/USDT"),
        ("kucoin", "ADA/USDT"),
        ("ftx", "SOL/USDT"),
    ]
}

#[test]
fn test_universe_collects_reports_and_failures() {
    let analyzer = CoverageAnalyzer::new(AnalysisConfig::default().with_vendor("CCXT"));
    let stats = compute_stats_for_universe(universe(), &source(), &analyzer);

    assert_eq!(stats.reports.len(), 3);
    assert_eq!(stats.failures.len(), 2);
    assert!(stats
        .reports
        .iter()
        .all(|r| r.label.vendor.as_deref() == Some("CCXT")));

    let failed: Vec<String> = stats.failures.iter().map(|f| f.label.to_string()).collect();
    assert_eq!(failed, vec!["kucoin ADA/USDT", "ftx SOL/USDT"]);
    assert!(matches!(
        stats.failures[0].error,
        CoverageError::IrregularSeries { .. }
    ));
    assert!(matches!(
        stats.failures[1].error,
        CoverageError::SeriesNotFound { .. }
    ));
}

#[test]
fn test_universe_table_sorted_and_rounded() {
    let analyzer = CoverageAnalyzer::default();
    let stats = compute_stats_for_universe(universe(), &source(), &analyzer);

    // Ascending by coverage: ETH (1 in 4 missing), kucoin BTC (1 in 10), binance BTC.
    let order: Vec<String> = stats.reports.iter().map(|r| r.label.to_string()).collect();
    assert_eq!(
        order,
        vec!["binance ETH/USDT", "kucoin BTC/USDT", "binance BTC/USDT"]
    );

    for report in &stats.reports {
        assert_eq!((report.coverage_pct * 100.0).round() / 100.0, report.coverage_pct);
        assert_eq!(
            (report.avg_points_per_day * 100.0).round() / 100.0,
            report.avg_points_per_day
        );
    }

    let full = &stats.reports[2];
    assert_eq!(full.coverage_pct, 100.0);
    assert_eq!(full.days_available, 10);
    assert_eq!(full.longest_run_days, 10);
    assert_eq!(full.n_data_points, 241);
    assert_eq!(full.avg_points_per_day, 24.1);
}

#[test]
fn test_universe_by_currency() {
    let stats =
        compute_stats_for_universe(universe(), &source(), &CoverageAnalyzer::default());
    let by_currency = stats.by_currency();

    assert_eq!(by_currency.len(), 2);
    assert_eq!(by_currency[0].currency_pair, "BTC/USDT");
    assert_eq!(by_currency[0].days_available, 10);
    assert_eq!(by_currency[0].exchange_ids.len(), 2);
    assert!(by_currency[0].exchange_ids.contains(&"binance".to_string()));
    assert!(by_currency[0].exchange_ids.contains(&"kucoin".to_string()));
    assert_eq!(by_currency[1].currency_pair, "ETH/USDT");
}

#[test]
fn test_universe_with_expected_interval_rejects_hourly_data() {
    let config = AnalysisConfig::default()
        .with_expected_interval_secs(60)
        .with_degenerate_range(DegenerateRangePolicy::SingleDay);
    let stats = compute_stats_for_universe(
        [("binance", "BTC/USDT")],
        &source(),
        &CoverageAnalyzer::new(config),
    );

    assert!(stats.reports.is_empty());
    assert_eq!(
        stats.failures[0].error,
        CoverageError::IntervalMismatch {
            expected_secs: 60,
            inferred_secs: 3600,
        }
    );
}

#[test]
fn test_universe_stats_serialize() -> anyhow::Result<()> {
    let stats =
        compute_stats_for_universe(universe(), &source(), &CoverageAnalyzer::default());
    let json = serde_json::to_value(&stats)?;

    assert_eq!(json["reports"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        json["failures"][1]["error"],
        "No series for exchange_id=ftx currency_pair=SOL/USDT"
    );
    Ok(())
}

#[test]
fn test_custom_sort_columns() -> anyhow::Result<()> {
    let config = AnalysisConfig::from_toml_str(
        r#"
        [report]
        sort_by = ["days_available"]
        round_decimals = 1
        "#,
    )?;
    let stats = compute_stats_for_universe(universe(), &source(), &CoverageAnalyzer::new(config));
    let days: Vec<i64> = stats.reports.iter().map(|r| r.days_available).collect();
    assert_eq!(days, vec![3, 5, 10]);
    assert_eq!(stats.reports[1].coverage_pct, 75.2);
    Ok(())
}

#[test]
fn test_unsorted_table_keeps_universe_order() {
    let mut config = AnalysisConfig::default();
    config.report.sort_by = Vec::<StatColumn>::new();
    let stats = compute_stats_for_universe(universe(), &source(), &CoverageAnalyzer::new(config));
    let order: Vec<String> = stats.reports.iter().map(|r| r.label.to_string()).collect();
    assert_eq!(
        order,
        vec!["binance BTC/USDT", "binance ETH/USDT", "kucoin BTC/USDT"]
    );
}

#[test]
fn test_huge_round_decimals_keep_ratios_in_bounds() -> anyhow::Result<()> {
    let config = AnalysisConfig::from_toml_str("[report]\nround_decimals = 400\n")?;
    let stats = compute_stats_for_universe(universe(), &source(), &CoverageAnalyzer::new(config));

    assert_eq!(stats.reports.len(), 3);
    for report in &stats.reports {
        assert!(report.coverage_pct > 0.0 && report.coverage_pct <= 100.0);
        assert!(report.longest_run_pct > 0.0 && report.longest_run_pct <= 100.0);
        assert!(report.avg_points_per_day.is_finite());
    }
    let eth = stats
        .reports
        .iter()
        .find(|r| r.label.to_string() == "binance ETH/USDT")
        .ok_or_else(|| anyhow::anyhow!("missing ETH report"))?;
    assert_eq!(eth.coverage_pct, 100.0 * 91.0 / 121.0);
    Ok(())
}
