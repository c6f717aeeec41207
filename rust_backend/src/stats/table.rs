//! Post-processing of start/end stats tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::CoverageReport;

/// Sortable column of a [`CoverageReport`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatColumn {
    ExchangeId,
    CurrencyPair,
    MinTimestamp,
    MaxTimestamp,
    NDataPoints,
    CoveragePct,
    DaysAvailable,
    AvgPointsPerDay,
    LongestRunDays,
    LongestRunPct,
    LongestRunStart,
    LongestRunEnd,
}

impl StatColumn {
    /// Ascending order of two reports on this column.
    pub fn compare(&self, a: &CoverageReport, b: &CoverageReport) -> Ordering {
        match self {
            StatColumn::ExchangeId => a.label.exchange_id.cmp(&b.label.exchange_id),
            StatColumn::CurrencyPair => a.label.currency_pair.cmp(&b.label.currency_pair),
            StatColumn::MinTimestamp => a.min_timestamp.cmp(&b.min_timestamp),
            StatColumn::MaxTimestamp => a.max_timestamp.cmp(&b.max_timestamp),
            StatColumn::NDataPoints => a.n_data_points.cmp(&b.n_data_points),
            StatColumn::CoveragePct => a.coverage_pct.total_cmp(&b.coverage_pct),
            StatColumn::DaysAvailable => a.days_available.cmp(&b.days_available),
            StatColumn::AvgPointsPerDay => a.avg_points_per_day.total_cmp(&b.avg_points_per_day),
            StatColumn::LongestRunDays => a.longest_run_days.cmp(&b.longest_run_days),
            StatColumn::LongestRunPct => a.longest_run_pct.total_cmp(&b.longest_run_pct),
            StatColumn::LongestRunStart => a.longest_run_start.cmp(&b.longest_run_start),
            StatColumn::LongestRunEnd => a.longest_run_end.cmp(&b.longest_run_end),
        }
    }
}

/// Sort a stats table ascending by `sort_by` (first column most significant)
/// and round the ratio columns to `round_decimals`.
///
/// The sort is stable, so rows equal on every key keep their input order.
pub fn postprocess_stats_table(
    mut reports: Vec<CoverageReport>,
    sort_by: &[StatColumn],
    round_decimals: Option<u32>,
) -> Vec<CoverageReport> {
    if !sort_by.is_empty() {
        reports.sort_by(|a, b| {
            sort_by
                .iter()
                .map(|column| column.compare(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }
    match round_decimals {
        Some(decimals) => reports.iter().map(|r| r.rounded(decimals)).collect(),
        None => reports,
    }
}

/// Start/end coverage of one currency pair across exchanges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyCoverage {
    pub currency_pair: String,
    pub min_timestamp: DateTime<Utc>,
    pub max_timestamp: DateTime<Utc>,
    /// Exchanges quoting the pair, in table order.
    pub exchange_ids: Vec<String>,
    pub days_available: i64,
}

/// Group a stats table by currency pair.
///
/// Each pair spans from its earliest to its latest timestamp on any
/// exchange. Pairs are ordered by available days, longest first, then by
/// name.
pub fn compute_start_end_table_by_currency(reports: &[CoverageReport]) -> Vec<CurrencyCoverage> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut table: Vec<CurrencyCoverage> = Vec::new();

    for report in reports {
        let pair = report.label.currency_pair.as_str();
        match index.get(pair).copied() {
            Some(i) => {
                let entry = &mut table[i];
                entry.min_timestamp = entry.min_timestamp.min(report.min_timestamp);
                entry.max_timestamp = entry.max_timestamp.max(report.max_timestamp);
                entry.exchange_ids.push(report.label.exchange_id.clone());
            }
            None => {
                index.insert(pair, table.len());
                table.push(CurrencyCoverage {
                    currency_pair: pair.to_string(),
                    min_timestamp: report.min_timestamp,
                    max_timestamp: report.max_timestamp,
                    exchange_ids: vec![report.label.exchange_id.clone()],
                    days_available: 0,
                });
            }
        }
    }

    for entry in &mut table {
        entry.days_available = (entry.max_timestamp - entry.min_timestamp).num_days();
    }
    table.sort_by(|a, b| {
        b.days_available
            .cmp(&a.days_available)
            .then_with(|| a.currency_pair.cmp(&b.currency_pair))
    });

    log::info!("The number of unique currency pairs={}", table.len());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesLabel;
    use chrono::{Duration, TimeZone};

    fn report(exchange: &str, pair: &str, start_day: i64, days: i64, coverage: f64) -> CoverageReport {
        let t0 = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap() + Duration::days(start_day);
        let t1 = t0 + Duration::days(days);
        CoverageReport {
            label: SeriesLabel::new(exchange, pair),
            min_timestamp: t0,
            max_timestamp: t1,
            n_data_points: 10,
            total_points: 10,
            coverage_pct: coverage,
            days_available: days,
            avg_points_per_day: 10.0 / days.max(1) as f64,
            longest_run_days: days,
            longest_run_pct: 100.0,
            longest_run_start: t0,
            longest_run_end: t1,
            longest_run_len: 10,
            sampling_interval_secs: 86_400,
        }
    }

    #[test]
    fn test_sort_by_multiple_columns() {
        let table = vec![
            report("a", "BTC/USDT", 0, 3, 90.0),
            report("b", "BTC/USDT", 0, 3, 80.0),
            report("c", "ETH/USDT", 0, 3, 80.0),
        ];
        let sorted = postprocess_stats_table(
            table,
            &[StatColumn::CoveragePct, StatColumn::CurrencyPair],
            None,
        );
        let order: Vec<&str> = sorted.iter().map(|r| r.label.exchange_id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rounding_and_stable_order_without_keys() {
        let table = vec![
            report("x", "BTC/USDT", 0, 3, 33.33333),
            report("y", "BTC/USDT", 0, 3, 11.11111),
        ];
        let processed = postprocess_stats_table(table, &[], Some(2));
        assert_eq!(processed[0].label.exchange_id, "x");
        assert_eq!(processed[0].coverage_pct, 33.33);
        assert_eq!(processed[0].avg_points_per_day, 3.33);
        assert_eq!(processed[1].coverage_pct, 11.11);
    }

    #[test]
    fn test_by_currency_merges_exchanges() {
        let table = vec![
            report("binance", "BTC/USDT", 5, 10, 100.0),
            report("kucoin", "ETH/USDT", 0, 3, 100.0),
            report("ftx", "BTC/USDT", 0, 4, 100.0),
        ];
        let by_currency = compute_start_end_table_by_currency(&table);

        assert_eq!(by_currency.len(), 2);
        let btc = &by_currency[0];
        assert_eq!(btc.currency_pair, "BTC/USDT");
        assert_eq!(btc.exchange_ids, vec!["binance", "ftx"]);
        assert_eq!(btc.min_timestamp, table[2].min_timestamp);
        assert_eq!(btc.max_timestamp, table[0].max_timestamp);
        assert_eq!(btc.days_available, 15);
        assert_eq!(by_currency[1].currency_pair, "ETH/USDT");
        assert_eq!(by_currency[1].days_available, 3);
    }

    #[test]
    fn test_by_currency_ties_ordered_by_name() {
        let table = vec![
            report("a", "XRP/USDT", 0, 2, 100.0),
            report("a", "ADA/USDT", 0, 2, 100.0),
        ];
        let by_currency = compute_start_end_table_by_currency(&table);
        assert_eq!(by_currency[0].currency_pair, "ADA/USDT");
    }

    #[test]
    fn test_by_currency_empty() {
        assert!(compute_start_end_table_by_currency(&[]).is_empty());
    }

    #[test]
    fn test_stat_column_names() {
        let json = serde_json::to_string(&StatColumn::NDataPoints).unwrap();
        assert_eq!(json, "\"n_data_points\"");
        let col: StatColumn = serde_json::from_str("\"longest_run_pct\"").unwrap();
        assert_eq!(col, StatColumn::LongestRunPct);
    }
}
