//! Aggregation of coverage reports across an instrument universe.
//!
//! - [`source`]: the [`SeriesSource`] seam and an in-memory implementation
//! - [`universe`]: batch analysis of many series
//! - [`table`]: sorting, rounding and grouping of report tables
//!
//! # Example
//!
//! ```
//! use cc_stats::config::AnalysisConfig;
//! use cc_stats::coverage::CoverageAnalyzer;
//! use cc_stats::models::TimeSeries;
//! use cc_stats::stats::{compute_stats_for_universe, InMemorySource};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
//! let series = TimeSeries::from_values(start, Duration::days(1), vec![Some(1.0); 5]).unwrap();
//! let source = InMemorySource::new().with_series("binance", "BTC/USDT", series);
//! let analyzer = CoverageAnalyzer::new(AnalysisConfig::default().with_vendor("CCXT"));
//!
//! let stats = compute_stats_for_universe([("binance", "BTC/USDT")], &source, &analyzer);
//! assert_eq!(stats.reports.len(), 1);
//! assert_eq!(stats.reports[0].label.vendor.as_deref(), Some("CCXT"));
//! ```

pub mod source;
pub mod table;
pub mod universe;

pub use source::{InMemorySource, SeriesSource};
pub use table::{
    compute_start_end_table_by_currency, postprocess_stats_table, CurrencyCoverage, StatColumn,
};
pub use universe::{compute_stats_for_universe, SeriesFailure, UniverseStats};
