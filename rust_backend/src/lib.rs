//! # cc-stats
//!
//! Coverage statistics for time-indexed market data.
//!
//! Given a series of timestamped readings where some readings are missing,
//! the crate trims the leading and trailing gaps, infers the sampling
//! interval, finds the longest uninterrupted run of readings and reports
//! span, density and run statistics. Reports for a whole instrument universe
//! can be aggregated, sorted and grouped by currency pair.
//!
//! ## Modules
//!
//! - [`models`]: typed series, runs and reports
//! - [`coverage`]: the per-series analysis
//! - [`stats`]: universe batches and report tables
//! - [`config`]: TOML analysis configuration
//! - [`observer`]: diagnostics hooks
//! - [`timer`]: stopwatch and timed log scopes
//! - [`error`]: error types
//!
//! ## Example
//!
//! ```
//! use cc_stats::coverage::analyze;
//! use cc_stats::models::{SeriesLabel, TimeSeries};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
//! let values = vec![Some(1.0), Some(1.1), None, Some(1.2), Some(1.3), Some(1.4)];
//! let series = TimeSeries::from_values(start, Duration::days(1), values).unwrap();
//!
//! let report = analyze(&series, SeriesLabel::new("binance", "BTC/USDT")).unwrap();
//! assert_eq!(report.longest_run_len, 3);
//! assert_eq!(report.days_available, 5);
//! ```

pub mod config;
pub mod coverage;
pub mod error;
pub mod models;
pub mod observer;
pub mod stats;
pub mod timer;

pub use config::{AnalysisConfig, DegenerateRangePolicy};
pub use coverage::{analyze, CoverageAnalyzer};
pub use error::{ConfigError, CoverageError, CoverageResult, TimerError};
pub use models::{CoverageReport, Observation, Run, SamplingInterval, SeriesLabel, TimeSeries};
