//! Typed data model for coverage analysis.
//!
//! - [`series`]: observations, validated time series, sampling interval, runs
//! - [`report`]: series identity and the per-series coverage report

pub mod report;
pub mod series;

pub use report::{CoverageReport, SeriesLabel};
pub use series::{Observation, Run, SamplingInterval, TimeSeries};
