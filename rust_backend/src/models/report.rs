use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an analyzed series, supplied by the caller and passed through
/// unmodified into its report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesLabel {
    pub exchange_id: String,
    pub currency_pair: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

impl SeriesLabel {
    pub fn new(exchange_id: impl Into<String>, currency_pair: impl Into<String>) -> Self {
        Self {
            exchange_id: exchange_id.into(),
            currency_pair: currency_pair.into(),
            vendor: None,
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }
}

impl fmt::Display for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.exchange_id, self.currency_pair)
    }
}

/// Start/end coverage statistics for one series.
///
/// Percentages are in `[0, 100]`. Spans are whole days, truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub label: SeriesLabel,
    /// First non-missing timestamp.
    pub min_timestamp: DateTime<Utc>,
    /// Last non-missing timestamp.
    pub max_timestamp: DateTime<Utc>,
    /// Number of non-missing points.
    pub n_data_points: usize,
    /// Number of entries in the trimmed range, missing ones included.
    pub total_points: usize,
    pub coverage_pct: f64,
    pub days_available: i64,
    pub avg_points_per_day: f64,
    pub longest_run_days: i64,
    pub longest_run_pct: f64,
    pub longest_run_start: DateTime<Utc>,
    pub longest_run_end: DateTime<Utc>,
    pub longest_run_len: usize,
    pub sampling_interval_secs: i64,
}

impl CoverageReport {
    /// Copy of this report with the ratio columns rounded to `decimals`.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            coverage_pct: round_to(self.coverage_pct, decimals),
            avg_points_per_day: round_to(self.avg_points_per_day, decimals),
            longest_run_pct: round_to(self.longest_run_pct, decimals),
            ..self.clone()
        }
    }
}

/// Decimal places past which an f64 ratio has no digits left to round.
const MAX_ROUND_DECIMALS: u32 = 15;

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals > MAX_ROUND_DECIMALS {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
