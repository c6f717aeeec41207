//! Error types for coverage analysis.
//!
//! Every failure is a local computation error: `analyze` either returns a
//! complete report or one of the variants below, never a partial result.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for coverage operations
pub type CoverageResult<T> = Result<T, CoverageError>;

/// Errors raised while building or analyzing a series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverageError {
    /// The series holds no present (non-missing) value.
    #[error("Series has no non-missing values")]
    EmptySeries,

    /// No dominant sampling interval could be inferred from the timestamps.
    #[error("Cannot infer sampling interval: {reason}")]
    IrregularSeries { reason: String },

    /// The trimmed range spans zero whole days, so points per day is undefined.
    #[error("Trimmed range spans zero days ({n_data_points} data points)")]
    DegenerateRange { n_data_points: usize },

    /// Timestamps are not strictly increasing. This is a caller contract
    /// violation, the series is never sorted behind the caller's back.
    #[error(
        "Timestamps must be strictly increasing: entry {index} ({current}) does not follow {previous}"
    )]
    PrecondViolation {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// A generated timestamp falls outside the representable date range.
    #[error("Timestamp of entry {index} is out of range")]
    TimestampOverflow { index: usize },

    /// The inferred interval differs from the one the configuration expects.
    #[error("Inferred sampling interval {inferred_secs}s, expected {expected_secs}s")]
    IntervalMismatch {
        expected_secs: i64,
        inferred_secs: i64,
    },

    /// The data source has no series for the requested instrument.
    #[error("No series for exchange_id={exchange_id} currency_pair={currency_pair}")]
    SeriesNotFound {
        exchange_id: String,
        currency_pair: String,
    },
}

impl CoverageError {
    /// Create an irregular-series error.
    pub fn irregular(reason: impl Into<String>) -> Self {
        Self::IrregularSeries {
            reason: reason.into(),
        }
    }

    /// Whether the error comes from the data itself rather than from the
    /// caller breaking the input contract or misconfiguring the analysis.
    pub fn is_data_quality(&self) -> bool {
        matches!(
            self,
            Self::EmptySeries | Self::IrregularSeries { .. } | Self::DegenerateRange { .. }
        )
    }
}

/// Errors raised while loading an [`AnalysisConfig`](crate::config::AnalysisConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Parse failure, `path` is the dotted location of the offending key.
    #[error("Failed to parse config at '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("No config file found (searched: {searched})")]
    NotFound { searched: String },
}

/// Errors raised by stopwatch misuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Timer is not running")]
    NotRunning,

    #[error("Timer is already running")]
    AlreadyRunning,

    #[error("Timer has not measured any interval yet")]
    NoInterval,
}
