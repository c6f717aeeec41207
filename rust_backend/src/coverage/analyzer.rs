use chrono::Duration;
use std::fmt;
use std::sync::Arc;

use super::runs::{find_longest_run, infer_sampling_interval, trim};
use crate::config::{AnalysisConfig, DegenerateRangePolicy};
use crate::error::{CoverageError, CoverageResult};
use crate::models::{CoverageReport, SeriesLabel, TimeSeries};
use crate::observer::{AnalysisObserver, NoopObserver};

/// Computes start/end coverage statistics for single series.
///
/// Stateless between calls: the same input always yields the same report.
#[derive(Clone)]
pub struct CoverageAnalyzer {
    config: AnalysisConfig,
    observer: Arc<dyn AnalysisObserver>,
}

impl Default for CoverageAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl fmt::Debug for CoverageAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverageAnalyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CoverageAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Replace the diagnostics observer.
    pub fn with_observer(mut self, observer: Arc<dyn AnalysisObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one series.
    ///
    /// Trims the series, infers the sampling interval from the full untrimmed
    /// index, finds the longest run in the trimmed range and assembles the
    /// report. Fails atomically with the first error encountered.
    pub fn analyze(&self, series: &TimeSeries, label: SeriesLabel) -> CoverageResult<CoverageReport> {
        match self.build_report(series, &label) {
            Ok(report) => {
                self.observer.on_report(&report);
                Ok(report)
            }
            Err(e) => {
                self.observer.on_failure(&label, &e);
                Err(e)
            }
        }
    }

    fn build_report(&self, series: &TimeSeries, label: &SeriesLabel) -> CoverageResult<CoverageReport> {
        let trimmed = trim(series)?;
        self.observer.on_trimmed(label, series, &trimmed);

        let interval = infer_sampling_interval(series)?;
        if let Some(expected_secs) = self.config.analysis.expected_interval_secs {
            if interval.duration() != Duration::seconds(expected_secs) {
                return Err(CoverageError::IntervalMismatch {
                    expected_secs,
                    inferred_secs: interval.num_seconds(),
                });
            }
        }
        self.observer.on_interval(label, interval);

        let run = find_longest_run(&trimmed, interval)?;
        self.observer.on_run(label, &run);

        // Trimmed series start and end on present observations.
        let min_timestamp = trimmed
            .first()
            .ok_or(CoverageError::EmptySeries)?
            .timestamp();
        let max_timestamp = trimmed
            .last()
            .ok_or(CoverageError::EmptySeries)?
            .timestamp();

        let n_data_points = trimmed.present_count();
        let total_points = trimmed.len();
        let days_available = (max_timestamp - min_timestamp).num_days();
        let avg_points_per_day = if days_available == 0 {
            match self.config.analysis.degenerate_range {
                DegenerateRangePolicy::Error => {
                    return Err(CoverageError::DegenerateRange { n_data_points });
                }
                DegenerateRangePolicy::SingleDay => n_data_points as f64,
            }
        } else {
            n_data_points as f64 / days_available as f64
        };

        Ok(CoverageReport {
            label: label.clone(),
            min_timestamp,
            max_timestamp,
            n_data_points,
            total_points,
            coverage_pct: 100.0 * n_data_points as f64 / total_points as f64,
            days_available,
            avg_points_per_day,
            longest_run_days: run.days(),
            longest_run_pct: 100.0 * run.len() as f64 / n_data_points as f64,
            longest_run_start: run.start,
            longest_run_end: run.end,
            longest_run_len: run.len(),
            sampling_interval_secs: interval.num_seconds(),
        })
    }
}

/// Analyze one series with the default configuration.
///
/// # Examples
///
/// ```
/// use cc_stats::coverage::analyze;
/// use cc_stats::models::{SeriesLabel, TimeSeries};
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
/// let series = TimeSeries::from_values(start, Duration::days(1), vec![Some(1.0); 11]).unwrap();
///
/// let report = analyze(&series, SeriesLabel::new("binance", "BTC/USDT")).unwrap();
/// assert_eq!(report.days_available, 10);
/// assert_eq!(report.coverage_pct, 100.0);
/// ```
pub fn analyze(series: &TimeSeries, label: SeriesLabel) -> CoverageResult<CoverageReport> {
    CoverageAnalyzer::default().analyze(series, label)
}
