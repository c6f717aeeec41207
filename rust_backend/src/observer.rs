//! Diagnostics hooks for the analyzer.
//!
//! Observers only watch; the analysis result never depends on them.

use crate::error::CoverageError;
use crate::models::{CoverageReport, Run, SamplingInterval, SeriesLabel, TimeSeries};

/// Receives intermediate results of an analysis. All hooks default to no-ops.
pub trait AnalysisObserver: Send + Sync {
    fn on_trimmed(&self, _label: &SeriesLabel, _original: &TimeSeries, _trimmed: &TimeSeries) {}

    fn on_interval(&self, _label: &SeriesLabel, _interval: SamplingInterval) {}

    fn on_run(&self, _label: &SeriesLabel, _run: &Run) {}

    fn on_report(&self, _report: &CoverageReport) {}

    fn on_failure(&self, _label: &SeriesLabel, _error: &CoverageError) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

/// Observer forwarding every hook to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl AnalysisObserver for LogObserver {
    fn on_trimmed(&self, label: &SeriesLabel, original: &TimeSeries, trimmed: &TimeSeries) {
        log::debug!(
            "[{}] trimmed {} -> {} entries",
            label,
            original.len(),
            trimmed.len()
        );
    }

    fn on_interval(&self, label: &SeriesLabel, interval: SamplingInterval) {
        log::debug!("[{}] sampling interval={}", label, interval);
    }

    fn on_run(&self, label: &SeriesLabel, run: &Run) {
        log::debug!(
            "[{}] longest run: {} points from {} to {}",
            label,
            run.len(),
            run.start,
            run.end
        );
    }

    fn on_report(&self, report: &CoverageReport) {
        log::debug!(
            "[{}] coverage={:.2}% longest_run={:.2}%",
            report.label,
            report.coverage_pct,
            report.longest_run_pct
        );
    }

    fn on_failure(&self, label: &SeriesLabel, error: &CoverageError) {
        log::warn!("[{}] analysis failed: {}", label, error);
    }
}
