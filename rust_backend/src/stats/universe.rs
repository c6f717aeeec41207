//! Universe-level batch over many instruments.

use serde::Serialize;

use super::source::SeriesSource;
use super::table::{compute_start_end_table_by_currency, postprocess_stats_table, CurrencyCoverage};
use crate::coverage::CoverageAnalyzer;
use crate::error::CoverageError;
use crate::models::{CoverageReport, SeriesLabel};
use crate::timer::TimedScope;

/// A series the batch could not analyze.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesFailure {
    pub label: SeriesLabel,
    #[serde(serialize_with = "serialize_error")]
    pub error: CoverageError,
}

fn serialize_error<S: serde::Serializer>(error: &CoverageError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// Result of a universe batch: the post-processed table and the failures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UniverseStats {
    pub reports: Vec<CoverageReport>,
    pub failures: Vec<SeriesFailure>,
}

impl UniverseStats {
    /// Group the table by currency pair.
    pub fn by_currency(&self) -> Vec<CurrencyCoverage> {
        compute_start_end_table_by_currency(&self.reports)
    }
}

/// Compute start/end stats for every (exchange, currency pair) of a universe.
///
/// Every series is read from `source` and analyzed with `analyzer`, labelled
/// with the vendor from the analyzer configuration. A series that cannot be
/// read or analyzed is recorded in [`UniverseStats::failures`] and the batch
/// moves on. The table is sorted and rounded per the report settings.
pub fn compute_stats_for_universe<S, I, E, C>(
    universe: I,
    source: &S,
    analyzer: &CoverageAnalyzer,
) -> UniverseStats
where
    S: SeriesSource + ?Sized,
    I: IntoIterator<Item = (E, C)>,
    E: Into<String>,
    C: Into<String>,
{
    let _scope = TimedScope::new(log::Level::Info, "Computing start-end stats for universe");
    let settings = &analyzer.config().report;
    let mut stats = UniverseStats::default();

    for (exchange_id, currency_pair) in universe {
        let mut label = SeriesLabel::new(exchange_id, currency_pair);
        label.vendor = settings.vendor.clone();

        let result = source
            .read_series(&label.exchange_id, &label.currency_pair)
            .and_then(|series| analyzer.analyze(&series, label.clone()));
        match result {
            Ok(report) => stats.reports.push(report),
            Err(error) => {
                log::warn!("Skipping {}: {}", label, error);
                stats.failures.push(SeriesFailure { label, error });
            }
        }
    }

    log::info!(
        "Analyzed {} series, {} failed",
        stats.reports.len() + stats.failures.len(),
        stats.failures.len()
    );
    stats.reports = postprocess_stats_table(
        stats.reports,
        &settings.sort_by,
        Some(settings.round_decimals),
    );
    stats
}
