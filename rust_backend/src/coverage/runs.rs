//! Trimming, sampling interval inference and longest-run detection.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use crate::error::{CoverageError, CoverageResult};
use crate::models::{Run, SamplingInterval, TimeSeries};

/// Drop leading and trailing missing observations.
///
/// Interior missing observations are kept; they are the gaps under analysis.
///
/// # Errors
/// [`CoverageError::EmptySeries`] when no observation is present.
///
/// # Examples
///
/// ```
/// use cc_stats::coverage::trim;
/// use cc_stats::models::TimeSeries;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2021, 9, 1, 0, 0, 0).unwrap();
/// let series = TimeSeries::from_values(
///     start,
///     Duration::minutes(1),
///     vec![None, Some(1.0), None, Some(2.0), None],
/// )
/// .unwrap();
///
/// let trimmed = trim(&series).unwrap();
/// assert_eq!(trimmed.len(), 3);
/// ```
pub fn trim(series: &TimeSeries) -> CoverageResult<TimeSeries> {
    let observations = series.observations();
    let first = observations
        .iter()
        .position(|o| o.is_present())
        .ok_or(CoverageError::EmptySeries)?;
    let last = observations
        .iter()
        .rposition(|o| o.is_present())
        .ok_or(CoverageError::EmptySeries)?;
    Ok(series.slice(first, last))
}

/// Infer the nominal sampling interval as the mode of successive gaps.
///
/// A single gap is its own mode. With more gaps the most frequent one must
/// occur at least twice and strictly more often than any other.
///
/// # Errors
/// [`CoverageError::IrregularSeries`] with fewer than two entries or without
/// a dominant gap.
pub fn infer_sampling_interval(series: &TimeSeries) -> CoverageResult<SamplingInterval> {
    if series.len() < 2 {
        return Err(CoverageError::irregular(format!(
            "need at least 2 entries, got {}",
            series.len()
        )));
    }

    let mut counts: BTreeMap<Duration, usize> = BTreeMap::new();
    for pair in series.observations().windows(2) {
        *counts
            .entry(pair[1].timestamp() - pair[0].timestamp())
            .or_insert(0) += 1;
    }

    // Most frequent first, shortest gap first among equals.
    let mut ranked: Vec<(Duration, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let (mode, mode_count) = ranked[0];
    if let Some(&(runner_up, runner_up_count)) = ranked.get(1) {
        if mode_count < 2 {
            return Err(CoverageError::irregular(format!(
                "{} distinct gaps and none repeats",
                ranked.len()
            )));
        }
        if runner_up_count == mode_count {
            return Err(CoverageError::irregular(format!(
                "gaps of {}s and {}s are equally frequent ({} each)",
                mode.num_seconds(),
                runner_up.num_seconds(),
                mode_count
            )));
        }
    }

    SamplingInterval::new(mode)
        .ok_or_else(|| CoverageError::irregular("non-positive gap between timestamps"))
}

/// Locate the longest run of present observations.
///
/// Two present observations belong to the same run iff their timestamps are
/// exactly one `interval` apart. Among runs of equal length the earliest wins.
///
/// # Errors
/// [`CoverageError::EmptySeries`] when no observation is present.
pub fn find_longest_run(series: &TimeSeries, interval: SamplingInterval) -> CoverageResult<Run> {
    let present: Vec<(DateTime<Utc>, f64)> = series.present().collect();
    if present.is_empty() {
        return Err(CoverageError::EmptySeries);
    }

    let step = interval.duration();
    let mut best_start = 0;
    let mut best_len = 0;
    let mut run_start = 0;
    for i in 1..=present.len() {
        let closes_run = i == present.len() || present[i].0 - present[i - 1].0 != step;
        if closes_run {
            let len = i - run_start;
            // Strict comparison keeps the earliest of equal-length runs.
            if len > best_len {
                best_start = run_start;
                best_len = len;
            }
            run_start = i;
        }
    }

    let members = &present[best_start..best_start + best_len];
    Ok(Run {
        start: members[0].0,
        end: members[members.len() - 1].0,
        values: members.iter().map(|&(_, v)| v).collect(),
    })
}
