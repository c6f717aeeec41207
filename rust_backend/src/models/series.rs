//! Typed time series, sampling interval and run model.
//!
//! A [`TimeSeries`] can only be built through a validating constructor, so
//! every value of the type has strictly increasing timestamps.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoverageError, CoverageResult};

/// A single reading. A missing observation carries no value.
///
/// `NaN` supplied by a caller is stored as missing, so presence is decided
/// in one place.
///
/// # Examples
///
/// ```
/// use cc_stats::models::Observation;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2021, 9, 1, 0, 0, 0).unwrap();
/// assert!(Observation::new(ts, Some(42.0)).is_present());
/// assert!(!Observation::new(ts, Some(f64::NAN)).is_present());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "(DateTime<Utc>, Option<f64>)",
    into = "(DateTime<Utc>, Option<f64>)"
)]
pub struct Observation {
    timestamp: DateTime<Utc>,
    value: Option<f64>,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, value: Option<f64>) -> Self {
        Self {
            timestamp,
            value: value.filter(|v| !v.is_nan()),
        }
    }

    /// A missing observation at `timestamp`.
    pub fn missing(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

impl From<(DateTime<Utc>, Option<f64>)> for Observation {
    fn from((timestamp, value): (DateTime<Utc>, Option<f64>)) -> Self {
        Observation::new(timestamp, value)
    }
}

impl From<Observation> for (DateTime<Utc>, Option<f64>) {
    fn from(obs: Observation) -> Self {
        (obs.timestamp, obs.value)
    }
}

/// Ordered sequence of observations with strictly increasing timestamps.
///
/// # Examples
///
/// ```
/// use cc_stats::models::TimeSeries;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2021, 9, 1, 0, 0, 0).unwrap();
/// let series = TimeSeries::from_values(
///     start,
///     Duration::minutes(1),
///     vec![Some(1.0), None, Some(3.0)],
/// )
/// .unwrap();
///
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.present_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series, failing with [`CoverageError::PrecondViolation`] on the
    /// first timestamp that does not strictly follow its predecessor.
    pub fn new(observations: Vec<Observation>) -> CoverageResult<Self> {
        for (index, pair) in observations.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(CoverageError::PrecondViolation {
                    index: index + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }
        Ok(Self { observations })
    }

    /// Build a regularly spaced series starting at `start`, one value per `step`.
    ///
    /// Fails with [`CoverageError::TimestampOverflow`] when an entry's
    /// timestamp cannot be represented.
    pub fn from_values<I>(start: DateTime<Utc>, step: Duration, values: I) -> CoverageResult<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let observations = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                i32::try_from(index)
                    .ok()
                    .and_then(|i| step.checked_mul(i))
                    .and_then(|offset| start.checked_add_signed(offset))
                    .map(|timestamp| Observation::new(timestamp, value))
                    .ok_or(CoverageError::TimestampOverflow { index })
            })
            .collect::<CoverageResult<Vec<_>>>()?;
        Self::new(observations)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.observations.iter().map(|o| o.timestamp)
    }

    /// Present observations as `(timestamp, value)` pairs, in order.
    pub fn present(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.observations
            .iter()
            .filter_map(|o| o.value.map(|v| (o.timestamp, v)))
    }

    pub fn present_count(&self) -> usize {
        self.observations.iter().filter(|o| o.is_present()).count()
    }

    /// Fraction of missing observations in `[0, 1]`; `0.0` for an empty series.
    pub fn missing_fraction(&self) -> f64 {
        if self.observations.is_empty() {
            return 0.0;
        }
        let missing = self.len() - self.present_count();
        missing as f64 / self.len() as f64
    }

    pub fn first_present(&self) -> Option<&Observation> {
        self.observations.iter().find(|o| o.is_present())
    }

    pub fn last_present(&self) -> Option<&Observation> {
        self.observations.iter().rev().find(|o| o.is_present())
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Contiguous sub-range; ordering is inherited, so no revalidation.
    pub(crate) fn slice(&self, start: usize, end_inclusive: usize) -> Self {
        Self {
            observations: self.observations[start..=end_inclusive].to_vec(),
        }
    }
}

impl TryFrom<Vec<Observation>> for TimeSeries {
    type Error = CoverageError;

    fn try_from(observations: Vec<Observation>) -> Result<Self, Self::Error> {
        TimeSeries::new(observations)
    }
}

impl From<TimeSeries> for Vec<Observation> {
    fn from(series: TimeSeries) -> Self {
        series.observations
    }
}

/// Nominal gap between consecutive expected observations. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SamplingInterval(Duration);

impl SamplingInterval {
    /// Wrap a duration; `None` unless it is strictly positive.
    pub fn new(duration: Duration) -> Option<Self> {
        (duration > Duration::zero()).then_some(Self(duration))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub fn num_seconds(&self) -> i64 {
        self.0.num_seconds()
    }
}

impl fmt::Display for SamplingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.num_seconds();
        if secs > 0 && secs % 86_400 == 0 {
            write!(f, "{}d", secs / 86_400)
        } else if secs > 0 && secs % 3_600 == 0 {
            write!(f, "{}h", secs / 3_600)
        } else if secs > 0 && secs % 60 == 0 {
            write!(f, "{}min", secs / 60)
        } else if secs > 0 && self.0 == Duration::seconds(secs) {
            write!(f, "{}s", secs)
        } else {
            write!(f, "{}ms", self.0.num_milliseconds())
        }
    }
}

/// Maximal contiguous stretch of present observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub values: Vec<f64>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Elapsed span in whole days, truncated.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
