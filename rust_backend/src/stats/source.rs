//! Data source seam for the universe batch.

use std::collections::HashMap;

use crate::error::{CoverageError, CoverageResult};
use crate::models::TimeSeries;

/// Supplies one series per (exchange, currency pair).
///
/// Implementations own the loading and resampling of vendor data; the series
/// they return must already mark absent readings as missing.
pub trait SeriesSource {
    fn read_series(&self, exchange_id: &str, currency_pair: &str) -> CoverageResult<TimeSeries>;
}

/// In-memory source keyed by (exchange, currency pair).
///
/// # Example
/// ```
/// use cc_stats::models::TimeSeries;
/// use cc_stats::stats::{InMemorySource, SeriesSource};
///
/// let source = InMemorySource::new().with_series("binance", "BTC/USDT", TimeSeries::default());
/// assert!(source.read_series("binance", "BTC/USDT").is_ok());
/// assert!(source.read_series("binance", "ETH/USDT").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    series: HashMap<(String, String), TimeSeries>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a series, returning the one it replaces.
    pub fn insert(
        &mut self,
        exchange_id: impl Into<String>,
        currency_pair: impl Into<String>,
        series: TimeSeries,
    ) -> Option<TimeSeries> {
        self.series
            .insert((exchange_id.into(), currency_pair.into()), series)
    }

    pub fn with_series(
        mut self,
        exchange_id: impl Into<String>,
        currency_pair: impl Into<String>,
        series: TimeSeries,
    ) -> Self {
        self.insert(exchange_id, currency_pair, series);
        self
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl SeriesSource for InMemorySource {
    fn read_series(&self, exchange_id: &str, currency_pair: &str) -> CoverageResult<TimeSeries> {
        self.series
            .get(&(exchange_id.to_string(), currency_pair.to_string()))
            .cloned()
            .ok_or_else(|| CoverageError::SeriesNotFound {
                exchange_id: exchange_id.to_string(),
                currency_pair: currency_pair.to_string(),
            })
    }
}
