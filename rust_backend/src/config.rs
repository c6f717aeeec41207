//! Analysis configuration file support.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! [analysis]
//! expected_interval_secs = 60
//! degenerate_range = "error"
//!
//! [report]
//! vendor = "CCXT"
//! round_decimals = 2
//! sort_by = ["coverage_pct", "longest_run_pct"]
//! ```
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::stats::StatColumn;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CC_STATS_CONFIG";

/// How to handle a trimmed range spanning zero whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateRangePolicy {
    /// Fail with `CoverageError::DegenerateRange`.
    #[default]
    Error,
    /// Count the range as one day, so points per day equals the point count.
    SingleDay,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisSettings {
    /// When set, an inferred interval of another length is rejected.
    #[serde(default)]
    pub expected_interval_secs: Option<i64>,
    #[serde(default)]
    pub degenerate_range: DegenerateRangePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSettings {
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default = "default_round_decimals")]
    pub round_decimals: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: Vec<StatColumn>,
}

fn default_round_decimals() -> u32 {
    2
}

fn default_sort_by() -> Vec<StatColumn> {
    vec![StatColumn::CoveragePct, StatColumn::LongestRunPct]
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            vendor: None,
            round_decimals: default_round_decimals(),
            sort_by: default_sort_by(),
        }
    }
}

impl AnalysisConfig {
    /// Parse configuration from a TOML string.
    ///
    /// Errors carry the dotted path of the offending key, e.g.
    /// `report.sort_by[1]`.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let deserializer = toml::Deserializer::new(content);
        serde_path_to_error::deserialize(deserializer).map_err(|e| ConfigError::Parse {
            path: e.path().to_string(),
            message: e.inner().message().to_string(),
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Uses `$CC_STATS_CONFIG` when set, otherwise the first existing of
    /// `cc_stats.toml` and `rust_backend/cc_stats.toml`.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("cc_stats.toml"),
            PathBuf::from("rust_backend/cc_stats.toml"),
        ];
        Self::locate(env::var_os(CONFIG_PATH_ENV).map(PathBuf::from), &search_paths)
    }

    /// Load `explicit` when given, otherwise the first existing search path.
    fn locate(explicit: Option<PathBuf>, search_paths: &[PathBuf]) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for path in search_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Err(ConfigError::NotFound {
            searched: search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    pub fn with_expected_interval_secs(mut self, secs: i64) -> Self {
        self.analysis.expected_interval_secs = Some(secs);
        self
    }

    pub fn with_degenerate_range(mut self, policy: DegenerateRangePolicy) -> Self {
        self.analysis.degenerate_range = policy;
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.report.vendor = Some(vendor.into());
        self
    }
}
