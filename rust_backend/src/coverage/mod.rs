//! Coverage and gap analysis for time-indexed series.
//!
//! The pipeline for one series is:
//!
//! ```text
//! raw series ─▶ trim ─▶ infer_sampling_interval ─▶ find_longest_run ─▶ CoverageReport
//! ```
//!
//! - [`runs`]: the building blocks, usable on their own
//! - [`analyzer`]: [`CoverageAnalyzer`] and the one-shot [`analyze`]

pub mod analyzer;
pub mod runs;


pub use analyzer::{analyze, CoverageAnalyzer};
pub use runs::{find_longest_run, infer_sampling_interval, trim};
