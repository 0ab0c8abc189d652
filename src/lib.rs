//! qwifi-stats - Statistical validation of baseline vs enhanced Wi-Fi metrics
//!
//! This library draws seeded samples for each configured metric under a baseline and
//! an enhanced condition, then tests whether the difference is significant (one-way
//! ANOVA), how large it is (Cohen's d) and where the enhanced mean lies (Student-t
//! confidence interval). Results render as a fixed-width text report, JSON, CSV, or
//! chart series.
//!
//! ```
//! use qwifi_stats::config::ValidationConfig;
//! use qwifi_stats::pipeline::{run, FailurePolicy};
//! use qwifi_stats::report::{Report, ReportLayout};
//!
//! let outcome = run(&ValidationConfig::default(), FailurePolicy::FailFast).unwrap();
//! let report = Report::build(outcome.comparisons(), ReportLayout::default());
//! assert_eq!(report.rows().len(), 4);
//! ```

pub mod cli;
pub mod comparison;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod pipeline;
pub mod report;
pub mod sampling;
pub mod series;

pub use error::{Result, ValidationError};
