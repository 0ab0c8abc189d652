//! Error types for the validation pipeline
//!
//! Every precondition violation is reported at the point where it is detected and
//! carries the offending value, so a failed run can be diagnosed without re-running it.

use thiserror::Error;

/// Errors raised by sample generation, comparison and configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid parameter `{parameter}` = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Insufficient data in {group} group: need at least {required} samples, got {actual}")]
    InsufficientData {
        group: String,
        required: usize,
        actual: usize,
    },

    #[error("Degenerate distribution: pooled standard deviation is {pooled_std_dev}")]
    DegenerateDistribution { pooled_std_dev: f64 },

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Any of the above, tagged with the metric it was raised for
    #[error("Metric `{metric}`: {source}")]
    Metric {
        metric: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Attach a metric name, unless the error already carries one
    pub fn for_metric(self, metric: &str) -> Self {
        match self {
            already @ ValidationError::Metric { .. } => already,
            other => ValidationError::Metric {
                metric: metric.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error with any metric tag stripped
    pub fn kind(&self) -> &ValidationError {
        match self {
            ValidationError::Metric { source, .. } => source.kind(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
