// Two-sided confidence interval for a group mean
//
//   mean ± t*(1 - alpha/2, n - 1) · s / sqrt(n),    alpha = 1 - level

use super::descriptive::Descriptive;
use super::distributions::students_t_quantile;
use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Default confidence level for intervals
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Confidence interval around a sample mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub level: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Reject confidence levels outside the open interval (0, 1)
pub fn check_confidence_level(level: f64) -> Result<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::Configuration(format!(
            "confidence_level must be in (0, 1), got {}",
            level
        )))
    }
}

/// Student-t interval for the mean of `group` at `level`
pub fn mean_confidence_interval(group: &Descriptive, level: f64) -> Result<ConfidenceInterval> {
    check_confidence_level(level)?;
    if group.count < 2 {
        return Err(ValidationError::InsufficientData {
            group: "interval".to_string(),
            required: 2,
            actual: group.count,
        });
    }

    let df = (group.count - 1) as f64;
    let critical = students_t_quantile((1.0 + level) / 2.0, df);
    let half_width = critical * group.standard_error();

    Ok(ConfidenceInterval {
        level,
        lower: group.mean - half_width,
        upper: group.mean + half_width,
    })
}
