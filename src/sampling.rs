//! Seeded sample generation for baseline/enhanced metric conditions
//!
//! Every draw goes through an explicit RNG: either a ChaCha8 stream seeded by the
//! caller, or an RNG the caller owns. Nothing here touches thread-local random state,
//! so two calls with the same seed and parameters always return the same sequence.

use crate::error::{Result, ValidationError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of observations per condition
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Experimental condition a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Baseline,
    Enhanced,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Baseline => "baseline",
            Condition::Enhanced => "enhanced",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distribution family used to draw samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    #[default]
    Normal,
}

/// Parameters for one condition of one metric
///
/// `sample_count` overrides the run-wide count when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSpec {
    #[serde(default)]
    pub family: Family,
    pub mean: f64,
    pub std_dev: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
}

impl DistributionSpec {
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        Self {
            family: Family::Normal,
            mean,
            std_dev,
            sample_count: None,
        }
    }

    /// Same parameters with an explicit per-condition sample count
    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = Some(count);
        self
    }

    /// Check the parameters without drawing anything
    pub fn validate(&self) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(ValidationError::InvalidParameter {
                parameter: "mean",
                value: self.mean,
                reason: "must be finite",
            });
        }
        if !self.std_dev.is_finite() {
            return Err(ValidationError::InvalidParameter {
                parameter: "std_dev",
                value: self.std_dev,
                reason: "must be finite",
            });
        }
        if self.std_dev < 0.0 {
            return Err(ValidationError::InvalidParameter {
                parameter: "std_dev",
                value: self.std_dev,
                reason: "must be non-negative",
            });
        }
        Ok(())
    }
}

/// Measurements for one condition of one metric
///
/// Immutable once generated; the values are only exposed as a slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSample {
    metric: String,
    condition: Condition,
    values: Vec<f64>,
}

impl MetricSample {
    /// Wrap already-measured values (e.g. recorded data instead of a simulation)
    pub fn from_values(metric: impl Into<String>, condition: Condition, values: Vec<f64>) -> Self {
        Self {
            metric: metric.into(),
            condition,
            values,
        }
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Draw `count` samples using a ChaCha8 stream seeded with `seed`
///
/// # Example
/// ```
/// use qwifi_stats::sampling::{generate, Condition, DistributionSpec};
///
/// let spec = DistributionSpec::normal(1.2, 0.1);
/// let a = generate("throughput", Condition::Baseline, &spec, 100, 42).unwrap();
/// let b = generate("throughput", Condition::Baseline, &spec, 100, 42).unwrap();
/// assert_eq!(a.values(), b.values());
/// ```
pub fn generate(
    metric: &str,
    condition: Condition,
    spec: &DistributionSpec,
    count: usize,
    seed: u64,
) -> Result<MetricSample> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with_rng(metric, condition, spec, count, &mut rng)
}

/// Draw `count` samples from a caller-owned RNG
///
/// Consecutive calls on the same RNG continue the same stream.
pub fn generate_with_rng<R: Rng + ?Sized>(
    metric: &str,
    condition: Condition,
    spec: &DistributionSpec,
    count: usize,
    rng: &mut R,
) -> Result<MetricSample> {
    if count < 1 {
        return Err(ValidationError::InvalidParameter {
            parameter: "sample_count",
            value: count as f64,
            reason: "must be at least 1",
        });
    }
    spec.validate()?;

    let values = match spec.family {
        Family::Normal => {
            let normal = Normal::new(spec.mean, spec.std_dev).map_err(|_| {
                ValidationError::InvalidParameter {
                    parameter: "std_dev",
                    value: spec.std_dev,
                    reason: "rejected by normal distribution",
                }
            })?;
            (0..count).map(|_| normal.sample(rng)).collect()
        }
    };

    Ok(MetricSample::from_values(metric, condition, values))
}
