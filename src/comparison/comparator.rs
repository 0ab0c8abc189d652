// Baseline vs. enhanced comparison for a single metric
//
// Chains the individual statistics in a fixed order so that the cheapest
// precondition failures surface first:
//
//   1. sample counts (InsufficientData)
//   2. confidence level (Configuration)
//   3. pooled spread (DegenerateDistribution)
//   4. ANOVA p-value, Cohen's d, enhanced-mean interval

use super::anova::{one_way_anova, AnovaResult, MIN_GROUP_SIZE};
use super::confidence::{check_confidence_level, mean_confidence_interval, ConfidenceInterval};
use super::descriptive::Descriptive;
use super::effect_size::cohens_d;
use crate::error::{Result, ValidationError};
use crate::sampling::{Condition, MetricSample};
use serde::{Deserialize, Serialize};

/// Statistics comparing the two conditions of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub metric: String,
    pub baseline: Descriptive,
    pub enhanced: Descriptive,
    pub anova: AnovaResult,
    /// Cohen's d, positive when the enhanced mean is higher
    pub effect_size: f64,
    /// Interval for the enhanced condition's mean
    pub confidence_interval: ConfidenceInterval,
    /// Relative change of the enhanced mean in percent; `None` for a zero baseline mean
    pub percent_change: Option<f64>,
}

impl ComparisonResult {
    pub fn p_value(&self) -> f64 {
        self.anova.p_value
    }

    /// Whether the mean difference is significant at `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.anova.p_value < alpha
    }
}

/// Compare baseline and enhanced samples of one metric
///
/// The metric name is taken from the baseline sample.
///
/// # Example
/// ```
/// use qwifi_stats::comparison::compare;
/// use qwifi_stats::sampling::{generate, Condition, DistributionSpec};
///
/// let baseline = generate("throughput", Condition::Baseline,
///     &DistributionSpec::normal(1.2, 0.1), 200, 1).unwrap();
/// let enhanced = generate("throughput", Condition::Enhanced,
///     &DistributionSpec::normal(3.0, 0.15), 200, 2).unwrap();
///
/// let result = compare(&baseline, &enhanced, 0.95).unwrap();
/// assert!(result.p_value() < 0.001);
/// assert!(result.effect_size > 2.0);
/// ```
pub fn compare(
    baseline: &MetricSample,
    enhanced: &MetricSample,
    confidence_level: f64,
) -> Result<ComparisonResult> {
    compare_values(
        baseline.metric(),
        baseline.values(),
        enhanced.values(),
        confidence_level,
    )
}

/// Compare two raw value slices under a metric name
pub fn compare_values(
    metric: &str,
    baseline: &[f64],
    enhanced: &[f64],
    confidence_level: f64,
) -> Result<ComparisonResult> {
    for (condition, values) in [
        (Condition::Baseline, baseline),
        (Condition::Enhanced, enhanced),
    ] {
        if values.len() < MIN_GROUP_SIZE {
            return Err(ValidationError::InsufficientData {
                group: condition.to_string(),
                required: MIN_GROUP_SIZE,
                actual: values.len(),
            });
        }
    }
    check_confidence_level(confidence_level)?;

    let baseline_stats = Descriptive::of(baseline);
    let enhanced_stats = Descriptive::of(enhanced);

    let effect_size = cohens_d(&baseline_stats, &enhanced_stats)?;
    let anova = one_way_anova(&[baseline, enhanced])?;
    let confidence_interval = mean_confidence_interval(&enhanced_stats, confidence_level)?;

    let percent_change = if baseline_stats.mean == 0.0 {
        None
    } else {
        Some((enhanced_stats.mean - baseline_stats.mean) / baseline_stats.mean.abs() * 100.0)
    };

    tracing::trace!(
        metric,
        f = anova.f_statistic,
        p = anova.p_value,
        d = effect_size,
        "compared conditions"
    );

    Ok(ComparisonResult {
        metric: metric.to_string(),
        baseline: baseline_stats,
        enhanced: enhanced_stats,
        anova,
        effect_size,
        confidence_interval,
        percent_change,
    })
}
