// One-way analysis of variance
//
// Partitions total variation into between-group and within-group sums of squares:
//
//   SSB = sum_i n_i (mean_i - grand_mean)^2        df = k - 1
//   SSW = sum_i sum_j (x_ij - mean_i)^2            df = N - k
//   F   = (SSB / (k - 1)) / (SSW / (N - k))
//
// and maps F to a p-value through the F(k - 1, N - k) survival function.
//
// Reference:
// [3] Fisher, R. A. (1925). Statistical Methods for Research Workers. Oliver & Boyd.

use super::descriptive::{centered_sum_of_squares, mean};
use super::distributions::f_survival;
use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Minimum observations per group for a within-group variance
pub const MIN_GROUP_SIZE: usize = 2;

/// Result of a one-way ANOVA
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub df_between: usize,
    pub df_within: usize,
    pub ss_between: f64,
    pub ss_within: f64,
    /// P(F >= f_statistic) under equal population means
    pub p_value: f64,
}

/// Run a one-way ANOVA over two or more groups
///
/// # Example
/// ```
/// use qwifi_stats::comparison::one_way_anova;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// let result = one_way_anova(&[&a[..], &b[..]]).unwrap();
/// assert!((result.f_statistic - 13.5).abs() < 1e-12);
/// assert!(result.p_value < 0.05);
/// ```
pub fn one_way_anova(groups: &[&[f64]]) -> Result<AnovaResult> {
    if groups.len() < 2 {
        return Err(ValidationError::InvalidParameter {
            parameter: "groups",
            value: groups.len() as f64,
            reason: "one-way ANOVA needs at least 2 groups",
        });
    }

    for (idx, group) in groups.iter().enumerate() {
        if group.len() < MIN_GROUP_SIZE {
            return Err(ValidationError::InsufficientData {
                group: format!("#{}", idx),
                required: MIN_GROUP_SIZE,
                actual: group.len(),
            });
        }
    }

    let k = groups.len();
    let total: usize = groups.iter().map(|g| g.len()).sum();
    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let group_mean = mean(group);
        ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += centered_sum_of_squares(group, group_mean);
    }

    let df_between = k - 1;
    let df_within = total - k;

    if ss_within == 0.0 {
        return Err(ValidationError::DegenerateDistribution {
            pooled_std_dev: 0.0,
        });
    }

    let f_statistic = (ss_between / df_between as f64) / (ss_within / df_within as f64);
    let p_value = f_survival(f_statistic, df_between as f64, df_within as f64);

    Ok(AnovaResult {
        f_statistic,
        df_between,
        df_within,
        ss_between,
        ss_within,
        p_value,
    })
}
