// Standardized effect size (Cohen's d)
//
//   d = (mean_enhanced - mean_baseline) / s_pooled
//   s_pooled = sqrt(((n_b - 1) s_b^2 + (n_e - 1) s_e^2) / (n_b + n_e - 2))
//
// Positive d means the enhanced group's mean is higher.
//
// Reference:
// [4] Cohen, J. (1988). Statistical Power Analysis for the Behavioral Sciences,
//     2nd ed. Lawrence Erlbaum. |d| >= 0.8 is conventionally "large".

use super::descriptive::Descriptive;
use crate::error::{Result, ValidationError};

/// Pooled standard deviation of two groups, weighted by degrees of freedom
pub fn pooled_std_dev(baseline: &Descriptive, enhanced: &Descriptive) -> f64 {
    let dof = (baseline.count + enhanced.count) as f64 - 2.0;
    let weighted = (baseline.count as f64 - 1.0) * baseline.variance()
        + (enhanced.count as f64 - 1.0) * enhanced.variance();
    (weighted / dof).sqrt()
}

/// Cohen's d for enhanced relative to baseline
///
/// Fails with `DegenerateDistribution` when the pooled standard deviation is zero.
pub fn cohens_d(baseline: &Descriptive, enhanced: &Descriptive) -> Result<f64> {
    let pooled = pooled_std_dev(baseline, enhanced);
    if pooled == 0.0 || !pooled.is_finite() {
        return Err(ValidationError::DegenerateDistribution {
            pooled_std_dev: pooled,
        });
    }
    Ok((enhanced.mean - baseline.mean) / pooled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pooled_equal_sizes_is_rms_of_sds() {
        let a = Descriptive {
            count: 10,
            mean: 0.0,
            std_dev: 3.0,
        };
        let b = Descriptive {
            count: 10,
            mean: 0.0,
            std_dev: 4.0,
        };
        // sqrt((9 + 16) / 2)
        assert!((pooled_std_dev(&a, &b) - 12.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_pooled_weights_by_dof() {
        let small = Descriptive {
            count: 2,
            mean: 0.0,
            std_dev: 10.0,
        };
        let large = Descriptive {
            count: 101,
            mean: 0.0,
            std_dev: 1.0,
        };
        // (1 * 100 + 100 * 1) / 101
        let expected = (200.0_f64 / 101.0).sqrt();
        assert!((pooled_std_dev(&small, &large) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_sign_follows_enhanced_minus_baseline() {
        let low = Descriptive::of(&[1.0, 2.0, 3.0]);
        let high = Descriptive::of(&[4.0, 5.0, 6.0]);
        assert!(cohens_d(&low, &high).unwrap() > 0.0);
        assert!(cohens_d(&high, &low).unwrap() < 0.0);
        // Difference 3, pooled sd 1
        assert!((cohens_d(&low, &high).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_equal_means_give_exact_zero() {
        let a = Descriptive::of(&[1.0, 2.0, 3.0]);
        let b = Descriptive::of(&[3.0, 2.0, 1.0]);
        assert_eq!(cohens_d(&a, &b).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_pooled_is_degenerate() {
        let a = Descriptive::of(&[2.0, 2.0, 2.0]);
        let b = Descriptive::of(&[7.0, 7.0]);
        assert_eq!(
            cohens_d(&a, &b),
            Err(ValidationError::DegenerateDistribution {
                pooled_std_dev: 0.0
            })
        );
    }
}
