// Scenario tests for the baseline/enhanced comparator
//
// Exercises the full chain (samples -> ANOVA -> Cohen's d -> interval) with
// realistic Wi-Fi metric distributions and the boundary cases of each statistic.

use super::distributions::students_t_two_tailed_p;
use super::*;
use crate::error::ValidationError;
use crate::sampling::{generate, Condition, DistributionSpec, MetricSample};

fn sample(metric: &str, condition: Condition, mean: f64, sd: f64, n: usize, seed: u64) -> MetricSample {
    generate(metric, condition, &DistributionSpec::normal(mean, sd), n, seed).unwrap()
}

/// Throughput in Gbps: baseline N(1.2, 0.1) vs enhanced N(3.0, 0.15), n = 1000
///
/// Expected: overwhelming significance, very large effect, tight interval near 3.0
#[test]
fn test_throughput_scenario() {
    let baseline = sample("throughput", Condition::Baseline, 1.2, 0.1, 1000, 42);
    let enhanced = sample("throughput", Condition::Enhanced, 3.0, 0.15, 1000, 42);

    let result = compare(&baseline, &enhanced, 0.95).unwrap();

    assert_eq!(result.metric, "throughput");
    assert!(result.p_value() < 0.001, "p = {}", result.p_value());
    assert!(result.effect_size > 2.0, "d = {}", result.effect_size);
    assert_eq!(result.anova.df_between, 1);
    assert_eq!(result.anova.df_within, 1998);

    let ci = result.confidence_interval;
    let center = (ci.lower + ci.upper) / 2.0;
    assert!((center - 3.0).abs() < 0.02, "center {}", center);
    assert!(ci.lower > 2.97 && ci.upper < 3.03, "ci [{}, {}]", ci.lower, ci.upper);
    assert!(ci.width() < 0.03);

    // Roughly +150%
    let change = result.percent_change.unwrap();
    assert!((change - 150.0).abs() < 5.0, "change {}", change);
}

#[test]
fn test_interval_tightens_with_sample_size() {
    let small = sample("throughput", Condition::Enhanced, 3.0, 0.15, 100, 5);
    let large = sample("throughput", Condition::Enhanced, 3.0, 0.15, 10_000, 5);
    let baseline = sample("throughput", Condition::Baseline, 1.2, 0.1, 100, 6);

    let narrow = compare(&baseline, &large, 0.95).unwrap().confidence_interval;
    let wide = compare(&baseline, &small, 0.95).unwrap().confidence_interval;

    // Standard error scales with 1/sqrt(n): 100x the samples, ~1/10 the width
    let ratio = narrow.width() / wide.width();
    assert!(ratio > 0.07 && ratio < 0.14, "ratio {}", ratio);
}

#[test]
fn test_exactly_two_samples_per_group_succeeds() {
    let result = compare_values("latency", &[10.0, 12.0], &[5.0, 6.0], 0.95).unwrap();
    assert_eq!(result.baseline.count, 2);
    assert_eq!(result.enhanced.count, 2);
    assert!(result.effect_size < 0.0);
    assert!(result.confidence_interval.contains(result.enhanced.mean));
}

#[test]
fn test_one_sample_in_either_group_fails() {
    match compare_values("latency", &[10.0], &[5.0, 6.0], 0.95) {
        Err(ValidationError::InsufficientData { group, actual, .. }) => {
            assert_eq!(group, "baseline");
            assert_eq!(actual, 1);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }

    match compare_values("latency", &[10.0, 11.0], &[5.0], 0.95) {
        Err(ValidationError::InsufficientData { group, .. }) => assert_eq!(group, "enhanced"),
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn test_constant_groups_are_degenerate() {
    let err = compare_values("coverage", &[5.0; 10], &[8.0; 10], 0.95).unwrap_err();
    assert_eq!(
        err,
        ValidationError::DegenerateDistribution {
            pooled_std_dev: 0.0
        }
    );
}

#[test]
fn test_inexact_constant_groups_are_degenerate() {
    let err = compare_values("coverage", &[0.1; 10], &[0.3; 10], 0.95).unwrap_err();
    assert_eq!(
        err,
        ValidationError::DegenerateDistribution {
            pooled_std_dev: 0.0
        }
    );
}

#[test]
fn test_zero_spread_generated_samples_are_degenerate() {
    let baseline = sample("throughput", Condition::Baseline, 1.2, 0.0, 1000, 42);
    let enhanced = sample("throughput", Condition::Enhanced, 3.0, 0.0, 1000, 42);
    assert!(matches!(
        compare(&baseline, &enhanced, 0.95),
        Err(ValidationError::DegenerateDistribution { pooled_std_dev }) if pooled_std_dev == 0.0
    ));

    let groups = [baseline.values(), enhanced.values()];
    assert!(matches!(
        one_way_anova(&groups),
        Err(ValidationError::DegenerateDistribution { .. })
    ));
}

#[test]
fn test_one_constant_group_is_not_degenerate() {
    let result = compare_values("coverage", &[5.0, 6.0, 7.0], &[8.0, 8.0, 8.0], 0.95).unwrap();
    assert!(result.effect_size > 0.0);
    // Zero-spread enhanced group collapses its interval onto the mean
    assert_eq!(result.confidence_interval.lower, 8.0);
    assert_eq!(result.confidence_interval.upper, 8.0);
}

#[test]
fn test_invalid_confidence_level() {
    for level in [0.0, 1.0, 1.2] {
        assert!(matches!(
            compare_values("latency", &[1.0, 2.0], &[3.0, 4.0], level),
            Err(ValidationError::Configuration(_))
        ));
    }
}

#[test]
fn test_effect_size_sign_convention() {
    let up = compare_values("m", &[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0], 0.95).unwrap();
    assert!(up.effect_size > 0.0);

    let down = compare_values("m", &[2.0, 3.0, 4.0], &[1.0, 2.0, 3.0], 0.95).unwrap();
    assert!(down.effect_size < 0.0);

    let flat = compare_values("m", &[1.0, 2.0, 3.0], &[3.0, 1.0, 2.0], 0.95).unwrap();
    assert_eq!(flat.effect_size, 0.0);
    assert_eq!(flat.percent_change, Some(0.0));
}

#[test]
fn test_anova_matches_pooled_t_test() {
    let baseline = [9.8, 10.4, 10.1, 9.6, 10.3, 10.0];
    let enhanced = [10.6, 10.9, 10.2, 11.1, 10.7];
    let result = compare_values("m", &baseline, &enhanced, 0.95).unwrap();

    let pooled = pooled_std_dev(&result.baseline, &result.enhanced);
    let n1 = baseline.len() as f64;
    let n2 = enhanced.len() as f64;
    let t = (result.enhanced.mean - result.baseline.mean) / (pooled * (1.0 / n1 + 1.0 / n2).sqrt());

    assert!((result.anova.f_statistic - t * t).abs() < 1e-9);
    let p_t = students_t_two_tailed_p(t, n1 + n2 - 2.0);
    assert!((result.p_value() - p_t).abs() < 1e-12);
    assert!(result.is_significant(0.05));
}

#[test]
fn test_similar_distributions_not_significant() {
    let baseline = sample("reliability", Condition::Baseline, 99.0, 0.5, 50, 11);
    let enhanced = sample("reliability", Condition::Enhanced, 99.0, 0.5, 50, 12);
    let result = compare(&baseline, &enhanced, 0.95).unwrap();

    // Same population: p is uniform on (0, 1), so only guard against extremes
    assert!(result.p_value() > 1e-4);
    assert!(result.effect_size.abs() < 1.0);
}

#[test]
fn test_percent_change_absent_for_zero_baseline_mean() {
    let result = compare_values("offset", &[-1.0, 1.0], &[2.0, 3.0], 0.95).unwrap();
    assert_eq!(result.percent_change, None);
}

#[test]
fn test_interval_always_contains_mean() {
    for seed in 0..20 {
        let baseline = sample("m", Condition::Baseline, 0.0, 1.0, 5, seed);
        let enhanced = sample("m", Condition::Enhanced, 0.5, 2.0, 5, seed + 100);
        let result = compare(&baseline, &enhanced, 0.9).unwrap();
        assert!(result.confidence_interval.contains(result.enhanced.mean));
    }
}
