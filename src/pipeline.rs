//! Validation pipeline: configuration -> samples -> comparisons
//!
//! Metrics are independent, so each one is generated and compared on its own. A run
//! either stops at the first failing metric ([`FailurePolicy::FailFast`]) or records
//! the failure and carries on with the rest ([`FailurePolicy::Isolate`]).
//!
//! [`run_parallel`] runs one scoped worker per metric. Seeds come from the metric
//! name, never from scheduling order, so it produces exactly what [`run`] produces.
//! The outcome is only assembled after every worker has been joined.

use crate::comparison::{compare, ComparisonResult};
use crate::config::{MetricPlan, ValidationConfig};
use crate::error::{Result, ValidationError};
use crate::sampling::{generate, Condition, MetricSample};
use std::collections::BTreeMap;

/// How a run treats a metric whose comparison fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the run with the first error
    #[default]
    FailFast,
    /// Record the error for that metric and continue with the others
    Isolate,
}

/// Samples and statistics for one metric
#[derive(Debug, Clone)]
pub struct MetricRun {
    pub baseline: MetricSample,
    pub enhanced: MetricSample,
    pub comparison: ComparisonResult,
}

/// Everything a pipeline run produced
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub confidence_level: f64,
    /// Successful metrics, keyed and ordered by name
    pub runs: BTreeMap<String, MetricRun>,
    /// Failed metrics (only populated under `FailurePolicy::Isolate`)
    pub failures: BTreeMap<String, ValidationError>,
}

impl PipelineOutcome {
    /// Comparison results in metric-name order
    pub fn comparisons(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.runs.values().map(|run| &run.comparison)
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate and compare a single metric
pub fn run_metric(config: &ValidationConfig, plan: &MetricPlan<'_>) -> Result<MetricRun> {
    let tag = |e: ValidationError| e.for_metric(plan.name);

    let baseline = generate(
        plan.name,
        Condition::Baseline,
        plan.baseline,
        config.sample_count_for(plan.baseline),
        config.seed_for(plan.name, Condition::Baseline),
    )
    .map_err(tag)?;

    let enhanced = generate(
        plan.name,
        Condition::Enhanced,
        plan.enhanced,
        config.sample_count_for(plan.enhanced),
        config.seed_for(plan.name, Condition::Enhanced),
    )
    .map_err(tag)?;

    let comparison = compare(&baseline, &enhanced, config.confidence_level).map_err(tag)?;

    tracing::debug!(
        metric = plan.name,
        baseline_mean = comparison.baseline.mean,
        enhanced_mean = comparison.enhanced.mean,
        p_value = comparison.anova.p_value,
        effect_size = comparison.effect_size,
        "metric compared"
    );

    Ok(MetricRun {
        baseline,
        enhanced,
        comparison,
    })
}

/// Run every configured metric on the current thread
///
/// # Example
/// ```
/// use qwifi_stats::config::ValidationConfig;
/// use qwifi_stats::pipeline::{run, FailurePolicy};
///
/// let outcome = run(&ValidationConfig::default(), FailurePolicy::FailFast).unwrap();
/// assert_eq!(outcome.runs.len(), 4);
/// assert!(outcome.is_complete());
/// ```
pub fn run(config: &ValidationConfig, policy: FailurePolicy) -> Result<PipelineOutcome> {
    config.validate()?;
    tracing::info!(
        metrics = config.metric_count(),
        seed = config.seed,
        "starting validation run"
    );

    let mut results = Vec::new();
    for plan in config.metrics() {
        let result = match run_metric(config, &plan) {
            Err(e) if policy == FailurePolicy::FailFast => return Err(e),
            other => other,
        };
        results.push((plan.name.to_string(), result));
    }

    collect(config, policy, results)
}

/// Run every configured metric on its own scoped thread
pub fn run_parallel(config: &ValidationConfig, policy: FailurePolicy) -> Result<PipelineOutcome> {
    config.validate()?;
    tracing::info!(
        metrics = config.metric_count(),
        seed = config.seed,
        "starting parallel validation run"
    );

    let plans: Vec<MetricPlan<'_>> = config.metrics().collect();

    let results = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = plans
            .iter()
            .map(|plan| {
                let handle = scope.spawn(move |_| run_metric(config, plan));
                (plan.name, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(name, handle)| {
                let result = handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                (name.to_string(), result)
            })
            .collect::<Vec<_>>()
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));

    collect(config, policy, results)
}

fn collect(
    config: &ValidationConfig,
    policy: FailurePolicy,
    results: Vec<(String, Result<MetricRun>)>,
) -> Result<PipelineOutcome> {
    let mut outcome = PipelineOutcome {
        confidence_level: config.confidence_level,
        ..Default::default()
    };

    for (name, result) in results {
        match result {
            Ok(run) => {
                outcome.runs.insert(name, run);
            }
            Err(e) if policy == FailurePolicy::FailFast => return Err(e),
            Err(e) => {
                tracing::warn!("Metric {} failed, continuing: {}", name, e);
                outcome.failures.insert(name, e);
            }
        }
    }

    Ok(outcome)
}
