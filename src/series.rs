//! Chart series export
//!
//! Named (x, y) point lists for an external chart renderer. Nothing here draws;
//! the renderer receives the series as JSON.

use crate::error::{Result, ValidationError};
use crate::pipeline::PipelineOutcome;
use crate::sampling::MetricSample;
use serde::{Deserialize, Serialize};

/// Default number of histogram bins
pub const DEFAULT_BINS: usize = 20;

/// A named list of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Everything written by `--series`
///
/// In the summary series, x is the index of the metric in `metrics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesExport {
    pub metrics: Vec<String>,
    pub series: Vec<Series>,
}

impl SeriesExport {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Density histogram of a sample
///
/// Points are (bin center, density) so the bars integrate to 1. A constant sample
/// has no width to spread over and yields a single point carrying the full mass.
pub fn histogram(sample: &MetricSample, bins: usize) -> Result<Series> {
    if bins == 0 {
        return Err(ValidationError::InvalidParameter {
            parameter: "bins",
            value: 0.0,
            reason: "at least one bin is required",
        });
    }
    if sample.is_empty() {
        return Err(ValidationError::InsufficientData {
            group: sample.condition().to_string(),
            required: 1,
            actual: 0,
        });
    }

    let name = format!("{}/{}/histogram", sample.metric(), sample.condition());
    let values = sample.values();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return Ok(Series {
            name,
            points: vec![(min, 1.0)],
        });
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        // max lands exactly on the upper edge
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let n = values.len() as f64;
    let points = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| (min + (i as f64 + 0.5) * width, c as f64 / (n * width)))
        .collect();

    Ok(Series { name, points })
}

/// Per-metric means and the enhanced-mean interval bounds
pub fn summary_series(outcome: &PipelineOutcome) -> Vec<Series> {
    let mut baseline = Vec::new();
    let mut enhanced = Vec::new();
    let mut lower = Vec::new();
    let mut upper = Vec::new();

    for (i, result) in outcome.comparisons().enumerate() {
        let x = i as f64;
        baseline.push((x, result.baseline.mean));
        enhanced.push((x, result.enhanced.mean));
        lower.push((x, result.confidence_interval.lower));
        upper.push((x, result.confidence_interval.upper));
    }

    [
        ("baseline/mean", baseline),
        ("enhanced/mean", enhanced),
        ("enhanced/ci_lower", lower),
        ("enhanced/ci_upper", upper),
    ]
    .into_iter()
    .map(|(name, points)| Series {
        name: name.to_string(),
        points,
    })
    .collect()
}

/// Summary series followed by a histogram per metric and condition
pub fn export(outcome: &PipelineOutcome, bins: usize) -> Result<SeriesExport> {
    let mut series = summary_series(outcome);
    for run in outcome.runs.values() {
        series.push(histogram(&run.baseline, bins)?);
        series.push(histogram(&run.enhanced, bins)?);
    }

    tracing::debug!(series = series.len(), bins, "chart series built");

    Ok(SeriesExport {
        metrics: outcome.runs.keys().cloned().collect(),
        series,
    })
}
