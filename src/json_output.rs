//! JSON output format for validation runs

use crate::comparison::ComparisonResult;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Identifier of the document layout, bumped on breaking changes
pub const JSON_FORMAT: &str = "qwifi-stats-json-v1";

/// A metric that failed under per-metric isolation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonFailure {
    pub metric: String,
    /// Display form of the underlying error
    pub error: String,
}

/// Complete JSON document for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub version: String,
    pub format: String,
    pub confidence_level: f64,
    pub results: Vec<ComparisonResult>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<JsonFailure>,
}

impl JsonOutput {
    pub fn new(confidence_level: f64) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: JSON_FORMAT.to_string(),
            confidence_level,
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: ComparisonResult) {
        self.results.push(result);
    }

    pub fn add_failure(&mut self, metric: &str, error: &ValidationError) {
        self.failures.push(JsonFailure {
            metric: metric.to_string(),
            error: error.kind().to_string(),
        });
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::compare_values;

    #[test]
    fn test_json_output_creation() {
        let output = JsonOutput::new(0.95);
        assert_eq!(output.format, "qwifi-stats-json-v1");
        assert_eq!(output.version, env!("CARGO_PKG_VERSION"));
        assert!(output.results.is_empty());
    }

    #[test]
    fn test_json_serialization() {
        let mut output = JsonOutput::new(0.95);
        output.add_result(compare_values("latency", &[12.0, 11.0, 13.0], &[7.0, 8.0, 7.5], 0.95).unwrap());

        let json = output.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["confidence_level"], 0.95);
        let result = &value["results"][0];
        assert_eq!(result["metric"], "latency");
        assert_eq!(result["baseline"]["count"], 3);
        assert!(result["anova"]["p_value"].as_f64().unwrap() < 0.05);
        assert!(result["effect_size"].as_f64().unwrap() < 0.0);
        assert!(result["confidence_interval"]["lower"].is_number());
    }

    #[test]
    fn test_failures_omitted_when_empty() {
        let json = JsonOutput::new(0.9).to_json().unwrap();
        assert!(!json.contains("failures"));
    }

    #[test]
    fn test_failure_strips_metric_wrapper() {
        let mut output = JsonOutput::new(0.95);
        let err = ValidationError::DegenerateDistribution {
            pooled_std_dev: 0.0,
        }
        .for_metric("jitter");
        output.add_failure("jitter", &err);

        assert_eq!(output.failures[0].metric, "jitter");
        assert!(!output.failures[0].error.contains("jitter"));

        let parsed: JsonOutput = serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(parsed.failures, output.failures);
    }
}
