//! CSV output format for comparison results
//!
//! One header line plus one line per metric. Numbers are written at full precision
//! so spreadsheets and plotting tools get the unrounded values.

use crate::comparison::ComparisonResult;

const HEADER: [&str; 13] = [
    "metric",
    "baseline_count",
    "baseline_mean",
    "baseline_std_dev",
    "enhanced_count",
    "enhanced_mean",
    "enhanced_std_dev",
    "percent_change",
    "f_statistic",
    "p_value",
    "cohens_d",
    "ci_lower",
    "ci_upper",
];

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<Vec<String>>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: &ComparisonResult) {
        self.rows.push(vec![
            Self::escape_field(&result.metric),
            result.baseline.count.to_string(),
            result.baseline.mean.to_string(),
            result.baseline.std_dev.to_string(),
            result.enhanced.count.to_string(),
            result.enhanced.mean.to_string(),
            result.enhanced.std_dev.to_string(),
            result
                .percent_change
                .map(|c| c.to_string())
                .unwrap_or_default(),
            result.anova.f_statistic.to_string(),
            result.anova.p_value.to_string(),
            result.effect_size.to_string(),
            result.confidence_interval.lower.to_string(),
            result.confidence_interval.upper.to_string(),
        ]);
    }

    /// Escape CSV field (handle commas, quotes, line breaks)
    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(&HEADER.join(","));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&row.join(","));
            output.push('\n');
        }

        output
    }
}

impl<'a> FromIterator<&'a ComparisonResult> for CsvOutput {
    fn from_iter<I: IntoIterator<Item = &'a ComparisonResult>>(iter: I) -> Self {
        let mut output = Self::new();
        for result in iter {
            output.add_result(result);
        }
        output
    }
}
