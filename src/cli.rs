//! CLI argument parsing for qwifi-stats

use crate::config::ValidationConfig;
use crate::pipeline::FailurePolicy;
use crate::report::ReportLayout;
use crate::series::DEFAULT_BINS;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for comparison results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "qwifi-stats")]
#[command(version)]
#[command(
    about = "Statistical validation of baseline vs enhanced Wi-Fi performance metrics",
    long_about = None
)]
pub struct Cli {
    /// TOML configuration file (built-in Wi-Fi scenario if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the base seed
    #[arg(short, long, value_name = "N")]
    pub seed: Option<u64>,

    /// Override the per-condition sample count
    #[arg(short = 'n', long = "samples", value_name = "N")]
    pub samples: Option<usize>,

    /// Override the confidence level, e.g. 0.99
    #[arg(long = "confidence", value_name = "LEVEL")]
    pub confidence: Option<f64>,

    /// Output format (text, json or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Keep going when a metric fails; failures are reported and the exit status is non-zero
    #[arg(long = "isolate")]
    pub isolate: bool,

    /// Run metrics on parallel worker threads
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Width of the metric name column
    #[arg(long = "name-width", value_name = "N")]
    pub name_width: Option<usize>,

    /// Width of the mean columns
    #[arg(long = "value-width", value_name = "N")]
    pub value_width: Option<usize>,

    /// Decimal places shown for p-values
    #[arg(long = "p-value-precision", value_name = "N")]
    pub p_value_precision: Option<usize>,

    /// Write chart series (means, intervals, histograms) as JSON to FILE
    #[arg(long = "series", value_name = "FILE")]
    pub series: Option<PathBuf>,

    /// Histogram bins for --series
    #[arg(long = "bins", value_name = "N", default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.isolate {
            FailurePolicy::Isolate
        } else {
            FailurePolicy::FailFast
        }
    }

    /// Apply `--seed`, `--samples` and `--confidence` on top of a loaded config
    pub fn apply_overrides(&self, config: &mut ValidationConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(level) = self.confidence {
            config.confidence_level = level;
        }
    }

    pub fn report_layout(&self) -> ReportLayout {
        let mut layout = ReportLayout::default();
        if let Some(width) = self.name_width {
            layout.name_width = width;
        }
        if let Some(width) = self.value_width {
            layout.value_width = width;
        }
        if let Some(precision) = self.p_value_precision {
            layout.p_value_precision = precision;
        }
        layout
    }
}
