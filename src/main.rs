use anyhow::{Context, Result};
use clap::Parser;
use qwifi_stats::{
    cli::{Cli, OutputFormat},
    config::ValidationConfig,
    csv_output::CsvOutput,
    json_output::JsonOutput,
    pipeline::{self, PipelineOutcome},
    report::Report,
    series,
};
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(args: &Cli) -> Result<ValidationConfig> {
    let mut config = match &args.config {
        Some(path) => ValidationConfig::from_file(path)?,
        None => ValidationConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate().context("Invalid run settings")?;
    Ok(config)
}

fn render(args: &Cli, outcome: &PipelineOutcome) -> Result<String> {
    match args.format {
        OutputFormat::Text => Ok(Report::build(outcome.comparisons(), args.report_layout()).render()),
        OutputFormat::Csv => Ok(outcome.comparisons().collect::<CsvOutput>().to_csv()),
        OutputFormat::Json => {
            let mut output = JsonOutput::new(outcome.confidence_level);
            for result in outcome.comparisons() {
                output.add_result(result.clone());
            }
            for (metric, error) in &outcome.failures {
                output.add_failure(metric, error);
            }
            output.to_json()
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;

    let outcome = if args.parallel {
        pipeline::run_parallel(&config, args.failure_policy())?
    } else {
        pipeline::run(&config, args.failure_policy())?
    };

    print!("{}", render(&args, &outcome)?);

    for (metric, error) in &outcome.failures {
        eprintln!("{}: {}", metric, error.kind());
    }

    if let Some(path) = &args.series {
        let export = series::export(&outcome, args.bins)?;
        fs::write(path, export.to_json()?)
            .with_context(|| format!("Failed to write series to {}", path.display()))?;
    }

    if !outcome.is_complete() {
        anyhow::bail!(
            "{} of {} metrics failed",
            outcome.failures.len(),
            outcome.failures.len() + outcome.runs.len()
        );
    }

    Ok(())
}
