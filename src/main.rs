//! wi-crosscheck: CLI entry point.
//!
//! Compares the outputs two wrapped-interval implementations recorded for the
//! same test cases.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use wi_crosscheck::config::{load_config, Implementation, ImplementationSet};
use wi_crosscheck::error::CrosscheckError;
use wi_crosscheck::render::{DetailsView, SummaryView};
use wi_crosscheck::report::{run_comparison, write_report};
use wi_crosscheck::types::load_results_document;

#[derive(Parser)]
#[command(name = "wi-crosscheck")]
#[command(about = "Compare two wrapped interval implementations' recorded results")]
#[command(version)]
struct Cli {
    /// Combined results JSON file.
    input: PathBuf,

    /// Output file for comparison results.
    #[arg(short, long, default_value = "comparison_results.json")]
    output: PathBuf,

    /// Print detailed comparison information.
    #[arg(short, long)]
    verbose: bool,

    /// Number of divergences per suite shown with --verbose.
    #[arg(long, default_value_t = 10)]
    max_details: usize,

    /// YAML file naming the implementations and their method prefixes.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Implementation used as the reference output.
    #[arg(long, value_enum)]
    baseline: Option<Implementation>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut implementations = match &cli.config {
        Some(path) => load_config(path)?,
        None => ImplementationSet::default(),
    };
    if let Some(baseline) = cli.baseline {
        implementations = implementations.with_baseline(baseline);
    }

    let document = load_results_document(&read_input(&cli.input)?)?;

    let outcome = run_comparison(&document, &implementations);
    let report = outcome.report();

    println!();
    print!("{}", SummaryView(&report));

    if cli.verbose {
        let details = DetailsView {
            report: &report,
            limit: cli.max_details,
            implementations: &implementations,
        };
        if !details.is_empty() {
            println!();
            print!("{details}");
        }
    }

    write_report(&report, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    info!("Detailed comparison results saved to: {}", cli.output.display());

    if outcome.has_divergences() {
        std::process::exit(1);
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, CrosscheckError> {
    fs::read_to_string(path).map_err(|source| CrosscheckError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}
