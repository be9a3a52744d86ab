// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for k6-compare.
//!
//! Turns a directory of k6 `*-summary.json` files into a timestamped
//! Markdown comparison report written next to them.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use k6_compare_report::{FileOutcome, OutputOptions, ReportConfig, RunOutcome};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Generate a comparison report from k6 summary files.
#[derive(Parser, Debug)]
#[command(name = "k6-compare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `<adapter>-<run>-summary.json` files.
    pub report_dir: PathBuf,

    /// Write the report here instead of the report directory.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file overriding the title, scenario and environment text.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Also write the extracted metrics as JSON.
    #[arg(long)]
    pub json: bool,

    /// Log every file as it is processed.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print the report path and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Install the stderr log subscriber. Repeated calls are no-ops.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the report could not be
/// generated.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());
    execute(&cli)
}

/// Execute an already parsed command line.
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    debug!(report_dir = %cli.report_dir.display(), "generating comparison report");

    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    let options = OutputOptions {
        output_dir: cli.output_dir.clone(),
        write_json: cli.json,
    };

    let outcome = k6_compare_report::generate_with(
        &cli.report_dir,
        &config,
        &options,
        Local::now().naive_local(),
    )?;

    if !cli.quiet {
        print_progress(&outcome);
    }

    println!();
    println!("{} Report generated: {}", "✓".green(), outcome.report_path.display());
    if let Some(json_path) = &outcome.json_path {
        println!("{} Results written: {}", "✓".green(), json_path.display());
    }
    if !cli.quiet {
        println!();
        println!("View report:");
        println!("  cat {}", outcome.report_path.display());
    }

    Ok(())
}

fn print_progress(outcome: &RunOutcome) {
    let aggregation = &outcome.aggregation;
    println!("Found {} summary files", aggregation.candidates());

    for file in &aggregation.outcomes {
        match file {
            FileOutcome::Parsed { adapter, .. } => {
                println!("{} Parsed {}", "✓".green(), adapter);
            }
            FileOutcome::Skipped { path, error } => {
                println!(
                    "{} Failed to parse {}: {}",
                    "✗".red(),
                    path.display(),
                    error
                );
            }
        }
    }
}
