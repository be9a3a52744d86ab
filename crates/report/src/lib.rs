// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! Comparative reports over k6 load-test summaries.
//!
//! Each tested adapter leaves one `<adapter>-<run>-summary.json` file in a
//! report directory. This crate finds those files, pulls a fixed metric set
//! out of each one and renders a single Markdown comparison.
//!
//! # Quick Start
//!
//! ```no_run
//! use k6_compare_report::{generate, ReportConfig};
//!
//! let config = ReportConfig::default();
//! let outcome = generate("reports/20240101", &config).unwrap();
//! println!("{}", outcome.report_path.display());
//! ```
//!
//! # Modules
//!
//! - [`summary`] - Locating the summary object in k6 output
//! - [`result`] - `MetricSet` extraction and the `ResultsTable`
//! - [`aggregate`] - Discovering and aggregating summary files
//! - [`markdown`] - Markdown report rendering
//! - [`io`] - Writing report artifacts
//! - [`config`] - Static report text
//! - [`error`] - Error types

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod io;
pub mod markdown;
pub mod result;
pub mod summary;

pub use aggregate::{aggregate, Aggregation, FileOutcome};
pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use markdown::{render, RenderContext, Report};
pub use result::{extract, MetricSet, ResultsTable};
pub use summary::{parse, SummaryDocument};

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Where to write the artifacts of a run.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Directory for the report; the input directory when `None`
    pub output_dir: Option<PathBuf>,
    /// Also write the results table as JSON
    pub write_json: bool,
}

/// Everything produced by one run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Aggregated results and per-file outcomes
    pub aggregation: Aggregation,
    /// Path of the Markdown report
    pub report_path: PathBuf,
    /// Path of the JSON results, if requested
    pub json_path: Option<PathBuf>,
    /// Generation time embedded in the report
    pub generated_at: NaiveDateTime,
}

/// Aggregate `dir`, render the report and write it next to the summaries.
///
/// # Errors
///
/// Fails if the directory is missing, holds no summary files, none of them
/// parse, or the report cannot be written.
pub fn generate(dir: impl AsRef<Path>, config: &ReportConfig) -> Result<RunOutcome> {
    generate_with(dir, config, &OutputOptions::default(), Local::now().naive_local())
}

/// Like [`generate`] with explicit output options and generation time.
pub fn generate_with(
    dir: impl AsRef<Path>,
    config: &ReportConfig,
    options: &OutputOptions,
    generated_at: NaiveDateTime,
) -> Result<RunOutcome> {
    let dir = dir.as_ref();
    let aggregation = aggregate::collect(dir)?;

    let ctx = RenderContext {
        generated_at,
        config,
    };
    let report = markdown::render(&aggregation.table, &ctx)?;

    let out_dir = options.output_dir.as_deref().unwrap_or(dir);
    let report_path = io::write_report(out_dir, &report, generated_at)?;

    let json_path = if options.write_json {
        let path = out_dir.join(io::results_file_name(generated_at));
        io::write_results_json(&aggregation.table, &path)?;
        Some(path)
    } else {
        None
    };

    tracing::info!(
        adapters = aggregation.table.len(),
        report = %report_path.display(),
        "report generated"
    );

    Ok(RunOutcome {
        aggregation,
        report_path,
        json_path,
        generated_at,
    })
}
