// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! Writing report artifacts.
//!
//! Reports are named after the run timestamp so repeated runs in the same
//! directory never overwrite each other.

use crate::error::{ReportError, Result};
use crate::markdown::Report;
use crate::result::ResultsTable;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of every generated artifact.
pub const REPORT_PREFIX: &str = "COMPARISON";

/// Timestamp format used in artifact file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Markdown report file name for a run, e.g. `COMPARISON-20240101_120000.md`.
pub fn report_file_name(timestamp: NaiveDateTime) -> String {
    format!("{}-{}.md", REPORT_PREFIX, timestamp.format(FILE_TIMESTAMP_FORMAT))
}

/// JSON results file name for a run, e.g. `COMPARISON-20240101_120000.json`.
pub fn results_file_name(timestamp: NaiveDateTime) -> String {
    format!("{}-{}.json", REPORT_PREFIX, timestamp.format(FILE_TIMESTAMP_FORMAT))
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))
}

/// Write the Markdown report into `dir`, returning the file path.
pub fn write_report(dir: &Path, report: &Report, timestamp: NaiveDateTime) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = dir.join(report_file_name(timestamp));
    fs::write(&path, report.to_markdown()).map_err(|e| ReportError::io(&path, e))?;
    Ok(path)
}

/// Write the results table as pretty JSON to `path`.
pub fn write_results_json(table: &ResultsTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(table)?;
    fs::write(path, json).map_err(|e| ReportError::io(path, e))
}

/// Read a results table previously written by [`write_results_json`].
pub fn read_results_json(path: impl AsRef<Path>) -> Result<ResultsTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}
