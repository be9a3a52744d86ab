// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! Discovery and aggregation of summary files.
//!
//! Every regular file in the report directory whose name ends with
//! [`SUMMARY_SUFFIX`] is a candidate. The adapter name is the part of the file
//! name before the first `-`, so `spring_vt-20240101_120000-summary.json`
//! belongs to `spring_vt`.
//!
//! Candidates are processed in lexical path order. When two files map to the
//! same adapter the later one replaces the earlier one. A file that cannot be
//! read or parsed is skipped; the run only fails if no file succeeds.

use crate::error::{ReportError, Result};
use crate::result::{MetricSet, ResultsTable};
use crate::summary;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name suffix of k6 summary files.
pub const SUMMARY_SUFFIX: &str = "-summary.json";

/// What happened to one candidate file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file produced a metric set for `adapter`.
    Parsed {
        /// Adapter name derived from the file name
        adapter: String,
        /// Summary file
        path: PathBuf,
    },
    /// The file was skipped.
    Skipped {
        /// Summary file
        path: PathBuf,
        /// Why it was skipped
        error: ReportError,
    },
}

/// Result of aggregating a report directory.
#[derive(Debug)]
pub struct Aggregation {
    /// Adapter metrics, one entry per surviving adapter name
    pub table: ResultsTable,
    /// Per-candidate outcomes in processing order
    pub outcomes: Vec<FileOutcome>,
}

impl Aggregation {
    /// Number of candidate files that were considered.
    pub fn candidates(&self) -> usize {
        self.outcomes.len()
    }

    /// Candidates that were skipped.
    pub fn skipped(&self) -> impl Iterator<Item = (&Path, &ReportError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Skipped { path, error } => Some((path.as_path(), error)),
            FileOutcome::Parsed { .. } => None,
        })
    }
}

/// Derive the adapter name from a summary file path.
///
/// Returns `None` when the name before the first `-` is empty or the file name
/// is not valid UTF-8.
pub fn adapter_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".json").unwrap_or(name);
    stem.split('-').next().filter(|adapter| !adapter.is_empty())
}

/// List candidate summary files in lexical order.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReportError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ReportError::io(dir, e))? {
        let path = entry.map_err(|e| ReportError::io(dir, e))?.path();
        let is_summary = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(SUMMARY_SUFFIX));
        if is_summary && path.is_file() {
            candidates.push(path);
        }
    }

    if candidates.is_empty() {
        return Err(ReportError::NoSummariesFound(dir.to_path_buf()));
    }

    candidates.sort();
    Ok(candidates)
}

/// Read one summary file and extract its adapter name and metrics.
pub fn load_file(path: &Path) -> Result<(String, MetricSet)> {
    let adapter =
        adapter_name(path).ok_or_else(|| ReportError::InvalidAdapterName(path.to_path_buf()))?;
    let raw = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    let doc = summary::parse(&raw, path)?;
    Ok((adapter.to_string(), MetricSet::extract(&doc)))
}

/// Aggregate a report directory, keeping per-file outcomes.
pub fn collect(dir: &Path) -> Result<Aggregation> {
    let candidates = discover(dir)?;
    debug!(dir = %dir.display(), count = candidates.len(), "discovered summary files");

    let mut table = ResultsTable::new();
    let mut outcomes = Vec::with_capacity(candidates.len());

    for path in candidates {
        match load_file(&path) {
            Ok((adapter, metrics)) => {
                if table.insert(adapter.clone(), metrics).is_some() {
                    warn!(adapter = %adapter, file = %path.display(), "duplicate adapter, replacing earlier result");
                }
                info!(adapter = %adapter, file = %path.display(), "parsed summary");
                outcomes.push(FileOutcome::Parsed { adapter, path });
            }
            Err(error) if error.is_per_file() => {
                warn!(file = %path.display(), error = %error, "skipping summary file");
                outcomes.push(FileOutcome::Skipped { path, error });
            }
            Err(error) => return Err(error),
        }
    }

    if table.is_empty() {
        return Err(ReportError::NoValidResults(dir.to_path_buf()));
    }

    Ok(Aggregation { table, outcomes })
}

/// Aggregate a report directory into a results table.
pub fn aggregate(dir: impl AsRef<Path>) -> Result<ResultsTable> {
    collect(dir.as_ref()).map(|aggregation| aggregation.table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_name() {
        let name = |s: &str| adapter_name(Path::new(s)).map(str::to_string);
        assert_eq!(
            name("reports/spring_vt-20240101_120000-summary.json").as_deref(),
            Some("spring_vt")
        );
        assert_eq!(name("a-X-summary.json").as_deref(), Some("a"));
        assert_eq!(name("-summary.json"), None);
        assert_eq!(name("--summary.json"), None);
    }

    #[test]
    fn test_discover_missing_directory() {
        let err = discover(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ReportError::DirectoryNotFound(_)));
    }
}
