// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for report generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while aggregating summaries or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report directory does not exist or is not a directory
    #[error("Directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    /// No `*-summary.json` candidates in the report directory
    #[error("No summary JSON files found in {}", .0.display())]
    NoSummariesFound(PathBuf),

    /// No line of the file decodes to an object with a `metrics` key
    #[error("No valid k6 summary found in {}", .0.display())]
    NoValidSummary(PathBuf),

    /// The adapter name derived from the file name is empty
    #[error("Cannot derive an adapter name from {}", .0.display())]
    InvalidAdapterName(PathBuf),

    /// Every candidate file failed to parse
    #[error("No valid results parsed in {}", .0.display())]
    NoValidResults(PathBuf),

    /// The renderer was handed an empty results table
    #[error("Cannot render a report without results")]
    EmptyResults,

    /// Filesystem error on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid report configuration file
    #[error("Invalid configuration in {}: {message}", path.display())]
    Config {
        /// Configuration file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// JSON export failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error only affects a single summary file.
    ///
    /// Per-file errors are skipped during aggregation; everything else aborts
    /// the run.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            ReportError::NoValidSummary(_)
                | ReportError::InvalidAdapterName(_)
                | ReportError::Io { .. }
        )
    }
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = ReportError::NoValidSummary(PathBuf::from("reports/a-1-summary.json"));
        assert_eq!(
            err.to_string(),
            "No valid k6 summary found in reports/a-1-summary.json"
        );

        let err = ReportError::DirectoryNotFound(PathBuf::from("missing"));
        assert_eq!(err.to_string(), "Directory missing does not exist");
    }

    #[test]
    fn test_per_file_classification() {
        assert!(ReportError::NoValidSummary(PathBuf::from("x")).is_per_file());
        assert!(ReportError::InvalidAdapterName(PathBuf::from("x")).is_per_file());
        assert!(!ReportError::NoValidResults(PathBuf::from("x")).is_per_file());
        assert!(!ReportError::EmptyResults.is_per_file());
    }
}
