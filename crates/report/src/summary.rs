// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! Locating the final summary object in k6 output.
//!
//! k6 may write incremental progress objects before the end-of-test summary,
//! one JSON object per line. The summary is the last line that decodes to an
//! object carrying a top-level `metrics` key.

use crate::error::{ReportError, Result};
use serde_json::Value;
use std::path::Path;

/// Key that marks a line as an end-of-test summary.
pub const METRICS_KEY: &str = "metrics";

/// A decoded k6 summary document.
///
/// Always a JSON object with a `metrics` key; lookups into it are defensive.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryDocument {
    root: Value,
}

impl SummaryDocument {
    /// Wrap a decoded value if it qualifies as a summary.
    pub fn from_value(root: Value) -> Option<Self> {
        let is_summary = root
            .as_object()
            .is_some_and(|object| object.contains_key(METRICS_KEY));
        is_summary.then_some(Self { root })
    }

    /// Look up a numeric value by JSON pointer, `None` if absent or not a number.
    pub fn number(&self, pointer: &str) -> Option<f64> {
        self.root.pointer(pointer).and_then(Value::as_f64)
    }
}

/// Parse the last summary object out of raw k6 output.
///
/// `source` only names the file in the error.
pub fn parse(raw: &str, source: &Path) -> Result<SummaryDocument> {
    raw.lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .find_map(SummaryDocument::from_value)
        .ok_or_else(|| ReportError::NoValidSummary(source.to_path_buf()))
}
