// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! Static report text: title, scenario line and environment footer.
//!
//! The defaults describe the reference harness. A TOML file can replace any
//! of the three fields:
//!
//! ```toml
//! title = "DB Performance Comparison Report"
//! scenario = "10M Orders JOIN Query (1 CPU, 1GB RAM per service)"
//! environment = [
//!     "**PostgreSQL**: 2 CPU, 2GB RAM",
//! ]
//! ```

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default report title.
pub const DEFAULT_TITLE: &str = "DB Performance Comparison Report";

/// Default scenario description.
pub const DEFAULT_SCENARIO: &str = "10M Orders JOIN Query (1 CPU, 1GB RAM per service)";

/// Default environment footer lines.
pub const DEFAULT_ENVIRONMENT: &[&str] = &[
    "**PostgreSQL**: 2 CPU, 2GB RAM",
    "**Spring Apps**: 1 CPU, 1GB RAM (each)",
    "**Data**: 10M orders, 1M customers, 10K products",
    "**Query**: 3-way JOIN with status filter and pagination",
    "**K6 Load**: 20 VUs, 2 minutes steady state",
];

/// Fixed, input-independent text of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Top-level heading
    pub title: String,
    /// Test scenario line under the heading
    pub scenario: String,
    /// Environment footer, one bullet per entry, rendered verbatim
    pub environment: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            scenario: DEFAULT_SCENARIO.to_string(),
            environment: DEFAULT_ENVIRONMENT.iter().map(|line| line.to_string()).collect(),
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from TOML text. Absent fields keep their defaults.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        Self::from_toml_str(&text, path)
    }
}
