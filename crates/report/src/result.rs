// Copyright 2025 k6-compare Contributors
// SPDX-License-Identifier: Apache-2.0

//! Extracted metrics and the per-run results table.
//!
//! [`MetricSet`] is the fixed set of indicators pulled out of one k6 summary;
//! [`ResultsTable`] maps adapter names to them and provides the orderings the
//! report needs.

use crate::summary::SummaryDocument;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// JSON pointers into a k6 summary document.
pub mod pointers {
    /// Median request duration.
    pub const P50: &str = "/metrics/http_req_duration/values/p(50)";
    /// 95th percentile request duration.
    pub const P95: &str = "/metrics/http_req_duration/values/p(95)";
    /// 99th percentile request duration.
    pub const P99: &str = "/metrics/http_req_duration/values/p(99)";
    /// Mean request duration.
    pub const AVG: &str = "/metrics/http_req_duration/values/avg";
    /// Fastest request.
    pub const MIN: &str = "/metrics/http_req_duration/values/min";
    /// Slowest request.
    pub const MAX: &str = "/metrics/http_req_duration/values/max";
    /// Requests per second.
    pub const RPS: &str = "/metrics/http_reqs/values/rate";
    /// Total request count.
    pub const COUNT: &str = "/metrics/http_reqs/values/count";
    /// Fraction of failed requests, in `[0, 1]`.
    pub const FAILED_RATE: &str = "/metrics/http_req_failed/values/rate";
}

/// Latency, throughput and error indicators for one adapter.
///
/// Latencies are milliseconds as reported by k6. `error_rate` is a percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Median latency
    pub p50: f64,
    /// 95th percentile latency
    pub p95: f64,
    /// 99th percentile latency
    pub p99: f64,
    /// Mean latency
    pub avg: f64,
    /// Minimum latency
    pub min: f64,
    /// Maximum latency
    pub max: f64,
    /// Requests per second
    pub rps: f64,
    /// Number of requests issued
    pub total_requests: u64,
    /// Failed requests, in percent
    pub error_rate: f64,
}

impl MetricSet {
    /// Extract the metric set from a summary document.
    ///
    /// Missing or non-numeric fields read as zero. Values are not range-checked.
    pub fn extract(doc: &SummaryDocument) -> Self {
        let read = |pointer: &str| doc.number(pointer).unwrap_or(0.0);

        Self {
            p50: read(pointers::P50),
            p95: read(pointers::P95),
            p99: read(pointers::P99),
            avg: read(pointers::AVG),
            min: read(pointers::MIN),
            max: read(pointers::MAX),
            rps: read(pointers::RPS),
            // float-to-int casts truncate and saturate at zero
            total_requests: read(pointers::COUNT) as u64,
            error_rate: read(pointers::FAILED_RATE) * 100.0,
        }
    }
}

/// Extract the metric set from a summary document.
pub fn extract(doc: &SummaryDocument) -> MetricSet {
    MetricSet::extract(doc)
}

/// Adapter name to metrics for one report run.
///
/// Iteration is always in lexical adapter order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsTable {
    entries: BTreeMap<String, MetricSet>,
}

impl ResultsTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an adapter's metrics, returning the entry it replaced.
    pub fn insert(&mut self, adapter: impl Into<String>, metrics: MetricSet) -> Option<MetricSet> {
        self.entries.insert(adapter.into(), metrics)
    }

    /// Metrics for one adapter.
    pub fn get(&self, adapter: &str) -> Option<&MetricSet> {
        self.entries.get(adapter)
    }

    /// Number of adapters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no adapter has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in lexical adapter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricSet)> {
        self.entries.iter().map(|(name, metrics)| (name.as_str(), metrics))
    }

    /// Entries sorted ascending by `key`, ties in lexical adapter order.
    pub fn sorted_by<F>(&self, key: F) -> Vec<(&str, &MetricSet)>
    where
        F: Fn(&MetricSet) -> f64,
    {
        let mut rows: Vec<_> = self.iter().collect();
        // stable sort keeps the lexical order for equal keys
        rows.sort_by(|(_, a), (_, b)| key(*a).total_cmp(&key(*b)));
        rows
    }

    /// Entries ranked by p95 latency, fastest first.
    pub fn ranked_by_p95(&self) -> Vec<(&str, &MetricSet)> {
        self.sorted_by(|m| m.p95)
    }

    /// Adapter with the lowest p95; the lexically first one on ties.
    pub fn latency_winner(&self) -> Option<(&str, &MetricSet)> {
        self.best_by(|a, b| b.p95.total_cmp(&a.p95))
    }

    /// Adapter with the highest request rate; the lexically first one on ties.
    pub fn throughput_winner(&self) -> Option<(&str, &MetricSet)> {
        self.best_by(|a, b| a.rps.total_cmp(&b.rps))
    }

    // Keeps the first entry unless a later one compares strictly greater.
    fn best_by<F>(&self, compare: F) -> Option<(&str, &MetricSet)>
    where
        F: Fn(&MetricSet, &MetricSet) -> Ordering,
    {
        self.iter().fold(None, |best, candidate| match best {
            Some(current) if compare(candidate.1, current.1) != Ordering::Greater => Some(current),
            _ => Some(candidate),
        })
    }
}

impl FromIterator<(String, MetricSet)> for ResultsTable {
    fn from_iter<I: IntoIterator<Item = (String, MetricSet)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
