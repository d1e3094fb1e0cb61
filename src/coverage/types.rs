//! Coverage types
//!
//! These types are serialized to JSON and persisted between sessions.

use crate::types::EndpointKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Call history for a single endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageEntry {
    /// Whether the endpoint has been called at least once
    #[serde(default)]
    pub called: bool,

    /// Total number of recorded calls
    #[serde(default)]
    pub call_count: u64,

    /// Time of the most recent call
    #[serde(default)]
    pub last_called: Option<DateTime<Utc>>,

    /// Status of the most recent call
    #[serde(default)]
    pub last_status: Option<u16>,

    /// Arithmetic mean of all latencies ever recorded for this endpoint
    #[serde(default)]
    pub avg_latency_ms: f64,
}

impl CoverageEntry {
    /// Create a new zeroed entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call against this entry.
    ///
    /// The latency average is an incremental running mean, not a decayed
    /// average; calls without a latency reading leave the mean untouched.
    pub fn record_call(&mut self, status: u16, latency_ms: Option<f64>, now: DateTime<Utc>) {
        self.called = true;
        self.call_count += 1;
        self.last_called = Some(now);
        self.last_status = Some(status);

        if let Some(latency) = latency_ms {
            let count = self.call_count as f64;
            self.avg_latency_ms = (self.avg_latency_ms * (count - 1.0) + latency) / count;
        }
    }
}

/// Aggregate stats for one category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStats {
    /// Number of endpoints registered in the category
    pub total: usize,

    /// Number of endpoints called at least once
    pub called: usize,

    /// Rounded percentage of endpoints called; 0 when the category is empty
    pub coverage_pct: u32,
}

impl CoverageStats {
    /// Compute stats from counts
    pub fn from_counts(total: usize, called: usize) -> Self {
        let coverage_pct = if total == 0 {
            0
        } else {
            ((called as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            total,
            called,
            coverage_pct,
        }
    }
}

/// A named category and its endpoint coverage entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCoverage {
    /// Category label
    pub name: String,

    /// Per-endpoint call history, keyed by `"METHOD path"`
    pub endpoints: BTreeMap<EndpointKey, CoverageEntry>,
}

impl CategoryCoverage {
    /// Create an empty category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoints: BTreeMap::new(),
        }
    }

    /// Compute aggregate stats for this category
    pub fn stats(&self) -> CoverageStats {
        let total = self.endpoints.len();
        let called = self.endpoints.values().filter(|e| e.called).count();
        CoverageStats::from_counts(total, called)
    }
}
