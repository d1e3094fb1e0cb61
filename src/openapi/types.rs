//! Schema store types
//!
//! These types are serialized to JSON and persisted between sessions.

use crate::infer::InferredSchema;
use crate::types::{JsonValue, Method};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many literal examples are retained per status bucket
pub const MAX_EXAMPLES: usize = 3;

static STATUS_DESCRIPTIONS: Lazy<BTreeMap<u16, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (200, "Successful response"),
        (201, "Created"),
        (204, "No content"),
        (301, "Moved permanently"),
        (302, "Found"),
        (400, "Bad request"),
        (401, "Unauthorized"),
        (403, "Forbidden"),
        (404, "Not found"),
        (429, "Too many requests"),
        (500, "Internal server error"),
        (502, "Bad gateway"),
        (503, "Service unavailable"),
    ])
});

/// Human-readable description for a status code, with an `"HTTP <status>"`
/// fallback for codes not in the table (including 0 for network failures)
pub fn status_description(status: u16) -> String {
    STATUS_DESCRIPTIONS
        .get(&status)
        .map_or_else(|| format!("HTTP {status}"), ToString::to_string)
}

/// One observed request/response pair, as handed to the schema store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSample {
    /// Response status; 0 marks a network failure
    pub status: u16,

    /// Response body as parsed JSON (non-JSON bodies arrive as strings)
    pub body: JsonValue,

    /// Round-trip latency, when the interceptor measured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
}

impl ResponseSample {
    /// Create a sample without a latency reading
    pub fn new(status: u16, body: JsonValue) -> Self {
        Self {
            status,
            body,
            latency_ms: None,
        }
    }

    /// Attach a latency reading
    #[must_use]
    pub fn with_latency(mut self, latency_ms: f64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }
}

/// A captured literal response body with its capture time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseExample {
    /// When the sample was observed
    pub timestamp: DateTime<Utc>,

    /// The literal response body
    pub value: JsonValue,

    /// Latency of the sampled exchange
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
}

/// Accumulated data for one response status of one endpoint.
///
/// The schema is frozen at the first observation of the status code; later
/// samples of the same status only grow the example list, up to
/// [`MAX_EXAMPLES`]. This single-sample freeze is deliberate, observable
/// behavior (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    /// Status description from the static table
    pub description: String,

    /// Schema inferred from the first sample of this status
    pub schema: InferredSchema,

    /// Up to three literal samples, first-come-first-kept
    #[serde(default)]
    pub examples: Vec<ResponseExample>,
}

impl ResponseRecord {
    /// Create a record from the first sample of a status bucket
    pub fn from_first_sample(sample: &ResponseSample, now: DateTime<Utc>) -> Self {
        let mut record = Self {
            description: status_description(sample.status),
            schema: crate::infer::infer(&sample.body),
            examples: Vec::new(),
        };
        record.push_example(sample, now);
        record
    }

    /// Append an example unless the cap is reached (no replacement)
    pub fn push_example(&mut self, sample: &ResponseSample, now: DateTime<Utc>) {
        if self.examples.len() < MAX_EXAMPLES {
            self.examples.push(ResponseExample {
                timestamp: now,
                value: sample.body.clone(),
                latency_ms: sample.latency_ms,
            });
        }
    }
}

/// Everything observed about one (method, path) endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    /// HTTP method
    pub method: Method,

    /// URL path, including any query string
    pub path: String,

    /// Per-status response buckets
    #[serde(default)]
    pub responses: BTreeMap<u16, ResponseRecord>,

    /// Total samples observed, across all statuses
    #[serde(default)]
    pub response_count: u64,

    /// Optional operation summary for the built document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Optional request body description, when a producer supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<JsonValue>,

    /// Optional parameter descriptions, when a producer supplied them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<JsonValue>>,
}

impl EndpointRecord {
    /// Create an empty record for an endpoint
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            responses: BTreeMap::new(),
            response_count: 0,
            summary: None,
            request_body: None,
            parameters: None,
        }
    }

    /// Record one sample: create the status bucket on first sight,
    /// otherwise only grow its example list. Always bumps the count.
    pub fn record_sample(&mut self, sample: &ResponseSample, now: DateTime<Utc>) {
        self.responses
            .entry(sample.status)
            .and_modify(|record| record.push_example(sample, now))
            .or_insert_with(|| ResponseRecord::from_first_sample(sample, now));
        self.response_count += 1;
    }

    /// Derived operation id: lowercased method, path slashes as underscores
    pub fn operation_id(&self) -> String {
        format!("{}_{}", self.method.as_lower(), self.path.replace('/', "_"))
    }

    /// Operation summary, falling back to `"<METHOD> <path>"`
    pub fn summary_or_default(&self) -> String {
        self.summary
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.method, self.path))
    }
}
