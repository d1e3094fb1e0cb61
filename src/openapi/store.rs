//! Schema store implementation
//!
//! Accumulates endpoint records from observed traffic and persists them
//! after every mutation. In-memory state stays authoritative when a save
//! fails; the observation pipeline is never failed.

use super::diff::{diff_documents, SchemaDiff};
use super::document::{ApiDocument, DocumentMeta};
use super::types::{EndpointRecord, ResponseSample};
use crate::error::{Error, Result};
use crate::persist::StateStore;
use crate::types::{EndpointKey, JsonValue, Method};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Blob id for the persisted endpoint records
pub const SCHEMA_STATE_KEY: &str = "openapi-schema";

/// Accumulates per-endpoint response schemas from observed traffic.
///
/// Single-writer: all mutating calls must be serialized by the caller.
#[derive(Debug)]
pub struct SchemaStore {
    endpoints: BTreeMap<EndpointKey, EndpointRecord>,
    meta: DocumentMeta,
    store: Arc<dyn StateStore>,
}

impl SchemaStore {
    /// Create a store backed by the given state store, loading any
    /// previously persisted records.
    ///
    /// A missing or corrupt blob leaves the store empty; the failure is
    /// logged, never surfaced.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self::with_meta(store, DocumentMeta::default())
    }

    /// Create a store with custom document metadata
    pub fn with_meta(store: Arc<dyn StateStore>, meta: DocumentMeta) -> Self {
        let endpoints = match Self::load_state(store.as_ref()) {
            Ok(endpoints) => endpoints,
            Err(e) => {
                warn!(error = %e, "failed to load schema state, starting empty");
                BTreeMap::new()
            }
        };

        Self {
            endpoints,
            meta,
            store,
        }
    }

    fn load_state(store: &dyn StateStore) -> Result<BTreeMap<EndpointKey, EndpointRecord>> {
        match store.load(SCHEMA_STATE_KEY)? {
            Some(blob) => serde_json::from_str(&blob)
                .map_err(|e| Error::corrupt_state(SCHEMA_STATE_KEY, e.to_string())),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Record one observed response for an endpoint.
    ///
    /// A new status bucket freezes its schema from this sample; an existing
    /// bucket only grows its example list (capped, no replacement). The
    /// per-endpoint sample count always increments.
    pub fn add_endpoint(&mut self, path: &str, method: Method, sample: &ResponseSample) {
        let key = EndpointKey::new(method, path);
        self.endpoints
            .entry(key)
            .or_insert_with(|| EndpointRecord::new(method, path))
            .record_sample(sample, Utc::now());
        self.persist();
    }

    /// All accumulated endpoint records, in key order
    pub fn get_endpoints(&self) -> Vec<&EndpointRecord> {
        self.endpoints.values().collect()
    }

    /// Look up the record for one endpoint
    pub fn get_endpoint(&self, key: &EndpointKey) -> Option<&EndpointRecord> {
        self.endpoints.get(key)
    }

    /// Number of tracked endpoints
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Whether no endpoints have been recorded
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Build a fresh document from the current records.
    ///
    /// Deterministic given store state; nothing is cached, so callers that
    /// need a stable snapshot must keep the returned document.
    pub fn build(&self) -> ApiDocument {
        ApiDocument::assemble(&self.meta, self.endpoints.values())
    }

    /// Diff the current `build()` output against a prior document
    pub fn diff(&self, prior: &JsonValue) -> SchemaDiff {
        diff_documents(&self.build(), prior)
    }

    /// Empty the record map and persist
    pub fn clear(&mut self) {
        self.endpoints.clear();
        self.persist();
    }

    /// Document metadata used by `build()`
    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.endpoints) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "failed to serialize schema state");
                return;
            }
        };

        if let Err(e) = self.store.save(SCHEMA_STATE_KEY, &blob) {
            warn!(error = %e, "failed to persist schema state");
        }
    }
}
