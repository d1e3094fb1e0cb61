//! Observation boundary
//!
//! The interceptor side of the system calls [`Recorder::observe`] once per
//! completed request/response pair. The recorder derives the endpoint path
//! from the observed URL and forwards the exchange to both the coverage
//! ledger and the schema store. Nothing here ever fails the interceptor
//! pipeline: malformed observations are logged and dropped.

use crate::catalog::EndpointCatalog;
use crate::coverage::CoverageLedger;
use crate::openapi::{DocumentMeta, ResponseSample, SchemaStore};
use crate::persist::StateStore;
use crate::types::{JsonValue, Method};
use std::sync::Arc;
use tracing::warn;
use url::Url;

/// One completed request/response exchange, as reported by an interceptor.
///
/// Network failures arrive with `status = 0` and an error object body.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// HTTP method as reported (any case)
    pub method: String,

    /// Full URL or bare path of the request
    pub url: String,

    /// Response status, or 0 for a network failure
    pub status: u16,

    /// Response body; non-JSON payloads are passed through as strings
    pub body: JsonValue,

    /// Measured round-trip latency, when available
    pub latency_ms: Option<f64>,
}

impl Observation {
    /// Create an observation
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        body: JsonValue,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
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

    /// Create a network-failure observation (status 0, error body)
    pub fn failure(method: impl Into<String>, url: impl Into<String>, error: &str) -> Self {
        Self::new(method, url, 0, serde_json::json!({ "error": error }))
    }
}

/// Derive `pathname + search` from an observed URL.
///
/// Bare paths (no scheme) pass through unchanged, so interceptors may
/// report either form. Origin filtering is the interceptor's job.
pub fn derive_path(url: &str) -> String {
    match Url::parse(url) {
        // A trailing bare "?" parses as an empty query; treat it as absent
        Ok(parsed) => match parsed.query().filter(|q| !q.is_empty()) {
            Some(query) => format!("{}?{query}", parsed.path()),
            None => parsed.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// Feeds observed exchanges into a coverage ledger and a schema store
#[derive(Debug)]
pub struct Recorder {
    ledger: CoverageLedger,
    store: SchemaStore,
}

impl Recorder {
    /// Create a recorder over a shared state store
    pub fn new(state: Arc<dyn StateStore>) -> Self {
        Self {
            ledger: CoverageLedger::new(Arc::clone(&state)),
            store: SchemaStore::new(state),
        }
    }

    /// Create a recorder with custom document metadata
    pub fn with_meta(state: Arc<dyn StateStore>, meta: DocumentMeta) -> Self {
        Self {
            ledger: CoverageLedger::new(Arc::clone(&state)),
            store: SchemaStore::with_meta(state, meta),
        }
    }

    /// Seed the ledger from a catalog (idempotent)
    pub fn seed_catalog(&mut self, catalog: &EndpointCatalog) {
        catalog.seed(&mut self.ledger);
    }

    /// Record one observed exchange.
    ///
    /// Observations with an unrecognized HTTP method are logged and dropped;
    /// everything else updates both the ledger and the store.
    pub fn observe(&mut self, observation: &Observation) {
        let method: Method = match observation.method.parse() {
            Ok(method) => method,
            Err(e) => {
                warn!(error = %e, url = %observation.url, "dropping observation");
                return;
            }
        };

        let path = derive_path(&observation.url);

        self.ledger
            .mark_called(method, &path, observation.status, observation.latency_ms);

        let sample = ResponseSample {
            status: observation.status,
            body: observation.body.clone(),
            latency_ms: observation.latency_ms,
        };
        self.store.add_endpoint(&path, method, &sample);
    }

    /// The coverage ledger
    pub fn ledger(&self) -> &CoverageLedger {
        &self.ledger
    }

    /// Mutable access to the coverage ledger
    pub fn ledger_mut(&mut self) -> &mut CoverageLedger {
        &mut self.ledger
    }

    /// The schema store
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// Mutable access to the schema store
    pub fn store_mut(&mut self) -> &mut SchemaStore {
        &mut self.store
    }

    /// Clear both the ledger and the store
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.store.clear();
    }
}
