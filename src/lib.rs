//! # apiscribe
//!
//! Schema-inference and coverage-tracking engine for captured HTTP API
//! traffic. An external interceptor feeds observed request/response tuples
//! into the core, which incrementally builds a per-category call-coverage
//! ledger and an OpenAPI 3.1 document, with deterministic drift detection
//! against a prior baseline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apiscribe::{FileStore, Observation, Recorder};
//! use std::sync::Arc;
//!
//! let mut recorder = Recorder::new(Arc::new(FileStore::new("state")));
//!
//! // One call per completed exchange, straight from the interceptor
//! recorder.observe(
//!     &Observation::new(
//!         "GET",
//!         "https://app.example.com/rest/ping",
//!         200,
//!         serde_json::json!({"ok": true}),
//!     )
//!     .with_latency(42.0),
//! );
//!
//! let stats = recorder.ledger().get_stats();
//! let document = recorder.store().build();
//! let drift = recorder.store().diff(&document.to_json());
//! assert!(drift.is_empty());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Interceptor (external)                      │
//! │        observe(method, url, status, body, latency)              │
//! └───────────────────────────────┬─────────────────────────────────┘
//!                                 │
//! ┌──────────────┬────────────────┴──────────────┬─────────────────┐
//! │   Coverage   │          Schema Store         │    Catalog      │
//! ├──────────────┼───────────────────────────────┼─────────────────┤
//! │ mark_called  │ add_endpoint  → infer()       │ YAML/JSON seed  │
//! │ get_stats    │ build() → OpenAPI document    │ ordered groups  │
//! │ reset        │ diff()  → added/removed/mod   │                 │
//! └──────┬───────┴───────────────┬───────────────┴─────────────────┘
//!        │                       │
//! ┌──────┴───────────────────────┴──────────────────────────────────┐
//! │            Persistence (StateStore: file or memory)             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Structural type inference from JSON samples
pub mod infer;

/// Endpoint call-coverage tracking
pub mod coverage;

/// Schema store, OpenAPI document assembly, and drift detection
pub mod openapi;

/// Persistence adapters
pub mod persist;

/// Endpoint catalogs
pub mod catalog;

/// Observation boundary for interceptors
pub mod capture;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{EndpointKey, JsonObject, JsonValue, Method};

pub use capture::{derive_path, Observation, Recorder};
pub use catalog::{CatalogCategory, CatalogEndpoint, EndpointCatalog};
pub use coverage::{CoverageEntry, CoverageLedger, CoverageStats};
pub use infer::{infer, InferredSchema};
pub use openapi::{ApiDocument, DocumentMeta, ResponseSample, SchemaDiff, SchemaStore};
pub use persist::{FileStore, MemoryStore, StateStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
