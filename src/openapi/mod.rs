//! Schema store, OpenAPI document assembly, and drift detection
//!
//! Accumulates observed responses per endpoint, freezes one inferred schema
//! per status bucket, builds OpenAPI 3.1 documents from the accumulated
//! records, and diffs built documents against a prior baseline at path
//! granularity.

mod diff;
mod document;
mod store;
mod types;

pub use diff::SchemaDiff;
pub use document::{
    ApiDocument, DocumentInfo, DocumentMeta, MediaType, Operation, ResponseObject, ServerEntry,
};
pub use store::{SchemaStore, SCHEMA_STATE_KEY};
pub use types::{
    status_description, EndpointRecord, ResponseExample, ResponseRecord, ResponseSample,
};

#[cfg(test)]
mod tests;
