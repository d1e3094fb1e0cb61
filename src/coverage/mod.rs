//! Endpoint call-coverage tracking
//!
//! Tracks, per category, which (method, path) endpoints have been exercised:
//! call counts, last status, last call time, and a running average latency.
//! Categories keep their insertion order so category resolution for
//! uncatalogued observations is deterministic.

mod ledger;
mod types;

pub use ledger::{CoverageLedger, COVERAGE_STATE_KEY, FALLBACK_CATEGORY};
pub use types::{CategoryCoverage, CoverageEntry, CoverageStats};
