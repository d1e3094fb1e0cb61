//! Coverage ledger implementation
//!
//! Bookkeeping over a catalogued endpoint set plus freeform discoveries.
//! The in-memory state is authoritative; persistence failures are logged
//! and swallowed so the observation pipeline never fails.

use super::types::{CategoryCoverage, CoverageEntry, CoverageStats};
use crate::error::{Error, Result};
use crate::persist::StateStore;
use crate::types::{EndpointKey, Method};
use chrono::Utc;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Blob id for the persisted coverage state
pub const COVERAGE_STATE_KEY: &str = "api-coverage";

/// Category assigned to observations that match no registered category
pub const FALLBACK_CATEGORY: &str = "other";

/// Insertion-ordered category list.
///
/// Persisted as `{category: {"METHOD path": entry}}`; document order is the
/// insertion order, so first-match category resolution survives a reload.
#[derive(Debug, Clone, Default, PartialEq)]
struct CoverageState {
    categories: Vec<CategoryCoverage>,
}

impl Serialize for CoverageState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.endpoints)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CoverageState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct StateVisitor;

        impl<'de> Visitor<'de> for StateVisitor {
            type Value = CoverageState;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to endpoint coverage entries")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, endpoints)) =
                    access.next_entry::<String, BTreeMap<EndpointKey, CoverageEntry>>()?
                {
                    categories.push(CategoryCoverage { name, endpoints });
                }
                Ok(CoverageState { categories })
            }
        }

        deserializer.deserialize_map(StateVisitor)
    }
}

/// Tracks which catalogued endpoints have been exercised, per category.
///
/// Single-writer: all mutating calls must be serialized by the caller.
#[derive(Debug)]
pub struct CoverageLedger {
    state: CoverageState,
    store: Arc<dyn StateStore>,
}

impl CoverageLedger {
    /// Create a ledger backed by the given state store, loading any
    /// previously persisted coverage.
    ///
    /// A missing or corrupt blob leaves the ledger empty; the failure is
    /// logged, never surfaced.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        let state = match Self::load_state(store.as_ref()) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "failed to load coverage state, starting empty");
                CoverageState::default()
            }
        };

        Self { state, store }
    }

    fn load_state(store: &dyn StateStore) -> Result<CoverageState> {
        match store.load(COVERAGE_STATE_KEY)? {
            Some(blob) => serde_json::from_str(&blob)
                .map_err(|e| Error::corrupt_state(COVERAGE_STATE_KEY, e.to_string())),
            None => Ok(CoverageState::default()),
        }
    }

    /// Idempotently register a category and its endpoints.
    ///
    /// Existing entries are never overwritten, so call history survives
    /// re-seeding after a catalog reload.
    pub fn init_category(&mut self, category: &str, endpoints: &[EndpointKey]) {
        let index = self.category_index(category);
        let category = &mut self.state.categories[index];
        for key in endpoints {
            category.endpoints.entry(key.clone()).or_default();
        }
        self.persist();
    }

    /// Record one observed call.
    ///
    /// Category resolution scans registered categories in insertion order
    /// and takes the first one containing the key; unmatched keys land in
    /// the `"other"` category with a fresh entry.
    pub fn mark_called(
        &mut self,
        method: Method,
        path: &str,
        status: u16,
        latency_ms: Option<f64>,
    ) {
        let key = EndpointKey::new(method, path);

        // Linear scan, first match wins; unmatched keys go to "other"
        let matched = self
            .state
            .categories
            .iter()
            .position(|c| c.endpoints.contains_key(&key));
        let index = match matched {
            Some(index) => index,
            None => {
                debug!(%key, "uncatalogued endpoint, tracking under fallback category");
                self.category_index(FALLBACK_CATEGORY)
            }
        };

        self.state.categories[index]
            .endpoints
            .entry(key)
            .or_default()
            .record_call(status, latency_ms, Utc::now());
        self.persist();
    }

    /// Aggregate stats per category, in a stable (sorted) order
    pub fn get_stats(&self) -> BTreeMap<String, CoverageStats> {
        self.state
            .categories
            .iter()
            .map(|c| (c.name.clone(), c.stats()))
            .collect()
    }

    /// The raw per-category coverage map, in registration order
    pub fn get_coverage(&self) -> &[CategoryCoverage] {
        &self.state.categories
    }

    /// Look up the entry for an endpoint, searching categories in order
    pub fn get_entry(&self, key: &EndpointKey) -> Option<&CoverageEntry> {
        self.state
            .categories
            .iter()
            .find_map(|c| c.endpoints.get(key))
    }

    /// Clear all categories and persist the empty state
    pub fn reset(&mut self) {
        self.state = CoverageState::default();
        self.persist();
    }

    fn category_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.state.categories.iter().position(|c| c.name == name) {
            return index;
        }
        self.state.categories.push(CategoryCoverage::new(name));
        self.state.categories.len() - 1
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.state) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "failed to serialize coverage state");
                return;
            }
        };

        if let Err(e) = self.store.save(COVERAGE_STATE_KEY, &blob) {
            warn!(error = %e, "failed to persist coverage state");
        }
    }
}
