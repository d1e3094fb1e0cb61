//! Document diffing
//!
//! Path-granularity, whole-subtree-equality drift detection between a
//! freshly built document and a previously recorded baseline.

use super::document::ApiDocument;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Paths that drifted between two documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDiff {
    /// Paths present only in the current document
    pub added: Vec<String>,

    /// Paths present only in the prior document
    pub removed: Vec<String>,

    /// Paths present in both whose full subtree differs
    pub modified: Vec<String>,
}

impl SchemaDiff {
    /// Whether the two documents agree on every path
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Diff a built document against a prior baseline.
///
/// The prior document is raw JSON because baselines come from files written
/// by external exporters; one with no `paths` key is treated as an empty
/// path set, not an error. All three result lists are sorted.
pub fn diff_documents(current: &ApiDocument, prior: &JsonValue) -> SchemaDiff {
    static EMPTY: once_cell::sync::Lazy<serde_json::Map<String, JsonValue>> =
        once_cell::sync::Lazy::new(serde_json::Map::new);

    let prior_paths = prior
        .get("paths")
        .and_then(JsonValue::as_object)
        .unwrap_or(&EMPTY);

    let added = current
        .paths
        .keys()
        .filter(|path| !prior_paths.contains_key(*path))
        .cloned()
        .collect();

    let mut removed: Vec<String> = prior_paths
        .keys()
        .filter(|path| !current.paths.contains_key(*path))
        .cloned()
        .collect();
    removed.sort();

    let modified = current
        .paths
        .iter()
        .filter_map(|(path, operations)| {
            let prior_subtree = prior_paths.get(path)?;
            let current_subtree = serde_json::to_value(operations).unwrap_or_default();
            (current_subtree != *prior_subtree).then(|| path.clone())
        })
        .collect();

    SchemaDiff {
        added,
        removed,
        modified,
    }
}
