//! Endpoint catalogs
//!
//! A catalog is the known endpoint surface of a target application, grouped
//! into ordered categories. Catalogs are loaded from YAML or JSON and seed
//! the coverage ledger; seeding is idempotent and preserves call history.

use crate::coverage::CoverageLedger;
use crate::error::{Error, Result};
use crate::types::{EndpointKey, Method};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One catalogued endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEndpoint {
    /// HTTP method
    pub method: Method,

    /// URL path
    pub path: String,
}

impl CatalogEndpoint {
    /// Create a catalog endpoint
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// The ledger key for this endpoint
    pub fn key(&self) -> EndpointKey {
        EndpointKey::new(self.method, self.path.clone())
    }
}

/// A named, ordered group of endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    /// Category label
    pub name: String,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Endpoints in this category
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

/// A complete endpoint catalog.
///
/// Category order matters: it becomes the ledger's registration order and
/// therefore the first-match resolution order for observed calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCatalog {
    /// Ordered categories
    #[serde(default)]
    pub categories: Vec<CatalogCategory>,
}

impl EndpointCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&contents),
            "json" => Self::from_json_str(&contents),
            other => Err(Error::UnsupportedCatalogFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Total endpoint count across all categories
    pub fn endpoint_count(&self) -> usize {
        self.categories.iter().map(|c| c.endpoints.len()).sum()
    }

    /// Register every category in order with the given ledger
    pub fn seed(&self, ledger: &mut CoverageLedger) {
        for category in &self.categories {
            let keys: Vec<EndpointKey> =
                category.endpoints.iter().map(CatalogEndpoint::key).collect();
            ledger.init_category(&category.name, &keys);
        }
    }

    fn validate(&self) -> Result<()> {
        for category in &self.categories {
            if category.name.is_empty() {
                return Err(Error::catalog("category with empty name"));
            }
            for endpoint in &category.endpoints {
                if endpoint.path.is_empty() {
                    return Err(Error::catalog(format!(
                        "category '{}' has an endpoint with an empty path",
                        category.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use std::sync::Arc;

    const CATALOG_YAML: &str = r"
categories:
  - name: user
    description: Endpoints related to user
    endpoints:
      - method: GET
        path: /rest/user/settings
      - method: GET
        path: /rest/user/info
  - name: thread
    endpoints:
      - method: GET
        path: /rest/thread/list_recent
";

    #[test]
    fn test_catalog_from_yaml() {
        let catalog = EndpointCatalog::from_yaml_str(CATALOG_YAML).unwrap();
        assert_eq!(catalog.categories.len(), 2);
        assert_eq!(catalog.endpoint_count(), 3);
        assert_eq!(catalog.categories[0].name, "user");
        assert_eq!(
            catalog.categories[0].endpoints[1],
            CatalogEndpoint::new(Method::GET, "/rest/user/info")
        );
        assert_eq!(catalog.categories[1].description, None);
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "categories": [
                {"name": "other", "endpoints": [{"method": "GET", "path": "/rest/ping"}]}
            ]
        }"#;
        let catalog = EndpointCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.endpoint_count(), 1);
    }

    #[test]
    fn test_catalog_rejects_empty_names() {
        let yaml = "categories:\n  - name: ''\n    endpoints: []\n";
        assert!(EndpointCatalog::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_catalog_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("catalog.yaml");
        std::fs::write(&yaml_path, CATALOG_YAML).unwrap();
        assert_eq!(
            EndpointCatalog::from_file(&yaml_path).unwrap().endpoint_count(),
            3
        );

        let txt_path = dir.path().join("catalog.txt");
        std::fs::write(&txt_path, CATALOG_YAML).unwrap();
        assert!(matches!(
            EndpointCatalog::from_file(&txt_path),
            Err(Error::UnsupportedCatalogFormat { .. })
        ));
    }

    #[test]
    fn test_seed_registers_in_catalog_order() {
        let catalog = EndpointCatalog::from_yaml_str(CATALOG_YAML).unwrap();
        let mut ledger = CoverageLedger::new(Arc::new(MemoryStore::new()));
        catalog.seed(&mut ledger);

        let coverage = ledger.get_coverage();
        assert_eq!(coverage.len(), 2);
        assert_eq!(coverage[0].name, "user");
        assert_eq!(coverage[0].endpoints.len(), 2);
        assert_eq!(coverage[1].name, "thread");
    }
}
