//! OpenAPI document types and assembly
//!
//! Documents are derived fresh from the schema store on every build; they
//! are exported, never persisted. All maps are `BTreeMap`, so a built
//! document always serializes with the same key order.

use super::types::{EndpointRecord, ResponseExample};
use crate::infer::InferredSchema;
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const OPENAPI_VERSION: &str = "3.1.0";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Title, version, and server metadata stamped onto built documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document title
    pub title: String,

    /// Document version
    pub version: String,

    /// Document description
    pub description: String,

    /// Server URLs listed in the document
    pub servers: Vec<String>,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            title: "Captured API".to_string(),
            version: "1.0.0".to_string(),
            description: "Auto-generated OpenAPI document from live traffic capture".to_string(),
            servers: Vec::new(),
        }
    }
}

impl DocumentMeta {
    /// Set the document title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the document version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the document description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a server URL
    #[must_use]
    pub fn with_server(mut self, url: impl Into<String>) -> Self {
        self.servers.push(url.into());
        self
    }
}

/// `info` section of a built document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

/// One entry of the `servers` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub url: String,
}

/// Media-type object holding the frozen schema and captured examples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: InferredSchema,
    #[serde(default)]
    pub examples: Vec<ResponseExample>,
}

/// Response object for one status code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub description: String,
    pub content: BTreeMap<String, MediaType>,
}

/// One operation under a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub summary: String,
    pub operation_id: String,
    pub responses: BTreeMap<String, ResponseObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<JsonValue>>,
}

/// A built OpenAPI-style document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDocument {
    pub openapi: String,
    pub info: DocumentInfo,
    pub servers: Vec<ServerEntry>,
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
}

impl ApiDocument {
    /// Assemble a document from endpoint records
    pub fn assemble<'a>(
        meta: &DocumentMeta,
        records: impl IntoIterator<Item = &'a EndpointRecord>,
    ) -> Self {
        let mut paths: BTreeMap<String, BTreeMap<String, Operation>> = BTreeMap::new();

        for record in records {
            let responses = record
                .responses
                .iter()
                .map(|(status, bucket)| {
                    let media = MediaType {
                        schema: bucket.schema.clone(),
                        examples: bucket.examples.clone(),
                    };
                    let response = ResponseObject {
                        description: bucket.description.clone(),
                        content: BTreeMap::from([(JSON_MEDIA_TYPE.to_string(), media)]),
                    };
                    (status.to_string(), response)
                })
                .collect();

            let operation = Operation {
                summary: record.summary_or_default(),
                operation_id: record.operation_id(),
                responses,
                request_body: record.request_body.clone(),
                parameters: record.parameters.clone(),
            };

            paths
                .entry(record.path.clone())
                .or_default()
                .insert(record.method.as_lower().to_string(), operation);
        }

        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info: DocumentInfo {
                title: meta.title.clone(),
                version: meta.version.clone(),
                description: meta.description.clone(),
            },
            servers: meta
                .servers
                .iter()
                .map(|url| ServerEntry { url: url.clone() })
                .collect(),
            paths,
        }
    }

    /// Serialize to a JSON value (canonical key order)
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Serialize to a pretty JSON string for export
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Serialize to YAML for OpenAPI tooling
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_default()
    }
}
