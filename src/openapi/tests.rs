//! Schema store, document builder, and diff tests

use super::*;
use crate::persist::{MemoryStore, StateStore};
use crate::types::{EndpointKey, Method};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use test_case::test_case;

fn store() -> SchemaStore {
    SchemaStore::new(Arc::new(MemoryStore::new()))
}

#[test]
fn test_add_endpoint_creates_record() {
    let mut store = store();
    store.add_endpoint(
        "/rest/user/info",
        Method::GET,
        &ResponseSample::new(200, json!({"id": 7, "name": "ana"})).with_latency(42.0),
    );

    let key = EndpointKey::new(Method::GET, "/rest/user/info");
    let record = store.get_endpoint(&key).unwrap();
    assert_eq!(record.response_count, 1);
    assert_eq!(record.responses.len(), 1);

    let bucket = &record.responses[&200];
    assert_eq!(bucket.description, "Successful response");
    assert_eq!(bucket.examples.len(), 1);
    assert_eq!(bucket.examples[0].latency_ms, Some(42.0));
    assert_eq!(
        bucket.schema.get_property("id"),
        Some(&crate::infer::InferredSchema::Integer)
    );
}

#[test]
fn test_schema_frozen_after_first_sample() {
    // Later samples of the same status never re-infer the schema, even
    // when their shape differs
    let mut store = store();
    store.add_endpoint(
        "/rest/ping",
        Method::GET,
        &ResponseSample::new(200, json!({"pong": true})),
    );
    store.add_endpoint(
        "/rest/ping",
        Method::GET,
        &ResponseSample::new(200, json!({"entirely": "different", "shape": 1})),
    );

    let key = EndpointKey::new(Method::GET, "/rest/ping");
    let bucket = &store.get_endpoint(&key).unwrap().responses[&200];
    assert_eq!(
        bucket.schema.get_property("pong"),
        Some(&crate::infer::InferredSchema::Boolean)
    );
    assert!(bucket.schema.get_property("entirely").is_none());
}

#[test]
fn test_example_cap_keeps_first_three() {
    let mut store = store();
    for i in 0..5 {
        store.add_endpoint(
            "/rest/ping",
            Method::GET,
            &ResponseSample::new(200, json!({"n": i})),
        );
    }

    let key = EndpointKey::new(Method::GET, "/rest/ping");
    let record = store.get_endpoint(&key).unwrap();
    assert_eq!(record.response_count, 5);

    let examples = &record.responses[&200].examples;
    assert_eq!(examples.len(), 3);
    for (i, example) in examples.iter().enumerate() {
        assert_eq!(example.value, json!({"n": i}));
    }
}

#[test]
fn test_status_buckets_are_separate() {
    let mut store = store();
    store.add_endpoint(
        "/rest/query",
        Method::POST,
        &ResponseSample::new(200, json!({"rows": []})),
    );
    store.add_endpoint(
        "/rest/query",
        Method::POST,
        &ResponseSample::new(400, json!({"error": "bad query"})),
    );
    store.add_endpoint(
        "/rest/query",
        Method::POST,
        &ResponseSample::new(0, json!({"error": "connection reset"})),
    );

    let key = EndpointKey::new(Method::POST, "/rest/query");
    let record = store.get_endpoint(&key).unwrap();
    assert_eq!(record.response_count, 3);
    assert_eq!(record.responses.len(), 3);
    assert_eq!(record.responses[&400].description, "Bad request");
    assert_eq!(record.responses[&0].description, "HTTP 0");
}

#[test_case(200, "Successful response")]
#[test_case(201, "Created")]
#[test_case(404, "Not found")]
#[test_case(500, "Internal server error")]
#[test_case(418, "HTTP 418"; "unknown code falls back")]
#[test_case(0, "HTTP 0"; "network failure status")]
fn test_status_description(status: u16, expected: &str) {
    assert_eq!(status_description(status), expected);
}

#[test]
fn test_build_document_shape() {
    let mut store = store();
    store.add_endpoint(
        "/rest/ping",
        Method::GET,
        &ResponseSample::new(200, json!({"ok": true})),
    );

    let doc = store.build();
    assert_eq!(doc.openapi, "3.1.0");

    let operation = &doc.paths["/rest/ping"]["get"];
    assert_eq!(operation.summary, "GET /rest/ping");
    assert_eq!(operation.operation_id, "get__rest_ping");
    assert!(operation.request_body.is_none());
    assert!(operation.parameters.is_none());

    let response = &operation.responses["200"];
    assert_eq!(response.description, "Successful response");
    let media = &response.content["application/json"];
    assert_eq!(
        media.schema.get_property("ok"),
        Some(&crate::infer::InferredSchema::Boolean)
    );
    assert_eq!(media.examples.len(), 1);
}

#[test]
fn test_build_groups_methods_under_one_path() {
    let mut store = store();
    store.add_endpoint("/rest/item", Method::GET, &ResponseSample::new(200, json!({})));
    store.add_endpoint("/rest/item", Method::DELETE, &ResponseSample::new(204, json!(null)));

    let doc = store.build();
    assert_eq!(doc.paths.len(), 1);
    let operations = &doc.paths["/rest/item"];
    assert!(operations.contains_key("get"));
    assert!(operations.contains_key("delete"));
}

#[test]
fn test_build_is_idempotent() {
    let mut store = store();
    store.add_endpoint(
        "/rest/thread/list_recent",
        Method::GET,
        &ResponseSample::new(200, json!({"threads": [{"id": 1}]})),
    );

    let first = store.build();
    let second = store.build();
    assert_eq!(first, second);
    assert_eq!(first.to_json_pretty(), second.to_json_pretty());
}

#[test]
fn test_document_meta_flows_into_build() {
    let meta = DocumentMeta::default()
        .with_title("Example API")
        .with_version("2.3.0")
        .with_server("https://api.example.com");
    let store = SchemaStore::with_meta(Arc::new(MemoryStore::new()), meta);

    let doc = store.build();
    assert_eq!(doc.info.title, "Example API");
    assert_eq!(doc.info.version, "2.3.0");
    assert_eq!(doc.servers, vec![ServerEntry { url: "https://api.example.com".to_string() }]);
}

#[test]
fn test_document_yaml_export() {
    let mut store = store();
    store.add_endpoint("/rest/ping", Method::GET, &ResponseSample::new(200, json!({"ok": true})));

    let yaml = store.build().to_yaml();
    assert!(yaml.contains("openapi: 3.1.0"));
    assert!(yaml.contains("/rest/ping"));
}

#[test]
fn test_self_diff_is_empty() {
    let mut store = store();
    store.add_endpoint("/a", Method::GET, &ResponseSample::new(200, json!({"x": 1})));
    store.add_endpoint("/b", Method::POST, &ResponseSample::new(201, json!({"y": "z"})));

    let baseline = store.build().to_json();
    let diff = store.diff(&baseline);
    assert!(diff.is_empty());
    assert_eq!(diff, SchemaDiff::default());
}

#[test]
fn test_diff_added_removed_modified() {
    let mut store = store();
    store.add_endpoint("/kept", Method::GET, &ResponseSample::new(200, json!({"v": 1})));
    store.add_endpoint("/new", Method::GET, &ResponseSample::new(200, json!({})));

    // Baseline where /kept had a different subtree and /gone existed
    let mut prior = store.build().to_json();
    let paths = prior["paths"].as_object_mut().unwrap();
    paths.remove("/new");
    paths.insert("/gone".to_string(), json!({"get": {"summary": "GET /gone"}}));
    paths["/kept"]["get"]["summary"] = json!("old summary");

    let diff = store.diff(&prior);
    assert_eq!(diff.added, vec!["/new".to_string()]);
    assert_eq!(diff.removed, vec!["/gone".to_string()]);
    assert_eq!(diff.modified, vec!["/kept".to_string()]);
}

#[test]
fn test_diff_against_document_without_paths() {
    let mut store = store();
    store.add_endpoint("/only", Method::GET, &ResponseSample::new(200, json!({})));

    // A prior document missing the paths key is an empty path set
    let diff = store.diff(&json!({"openapi": "3.1.0"}));
    assert_eq!(diff.added, vec!["/only".to_string()]);
    assert!(diff.removed.is_empty());
    assert!(diff.modified.is_empty());
}

#[test]
fn test_state_round_trips_through_store() {
    let backing = Arc::new(MemoryStore::new());

    {
        let mut store = SchemaStore::new(Arc::clone(&backing) as Arc<dyn StateStore>);
        store.add_endpoint(
            "/rest/user/info",
            Method::GET,
            &ResponseSample::new(200, json!({"id": 1})).with_latency(9.5),
        );
        store.add_endpoint(
            "/rest/user/info",
            Method::GET,
            &ResponseSample::new(404, json!({"error": "missing"})),
        );
    }

    let restored = SchemaStore::new(backing);
    let endpoints = restored.get_endpoints();
    assert_eq!(endpoints.len(), 1);
    assert_eq!(endpoints[0].response_count, 2);
    assert_eq!(endpoints[0].responses.len(), 2);
    assert_eq!(endpoints[0].responses[&404].description, "Not found");
    assert_eq!(endpoints[0].responses[&200].examples[0].latency_ms, Some(9.5));
}

#[test]
fn test_persisted_blob_layout() {
    let backing = Arc::new(MemoryStore::new());
    let mut store = SchemaStore::new(Arc::clone(&backing) as Arc<dyn StateStore>);
    store.add_endpoint("/rest/ping", Method::GET, &ResponseSample::new(200, json!({"ok": true})));

    let blob = backing.load(SCHEMA_STATE_KEY).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let record = &parsed["GET /rest/ping"];
    assert_eq!(record["method"], json!("GET"));
    assert_eq!(record["path"], json!("/rest/ping"));
    assert_eq!(record["responseCount"], json!(1));
    assert_eq!(record["responses"]["200"]["schema"]["type"], json!("object"));
}

#[test]
fn test_clear_empties_store() {
    let mut store = store();
    store.add_endpoint("/a", Method::GET, &ResponseSample::new(200, json!({})));
    assert!(!store.is_empty());

    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.get_endpoints().len(), 0);
    assert!(store.build().paths.is_empty());
}

#[test]
fn test_non_json_body_typed_as_string() {
    // Plain-text bodies arrive as JSON strings and must infer cleanly
    let mut store = store();
    store.add_endpoint(
        "/rest/export",
        Method::GET,
        &ResponseSample::new(200, json!("id,name\n1,ana")),
    );

    let key = EndpointKey::new(Method::GET, "/rest/export");
    let bucket = &store.get_endpoint(&key).unwrap().responses[&200];
    assert_eq!(bucket.schema, crate::infer::InferredSchema::String);
}
