//! Schema inference from JSON values

use super::types::InferredSchema;
use serde_json::Value;
use std::collections::BTreeMap;

/// Maximum recursion depth before collapsing to the object placeholder.
/// Guards against stack exhaustion on adversarially deep payloads.
const MAX_DEPTH: usize = 64;

/// Infer a structural schema from a single JSON value.
///
/// Total over all JSON shapes and never panics:
/// - arrays take their item schema from the first element only; empty
///   arrays yield the `{"type":"object"}` items placeholder
/// - numbers are `integer` when exactly representable as i64/u64,
///   `number` otherwise
pub fn infer(value: &Value) -> InferredSchema {
    infer_at(value, 0)
}

fn infer_at(value: &Value, depth: usize) -> InferredSchema {
    if depth >= MAX_DEPTH {
        return InferredSchema::object_placeholder();
    }

    match value {
        Value::Null => InferredSchema::Null,
        Value::Bool(_) => InferredSchema::Boolean,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                InferredSchema::Integer
            } else {
                InferredSchema::Number
            }
        }
        Value::String(_) => InferredSchema::String,
        Value::Array(arr) => {
            let items = arr
                .first()
                .map_or_else(InferredSchema::object_placeholder, |v| {
                    infer_at(v, depth + 1)
                });
            InferredSchema::array(items)
        }
        Value::Object(map) => {
            let properties: BTreeMap<String, InferredSchema> = map
                .iter()
                .map(|(key, val)| (key.clone(), infer_at(val, depth + 1)))
                .collect();
            InferredSchema::object(properties)
        }
    }
}
