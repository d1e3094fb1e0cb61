//! Inferred schema types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A structural schema derived from a single JSON sample.
///
/// Serializes to the JSON-Schema-like form `{"type": "..."}`, with `items`
/// for arrays and `properties` for objects. Property maps use `BTreeMap` so
/// serialization key order is stable, which document diffing relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InferredSchema {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array {
        items: Box<InferredSchema>,
    },
    Object {
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        properties: BTreeMap<String, InferredSchema>,
    },
}

impl InferredSchema {
    /// Placeholder schema used where no shape information is available
    /// (empty arrays, depth-capped subtrees)
    pub fn object_placeholder() -> Self {
        InferredSchema::Object {
            properties: BTreeMap::new(),
        }
    }

    /// Create an array schema with the given item schema
    pub fn array(items: InferredSchema) -> Self {
        InferredSchema::Array {
            items: Box::new(items),
        }
    }

    /// Create an object schema from its property schemas
    pub fn object(properties: BTreeMap<String, InferredSchema>) -> Self {
        InferredSchema::Object { properties }
    }

    /// The JSON-Schema type keyword for this schema
    pub fn type_name(&self) -> &'static str {
        match self {
            InferredSchema::Null => "null",
            InferredSchema::Boolean => "boolean",
            InferredSchema::Integer => "integer",
            InferredSchema::Number => "number",
            InferredSchema::String => "string",
            InferredSchema::Array { .. } => "array",
            InferredSchema::Object { .. } => "object",
        }
    }

    /// Property schema lookup for object schemas
    pub fn get_property(&self, name: &str) -> Option<&InferredSchema> {
        match self {
            InferredSchema::Object { properties } => properties.get(name),
            _ => None,
        }
    }

    /// Item schema for array schemas
    pub fn items(&self) -> Option<&InferredSchema> {
        match self {
            InferredSchema::Array { items } => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for InferredSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
