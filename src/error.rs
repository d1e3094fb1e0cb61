//! Error types for apiscribe
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for apiscribe
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Persistence Errors
    // ============================================================================
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Corrupt state blob for '{key}': {message}")]
    CorruptState { key: String, message: String },

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Observation Errors
    // ============================================================================
    #[error("Unknown HTTP method: {method}")]
    UnknownMethod { method: String },

    #[error("Malformed endpoint key '{key}': expected \"METHOD path\"")]
    MalformedKey { key: String },

    // ============================================================================
    // Catalog Errors
    // ============================================================================
    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Unsupported catalog format: {extension}")]
    UnsupportedCatalogFormat { extension: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Create a corrupt-state error
    pub fn corrupt_state(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CorruptState {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-method error
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Self::UnknownMethod {
            method: method.into(),
        }
    }

    /// Create a malformed endpoint key error
    pub fn malformed_key(key: impl Into<String>) -> Self {
        Self::MalformedKey { key: key.into() }
    }

    /// Create a catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }
}

/// Result type alias for apiscribe
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::persistence("quota exceeded");
        assert_eq!(err.to_string(), "Persistence error: quota exceeded");

        let err = Error::unknown_method("FROB");
        assert_eq!(err.to_string(), "Unknown HTTP method: FROB");

        let err = Error::malformed_key("GET");
        assert_eq!(
            err.to_string(),
            "Malformed endpoint key 'GET': expected \"METHOD path\""
        );
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::persistence("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Persistence error: inner"));
    }
}
