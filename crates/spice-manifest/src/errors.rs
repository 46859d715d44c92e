use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during manifest operations
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to encode manifest as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while computing a feature value
///
/// These are surfaced unchanged to whoever invoked the feature function.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Input record has no field '{field}'")]
    MissingField { field: Arc<str> },

    #[error("Field '{field}' holds {found}, expected {expected}")]
    TypeMismatch {
        field: Arc<str>,
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors reported by a registry client on submission
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Registry rejected the submission: {0}")]
    Rejected(String),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
