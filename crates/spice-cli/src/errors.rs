//! Error type for CLI commands
//!
//! Library errors pass through unchanged; the CLI only adds the
//! argument-level failures it detects itself.

use spice_config::ConfigError;
use spice_manifest::{ClientError, FeatureError, ManifestError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Registry error: {0}")]
    Client(#[from] ClientError),

    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),

    #[error("Feature '{0}' is not registered")]
    UnknownFeature(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_feature_display() {
        let err = CliError::UnknownFeature("dropoff_hour".to_string());
        assert_eq!(err.to_string(), "Feature 'dropoff_hour' is not registered");
    }

    #[test]
    fn test_config_error_wraps() {
        let err = CliError::from(ConfigError::MissingCredentials("client-id"));
        assert!(err.to_string().starts_with("Configuration error: Missing credentials"));
    }
}
