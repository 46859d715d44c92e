//! Spice feature manifest
//!
//! Core types for declaring features against an external feature registry:
//! values and records flowing through feature functions, the registry
//! handle features are registered on, and the serializable manifest the
//! registry receives.
//!
//! Dependency resolution, scheduling and caching happen inside the
//! registry service, not here.

pub mod client;
pub mod errors;
pub mod manifest;
pub mod manifest_writer;
pub mod registry;
pub mod types;
pub mod value;

pub use client::{FileRegistryClient, RegistryClient, Submission};
pub use errors::{ClientError, FeatureError, ManifestError};
pub use registry::{ComputeFn, FeatureDefinition, FeatureFn, Registry};
pub use types::{FeatureSpec, Manifest, MANIFEST_VERSION};
pub use value::{FeatureValue, Record};

// Re-export manifest writer utilities for custom paths
pub use manifest_writer::{read_from_path, write_to_path, ManifestFormat};

// Credentials live in spice-config; re-exported so feature crates need one import
pub use spice_config::Credentials;
