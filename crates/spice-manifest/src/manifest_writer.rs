//! Manifest writer utilities for custom paths
//!
//! Format-aware helpers used by the CLI export command. The extension of
//! the output path picks the format: `.json` writes JSON, anything else TOML.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::types::Manifest;

/// Serialization format for an exported manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFormat {
    #[default]
    Toml,
    Json,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Toml,
        }
    }

    pub fn render(self, manifest: &Manifest) -> Result<String> {
        let rendered = match self {
            ManifestFormat::Toml => manifest.to_toml()?,
            ManifestFormat::Json => manifest.to_json()?,
        };
        Ok(rendered)
    }
}

/// Write manifest to a custom path
pub fn write_to_path(manifest: &Manifest, output_path: &Path) -> Result<()> {
    debug!("Writing manifest to custom path: {:?}", output_path);

    let format = ManifestFormat::from_path(output_path);
    let content = format.render(manifest)?;
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, &content)
        .with_context(|| format!("Failed to write manifest to {}", output_path.display()))?;

    info!("Manifest written successfully to: {:?}", output_path);
    info!("Total features: {}", manifest.features.len());

    Ok(())
}

/// Read manifest from a custom path
pub fn read_from_path(manifest_path: &Path) -> Result<Manifest> {
    debug!("Reading manifest from custom path: {:?}", manifest_path);

    let content = fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read manifest {}", manifest_path.display()))?;
    let mut manifest: Manifest = match ManifestFormat::from_path(manifest_path) {
        ManifestFormat::Json => serde_json::from_str(&content)?,
        ManifestFormat::Toml => toml::from_str(&content)?,
    };
    manifest.rebuild_indexes();

    info!("Manifest loaded successfully");
    info!("Manifest version: {}", manifest.version);
    info!("Generated at: {}", manifest.generated_at);
    info!("Total features: {}", manifest.features.len());

    Ok(manifest)
}
