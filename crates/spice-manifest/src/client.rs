//! Registry client seam
//!
//! The feature registry itself is an external service. `RegistryClient` is
//! the boundary a `Registry` submits through; credential and dependency
//! resolution failures come back as `ClientError` and are not retried.
//! `FileRegistryClient` records submissions on disk for offline use.

use crate::errors::ClientError;
use crate::types::Manifest;
use serde::{Deserialize, Serialize};
use spice_config::Credentials;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Something that accepts a manifest on behalf of the feature registry
pub trait RegistryClient {
    fn submit(&self, credentials: &Credentials, manifest: &Manifest) -> Result<(), ClientError>;
}

/// A submission as recorded by `FileRegistryClient`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub client_id: String,
    pub submitted_at: String,
    pub manifest: Manifest,
}

/// Writes each submitted manifest to `<dir>/<project-slug>.toml`
#[derive(Debug, Clone)]
pub struct FileRegistryClient {
    dir: PathBuf,
}

impl FileRegistryClient {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileRegistryClient { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location a project's submission is written to
    pub fn submission_path(&self, project: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", project_slug(project)))
    }

    /// Read back the last submission for a project
    pub fn load(&self, project: &str) -> Result<Submission, ClientError> {
        let content = fs::read_to_string(self.submission_path(project))?;
        let mut submission: Submission =
            toml::from_str(&content).map_err(crate::errors::ManifestError::from)?;
        submission.manifest.rebuild_indexes();
        Ok(submission)
    }
}

impl RegistryClient for FileRegistryClient {
    fn submit(&self, credentials: &Credentials, manifest: &Manifest) -> Result<(), ClientError> {
        if credentials.client_id().trim().is_empty() || credentials.secret().is_empty() {
            return Err(ClientError::Rejected("credentials are empty".to_string()));
        }

        let submission = Submission {
            client_id: credentials.client_id().to_string(),
            submitted_at: chrono::Utc::now().to_rfc3339(),
            manifest: manifest.clone(),
        };
        let content =
            toml::to_string_pretty(&submission).map_err(crate::errors::ManifestError::from)?;

        let path = self.submission_path(&manifest.project);
        debug!("Writing submission to {:?}", path);
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, content)?;

        info!(
            "Recorded {} features for '{}' at {:?}",
            manifest.len(),
            manifest.project,
            path
        );
        Ok(())
    }
}

/// Lowercase, dash-separated file stem for a project label ("NYC taxi" -> "nyc-taxi")
pub fn project_slug(project: &str) -> String {
    let mut slug = String::with_capacity(project.len());
    for ch in project.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("manifest");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeatureSpec;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn manifest() -> Manifest {
        let mut manifest = Manifest::new("NYC taxi");
        manifest.features.push(FeatureSpec {
            name: Arc::from("pickuptime"),
            function: Arc::from("pickuptime"),
            depends: Default::default(),
        });
        manifest.rebuild_indexes();
        manifest
    }

    #[test]
    fn test_project_slug() {
        assert_eq!(project_slug("NYC taxi"), "nyc-taxi");
        assert_eq!(project_slug("  Yellow / Green  cabs!"), "yellow-green-cabs");
        assert_eq!(project_slug("***"), "manifest");
    }

    #[test]
    fn test_submit_writes_submission() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let client = FileRegistryClient::new(temp_dir.path().join("registry"));
        let creds = Credentials::new("cead0e44", "9ZjF4ADOYdU");

        assert!(client.submit(&creds, &manifest()).is_ok());
        assert!(client.submission_path("NYC taxi").ends_with("nyc-taxi.toml"));

        let raw = fs::read_to_string(client.submission_path("NYC taxi")).unwrap_or_default();
        assert!(raw.contains("cead0e44"));
        assert!(!raw.contains("9ZjF4ADOYdU"));

        let loaded = client.load("NYC taxi");
        assert!(loaded.is_ok_and(|s| s.client_id == "cead0e44"
            && s.manifest.get("pickuptime").is_some()));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let client = FileRegistryClient::new(temp_dir.path());
        let result = client.submit(&Credentials::new("", ""), &manifest());
        assert!(matches!(result, Err(ClientError::Rejected(_))));
        assert!(!client.submission_path("NYC taxi").exists());
    }
}
