//! Manifest operations - loading, saving, lookup and inspection

use crate::errors::ManifestError;
use crate::types::{FeatureSpec, Manifest};
use std::io::Write;
use std::path::Path;

impl Manifest {
    /// Load manifest from a path, returning an empty manifest if the file doesn't exist
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Ok(Manifest::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Save manifest to a path with atomic write
    pub fn save_to_path(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;

        // Atomic write: write to temp file then rename
        let temp_path = path.with_extension("toml.tmp");
        {
            let file = std::fs::File::create(&temp_path)?;
            let mut writer = std::io::BufWriter::new(file);
            writer.write_all(content.as_bytes())?;
            writer.flush()?;
        }

        std::fs::rename(&temp_path, path)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        let mut manifest: Manifest = toml::from_str(content)?;
        manifest.rebuild_indexes();
        Ok(manifest)
    }

    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// O(1) feature lookup by name
    #[inline]
    pub fn get(&self, name: &str) -> Option<&FeatureSpec> {
        self.feature_index.get(name).map(|&idx| &self.features[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.feature_index.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Feature names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_ref()).collect()
    }

    /// Features that declare `name` as a dependency
    pub fn dependents_of(&self, name: &str) -> Vec<&FeatureSpec> {
        self.features
            .iter()
            .filter(|f| f.depends.iter().any(|d| d.as_ref() == name))
            .collect()
    }

    /// Dependency names that match no registered feature
    ///
    /// These are expected to be raw input fields; resolving them is the
    /// registry's job, so this is informational only.
    pub fn unresolved_dependencies(&self) -> Vec<&str> {
        let mut unresolved: Vec<&str> = self
            .features
            .iter()
            .flat_map(|f| f.depends.iter())
            .map(|d| d.as_ref())
            .filter(|d| !self.contains(d))
            .collect();
        unresolved.sort_unstable();
        unresolved.dedup();
        unresolved
    }
}
