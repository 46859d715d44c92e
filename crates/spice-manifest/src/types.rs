//! Serializable manifest types
//!
//! The manifest is the inspectable projection of a registry: project label,
//! and for every feature its name, the identifier of the function computing
//! it, and its dependency names in declared order. Compute functions never
//! appear here.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

/// Current manifest format version
pub const MANIFEST_VERSION: &str = "1.0";

// =============================================================================
// MANIFEST - Top-level with index for O(1) lookup
// =============================================================================

/// Top-level manifest of registered features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: Arc<str>,
    pub project: Arc<str>,
    pub generated_at: Arc<str>,
    #[serde(default)]
    pub features: Vec<FeatureSpec>,

    /// Runtime only - rebuilt on load for O(1) feature lookup
    #[serde(skip)]
    pub feature_index: AHashMap<Arc<str>, usize>,
}

impl Default for Manifest {
    fn default() -> Self {
        Manifest {
            version: Arc::from(MANIFEST_VERSION),
            project: Arc::from(""),
            generated_at: Arc::from(chrono::Utc::now().to_rfc3339()),
            features: Vec::new(),
            feature_index: AHashMap::new(),
        }
    }
}

// =============================================================================
// FEATURE SPEC
// =============================================================================

/// One registered feature as the registry sees it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureSpec {
    pub name: Arc<str>,
    /// Identifier of the function computing the feature
    pub function: Arc<str>,
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub depends: SmallVec<[Arc<str>; 2]>,
}

impl FeatureSpec {
    /// Zero-dependency features read directly from raw records
    pub fn is_source(&self) -> bool {
        self.depends.is_empty()
    }

    /// Format dependencies for display (e.g., "pickuptime, dropofftime")
    pub fn format_depends(&self) -> String {
        self.depends
            .iter()
            .map(|d| d.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Manifest {
    pub fn new(project: &str) -> Self {
        Manifest {
            project: Arc::from(project),
            ..Default::default()
        }
    }

    /// Rebuild the feature index after deserialization
    pub fn rebuild_indexes(&mut self) {
        self.feature_index.clear();
        for (idx, spec) in self.features.iter().enumerate() {
            self.feature_index.insert(spec.name.clone(), idx);
        }
    }
}
