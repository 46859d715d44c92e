//! Registry handle and feature registration
//!
//! A `Registry` is built once per project with explicit credentials, then
//! fed one `register` call per feature. Each registration records the
//! feature name (defaulting to the function's own identifier), the ordered
//! dependency names, and the compute function. Nothing here resolves or
//! schedules dependencies; the registry service does that after `submit`.

use crate::client::RegistryClient;
use crate::errors::{ClientError, FeatureError};
use crate::types::{FeatureSpec, Manifest};
use crate::value::{FeatureValue, Record};
use ahash::AHashMap;
use smallvec::SmallVec;
use spice_config::Credentials;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared compute function: keyed inputs in, one value out
pub type ComputeFn = Arc<dyn Fn(&Record) -> Result<FeatureValue, FeatureError> + Send + Sync>;

/// A compute function together with its own identifier
#[derive(Clone)]
pub struct FeatureFn {
    ident: Arc<str>,
    compute: ComputeFn,
}

impl FeatureFn {
    pub fn new<F>(ident: &str, compute: F) -> Self
    where
        F: Fn(&Record) -> Result<FeatureValue, FeatureError> + Send + Sync + 'static,
    {
        FeatureFn {
            ident: Arc::from(ident),
            compute: Arc::new(compute),
        }
    }

    /// Build from a stringified path such as `adapters::pickuptime`; the last segment is the identifier
    pub fn from_path<F>(path: &str, compute: F) -> Self
    where
        F: Fn(&Record) -> Result<FeatureValue, FeatureError> + Send + Sync + 'static,
    {
        let ident = path.rsplit("::").next().unwrap_or(path).trim();
        Self::new(ident, compute)
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn call(&self, input: &Record) -> Result<FeatureValue, FeatureError> {
        (self.compute)(input)
    }
}

impl fmt::Debug for FeatureFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureFn")
            .field("ident", &self.ident)
            .finish_non_exhaustive()
    }
}

/// Wrap a function item as a `FeatureFn`, keeping its name as the identifier
///
/// ```ignore
/// let f = feature_fn!(adapters::pickup_hour);
/// assert_eq!(f.ident(), "pickup_hour");
/// ```
#[macro_export]
macro_rules! feature_fn {
    ($func:path) => {
        $crate::FeatureFn::from_path(stringify!($func), $func)
    };
}

/// A registered feature
#[derive(Debug, Clone)]
pub struct FeatureDefinition {
    name: Arc<str>,
    depends: SmallVec<[Arc<str>; 2]>,
    function: FeatureFn,
}

impl FeatureDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dependency names in declared order
    pub fn depends(&self) -> &[Arc<str>] {
        &self.depends
    }

    pub fn function_ident(&self) -> &str {
        self.function.ident()
    }

    /// Invoke the compute function
    ///
    /// `input` is the raw record for zero-dependency features, otherwise the
    /// resolved dependency values keyed by dependency name.
    pub fn compute(&self, input: &Record) -> Result<FeatureValue, FeatureError> {
        self.function.call(input)
    }

    pub fn spec(&self) -> FeatureSpec {
        FeatureSpec {
            name: self.name.clone(),
            function: self.function.ident.clone(),
            depends: self.depends.clone(),
        }
    }
}

/// Client-side handle collecting feature registrations for one project
#[derive(Debug)]
pub struct Registry {
    project: Arc<str>,
    credentials: Credentials,
    definitions: Vec<FeatureDefinition>,
    index: AHashMap<Arc<str>, usize>,
}

impl Registry {
    pub fn new(project: &str, credentials: Credentials) -> Self {
        debug!("Creating registry '{}' for client {}", project, credentials.client_id());
        Registry {
            project: Arc::from(project),
            credentials,
            definitions: Vec::new(),
            index: AHashMap::new(),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Register a feature function
    ///
    /// `name` defaults to the function's identifier; `depends` defaults to
    /// none. Registering an existing name replaces that definition in place.
    pub fn register(
        &mut self,
        function: FeatureFn,
        name: Option<&str>,
        depends: &[&str],
    ) -> &FeatureDefinition {
        let name: Arc<str> = match name {
            Some(explicit) => Arc::from(explicit),
            None => function.ident.clone(),
        };
        let definition = FeatureDefinition {
            name: name.clone(),
            depends: depends.iter().map(|d| Arc::from(*d)).collect(),
            function,
        };

        let idx = match self.index.get(&name) {
            Some(&idx) => {
                debug!("Replacing feature '{}'", name);
                self.definitions[idx] = definition;
                idx
            }
            None => {
                debug!("Registering feature '{}' depends={:?}", name, depends);
                self.definitions.push(definition);
                let idx = self.definitions.len() - 1;
                self.index.insert(name, idx);
                idx
            }
        };
        &self.definitions[idx]
    }

    pub fn get(&self, name: &str) -> Option<&FeatureDefinition> {
        self.index.get(name).map(|&idx| &self.definitions[idx])
    }

    /// Definitions in registration order
    pub fn definitions(&self) -> &[FeatureDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Snapshot of the registrations as a serializable manifest
    pub fn manifest(&self) -> Manifest {
        let mut manifest = Manifest::new(&self.project);
        manifest.features = self.definitions.iter().map(FeatureDefinition::spec).collect();
        manifest.rebuild_indexes();
        manifest
    }

    /// Hand the manifest to the registry service
    pub fn submit(&self, client: &dyn RegistryClient) -> Result<(), ClientError> {
        let manifest = self.manifest();
        info!(
            "Submitting {} features for '{}'",
            manifest.len(),
            self.project
        );
        client.submit(&self.credentials, &manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(_: &Record) -> Result<FeatureValue, FeatureError> {
        Ok(FeatureValue::Int(7))
    }

    fn fare(input: &Record) -> Result<FeatureValue, FeatureError> {
        input.require("fare_amount").cloned()
    }

    fn registry() -> Registry {
        Registry::new("NYC taxi", Credentials::new("client", "secret"))
    }

    #[test]
    fn test_feature_fn_macro_uses_function_name() {
        let f = feature_fn!(constant);
        assert_eq!(f.ident(), "constant");

        let nested = feature_fn!(self::fare);
        assert_eq!(nested.ident(), "fare");
    }

    #[test]
    fn test_register_defaults_name_to_identifier() {
        let mut registry = registry();
        let def = registry.register(feature_fn!(fare), None, &[]);
        assert_eq!(def.name(), "fare");
        assert!(def.depends().is_empty());
        assert!(registry.get("fare").is_some());
    }

    #[test]
    fn test_register_explicit_name_and_depends() {
        let mut registry = registry();
        registry.register(feature_fn!(constant), Some("seven"), &["a", "b"]);

        assert!(registry.get("seven").is_some(), "feature not registered");
        let Some(def) = registry.get("seven") else {
            return;
        };
        assert_eq!(def.function_ident(), "constant");
        let depends: Vec<&str> = def.depends().iter().map(|d| d.as_ref()).collect();
        assert_eq!(depends, vec!["a", "b"]);
        assert!(registry.get("constant").is_none());
    }

    #[test]
    fn test_reregister_replaces_in_place() {
        let mut registry = registry();
        registry.register(feature_fn!(constant), Some("x"), &[]);
        registry.register(feature_fn!(fare), Some("y"), &[]);
        registry.register(feature_fn!(fare), Some("x"), &["fare_amount"]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.definitions()[0].name(), "x");
        assert_eq!(registry.definitions()[0].function_ident(), "fare");
    }

    #[test]
    fn test_compute_invokes_function() {
        let mut registry = registry();
        registry.register(feature_fn!(fare), None, &[]);
        let record = Record::new().with("fare_amount", 12.5);

        let value = registry.get("fare").map(|d| d.compute(&record));
        assert_eq!(value, Some(Ok(FeatureValue::Float(12.5))));

        let missing = registry.get("fare").map(|d| d.compute(&Record::new()));
        assert!(matches!(
            missing,
            Some(Err(FeatureError::MissingField { .. }))
        ));
    }

    #[test]
    fn test_manifest_snapshot() {
        let mut registry = registry();
        registry.register(feature_fn!(constant), Some("seven"), &["fare"]);
        registry.register(feature_fn!(fare), None, &[]);

        let manifest = registry.manifest();
        assert_eq!(manifest.project.as_ref(), "NYC taxi");
        assert_eq!(manifest.names(), vec!["seven", "fare"]);
        assert!(manifest
            .get("seven")
            .is_some_and(|f| f.function.as_ref() == "constant"));
    }

    #[test]
    fn test_closure_registration() {
        let mut registry = registry();
        let f = FeatureFn::new("double_fare", |input: &Record| {
            let fare = input.require("fare")?;
            match fare {
                FeatureValue::Float(v) => Ok(FeatureValue::Float(v * 2.0)),
                other => Ok(other.clone()),
            }
        });
        registry.register(f, None, &["fare"]);
        let input = Record::new().with("fare", 3.0);
        let value = registry.get("double_fare").map(|d| d.compute(&input));
        assert_eq!(value, Some(Ok(FeatureValue::Float(6.0))));
    }
}
