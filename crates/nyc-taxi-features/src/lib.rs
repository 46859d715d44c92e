//! NYC taxi feature manifest
//!
//! Declares one feature read from raw trip records (`pickuptime`) and two
//! derived from it (`pickup_hour`, `weekday`), and registers them on a
//! `Registry` for the "NYC taxi" project.

pub mod features;

use spice_manifest::{feature_fn, Credentials, FeatureError, FeatureValue, Record, Registry};
use std::sync::Arc;
use tracing::debug;

pub use features::{pickup_hour, pickuptime, weekday, PICKUP_DATETIME_FIELD};

/// Project label the features are registered under
pub const PROJECT: &str = "NYC taxi";

/// Build the registry with all taxi features registered
pub fn build_registry(credentials: Credentials) -> Registry {
    let mut registry = Registry::new(PROJECT, credentials);

    registry.register(
        feature_fn!(features::adapters::pickup_hour),
        None,
        &["pickuptime"],
    );
    registry.register(
        feature_fn!(features::adapters::weekday),
        None,
        &["pickuptime"],
    );
    registry.register(
        feature_fn!(features::adapters::pickuptime),
        Some("pickuptime"),
        &[],
    );

    debug!("Registered {} features for '{}'", registry.len(), PROJECT);
    registry
}

/// Compute every registered feature for one raw record
///
/// Source features read the raw record; the rest receive their dependencies
/// keyed by name. A dependency naming a registered feature waits for that
/// feature; any other dependency is read from the raw record. Features are
/// returned in the order they became computable. This is a local preview of
/// what the registry does, and stops at the first error.
pub fn preview(
    registry: &Registry,
    raw: &Record,
) -> Result<Vec<(String, FeatureValue)>, FeatureError> {
    let mut resolved = Record::new();
    let mut computed: Vec<(String, FeatureValue)> = Vec::with_capacity(registry.len());
    let mut pending: Vec<_> = registry.definitions().iter().collect();

    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::with_capacity(pending.len());

        for def in pending {
            let value = if def.depends().is_empty() {
                def.compute(raw)?
            } else if def
                .depends()
                .iter()
                .all(|d| {
                    resolved.contains(d) || (registry.get(d).is_none() && raw.contains(d))
                })
            {
                let inputs: Record = def
                    .depends()
                    .iter()
                    .filter_map(|d| {
                        resolved
                            .get(d)
                            .or_else(|| raw.get(d))
                            .map(|v| (d.clone(), v.clone()))
                    })
                    .collect();
                def.compute(&inputs)?
            } else {
                waiting.push(def);
                continue;
            };
            resolved.insert(def.name(), value.clone());
            computed.push((def.name().to_string(), value));
        }

        if waiting.len() == before {
            // Remaining dependencies are neither computed features nor raw fields
            let field = waiting
                .iter()
                .flat_map(|def| def.depends().iter())
                .find(|d| registry.get(d).is_none() && !raw.contains(d))
                .cloned()
                .unwrap_or_else(|| Arc::from(waiting[0].name()));
            return Err(FeatureError::MissingField { field });
        }
        pending = waiting;
    }

    Ok(computed)
}
