use crate::context::{load_config, load_registry};
use crate::errors::CliError;
use colored::Colorize;
use nyc_taxi_features::PICKUP_DATETIME_FIELD;
use spice_manifest::{FeatureValue, Record};

/// Evaluate every feature for a single trip record
pub fn handle_compute(pickup_datetime: Option<String>, json: bool) -> Result<(), CliError> {
    let config = load_config()?;
    let registry = load_registry(&config)?;

    let mut raw = Record::new();
    if let Some(input) = pickup_datetime {
        let value = FeatureValue::parse_datetime(&input).ok_or_else(|| {
            CliError::InvalidArgs(format!(
                "'{}' is not a timestamp (expected YYYY-MM-DD HH:MM:SS)",
                input
            ))
        })?;
        raw.insert(PICKUP_DATETIME_FIELD, value);
    }

    let values = nyc_taxi_features::preview(&registry, &raw)?;

    if json {
        let object: serde_json::Map<String, serde_json::Value> = values
            .into_iter()
            .map(|(name, value)| (name, to_json(&value)))
            .collect();
        println!("{}", serde_json::Value::Object(object));
    } else {
        for (name, value) in &values {
            println!("{} = {}", name.bold(), value);
        }
    }
    Ok(())
}

fn to_json(value: &FeatureValue) -> serde_json::Value {
    match value {
        FeatureValue::Int(v) => serde_json::Value::from(*v),
        FeatureValue::Float(v) => serde_json::Value::from(*v),
        FeatureValue::Bool(v) => serde_json::Value::from(*v),
        other => serde_json::Value::from(other.to_string()),
    }
}
