//! Pickup-time features
//!
//! The typed functions are what callers use directly. The `adapters`
//! module exposes the same functions in the shape the registry invokes
//! them: a keyed record in, a `FeatureValue` out, with parameter names
//! matching the keys.

use chrono::{Datelike, NaiveDateTime, Timelike};
use spice_manifest::{FeatureError, Record};

/// Raw record field holding the trip pickup timestamp
pub const PICKUP_DATETIME_FIELD: &str = "pickup_datetime";

/// The trip's pickup timestamp, unchanged
pub fn pickuptime(data: &Record) -> Result<NaiveDateTime, FeatureError> {
    data.datetime(PICKUP_DATETIME_FIELD)
}

/// Hour of the pickup, 0-23
pub fn pickup_hour(pickuptime: NaiveDateTime) -> u32 {
    pickuptime.hour()
}

/// Day of month of the pickup (1-31)
///
/// Despite the name this is not the day of the week. Downstream models
/// were trained on this column as-is.
pub fn weekday(pickuptime: NaiveDateTime) -> u32 {
    pickuptime.day()
}

pub mod adapters {
    use spice_manifest::{FeatureError, FeatureValue, Record};

    pub fn pickuptime(data: &Record) -> Result<FeatureValue, FeatureError> {
        super::pickuptime(data).map(FeatureValue::from)
    }

    pub fn pickup_hour(inputs: &Record) -> Result<FeatureValue, FeatureError> {
        let pickuptime = inputs.datetime("pickuptime")?;
        Ok(super::pickup_hour(pickuptime).into())
    }

    pub fn weekday(inputs: &Record) -> Result<FeatureValue, FeatureError> {
        let pickuptime = inputs.datetime("pickuptime")?;
        Ok(super::weekday(pickuptime).into())
    }
}
