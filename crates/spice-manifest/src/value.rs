//! Feature values and keyed input records
//!
//! A `Record` is what a feature function receives: either a raw row from
//! the data pipeline, or the resolved values of the feature's declared
//! dependencies keyed by dependency name.

use crate::errors::FeatureError;
use ahash::AHashMap;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Date-time layouts accepted by `FeatureValue::parse_datetime`
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A single value flowing in or out of a feature function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FeatureValue {
    Datetime(NaiveDateTime),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Bool(bool),
}

impl FeatureValue {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FeatureValue::Datetime(_) => "datetime",
            FeatureValue::Int(_) => "int",
            FeatureValue::Float(_) => "float",
            FeatureValue::Str(_) => "str",
            FeatureValue::Bool(_) => "bool",
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            FeatureValue::Datetime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FeatureValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Parse a timestamp such as `2016-01-15 08:23:00`
    pub fn parse_datetime(input: &str) -> Option<FeatureValue> {
        let trimmed = input.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .map(FeatureValue::Datetime)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Datetime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            FeatureValue::Int(v) => write!(f, "{}", v),
            FeatureValue::Float(v) => write!(f, "{}", v),
            FeatureValue::Str(v) => write!(f, "{}", v),
            FeatureValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<NaiveDateTime> for FeatureValue {
    fn from(value: NaiveDateTime) -> Self {
        FeatureValue::Datetime(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Int(value)
    }
}

impl From<u32> for FeatureValue {
    fn from(value: u32) -> Self {
        FeatureValue::Int(i64::from(value))
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Str(Arc::from(value))
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

/// Read-only mapping from field name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    fields: AHashMap<Arc<str>, FeatureValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: &str, value: impl Into<FeatureValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<FeatureValue>) {
        self.fields.insert(Arc::from(field), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FeatureValue> {
        self.fields.get(field)
    }

    /// Look up a field, failing when it is absent
    pub fn require(&self, field: &str) -> Result<&FeatureValue, FeatureError> {
        self.fields
            .get(field)
            .ok_or_else(|| FeatureError::MissingField {
                field: Arc::from(field),
            })
    }

    /// Look up a field that must hold a date-time
    pub fn datetime(&self, field: &str) -> Result<NaiveDateTime, FeatureError> {
        let value = self.require(field)?;
        value.as_datetime().ok_or_else(|| FeatureError::TypeMismatch {
            field: Arc::from(field),
            expected: "datetime",
            found: value.type_name(),
        })
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &FeatureValue)> {
        self.fields.iter()
    }
}

impl<K: AsRef<str>, V: Into<FeatureValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field.as_ref(), value);
        }
        record
    }
}
