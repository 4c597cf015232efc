//! Patient records as received from the listing endpoint and after normalization.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A patient record exactly as the listing endpoint returned it.
///
/// Only `patient_id` is required. The scored fields are kept as raw JSON
/// values because the source mixes numbers, numeric strings and garbage;
/// coercion happens in the normalizer, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Opaque identifier assigned by the source system.
    #[serde(deserialize_with = "deserialize_patient_id")]
    pub patient_id: String,
    #[serde(default)]
    pub age: Value,
    #[serde(default)]
    pub blood_pressure: Value,
    #[serde(default)]
    pub temperature: Value,
    /// Fields not used by scoring (`name`, `gender`, `visit_date`, ...).
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

impl RawRecord {
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            age: Value::Null,
            blood_pressure: Value::Null,
            temperature: Value::Null,
            passthrough: Map::new(),
        }
    }

    #[must_use]
    pub fn with_age(mut self, age: impl Into<Value>) -> Self {
        self.age = age.into();
        self
    }

    #[must_use]
    pub fn with_blood_pressure(mut self, blood_pressure: impl Into<Value>) -> Self {
        self.blood_pressure = blood_pressure.into();
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: impl Into<Value>) -> Self {
        self.temperature = temperature.into();
        self
    }

    /// Look up a passthrough field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.passthrough.get(name)
    }
}

/// Numeric identifiers are accepted and rendered without quotes.
fn deserialize_patient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!(
            "patient_id must be a string or number, got {other}"
        ))),
    }
}

/// A parsed `SYS/DIA` reading. Both endpoints are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u16,
    pub diastolic: u16,
}

impl BloodPressure {
    pub const fn new(systolic: u16, diastolic: u16) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Typed view of the scored fields. `None` means the raw value was missing
/// or could not be coerced, which is distinct from a parsed zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub blood_pressure: Option<BloodPressure>,
    pub temperature: Option<f64>,
    pub age: Option<f64>,
}
