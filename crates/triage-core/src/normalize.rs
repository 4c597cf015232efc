//! Coercion of raw record fields into typed values.
//!
//! Every function here is total: malformed input maps to `None` and is never
//! reported as an error. Callers decide what absence means.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use triage_model::{BloodPressure, NormalizedRecord, RawRecord};

/// `SYS/DIA` with two or three digits on each side, matched against the whole
/// cleaned string.
static BLOOD_PRESSURE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2,3})/(\d{2,3})$").expect("Invalid blood pressure regex")
});

/// Normalize every scored field of a record.
pub fn normalize_record(record: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        blood_pressure: normalize_blood_pressure(&record.blood_pressure),
        temperature: normalize_temperature(&record.temperature),
        age: normalize_age(&record.age),
    }
}

/// Parse a `"SYS/DIA"` reading.
///
/// Surrounding and internal whitespace is removed and the value upper-cased
/// before matching. Non-string values, empty strings and any other shape
/// yield `None`.
pub fn normalize_blood_pressure(raw: &Value) -> Option<BloodPressure> {
    let text = raw.as_str()?;
    let cleaned: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    let captures = BLOOD_PRESSURE_REGEX.captures(&cleaned)?;
    let systolic = captures.get(1)?.as_str().parse().ok()?;
    let diastolic = captures.get(2)?.as_str().parse().ok()?;
    Some(BloodPressure::new(systolic, diastolic))
}

/// Coerce a temperature reading (degrees Fahrenheit) to a real number.
pub fn normalize_temperature(raw: &Value) -> Option<f64> {
    coerce_number(raw)
}

/// Coerce an age in years to a real number.
pub fn normalize_age(raw: &Value) -> Option<f64> {
    coerce_number(raw)
}

/// Numbers pass through; strings are trimmed and parsed. Anything else,
/// including empty strings and non-finite results, is absent.
fn coerce_number(raw: &Value) -> Option<f64> {
    let number = match raw {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => parse_f64(text)?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
