//! Configurable boundaries for the scoring rule tables.
//!
//! The defaults reproduce the standard table:
//!
//! | dimension | 0 | 1 | 2 | 3 |
//! |---|---|---|---|---|
//! | blood pressure | < 120 / < 80 | 120-129 / < 80 | 130-139 or 80-89 | >= 140 or >= 90 |
//! | temperature (F) | <= 99.5 | 99.6-100.9 | >= 101.0 | |
//! | age (years) | < 40 | 40-65 | > 65 | |
//!
//! Every struct deserializes with per-field defaults so a threshold file only
//! needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when loading or validating thresholds.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThresholdError {
    /// The threshold document is not valid JSON for this schema.
    #[error("invalid threshold document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A band boundary is out of order or out of range.
    #[error("invalid threshold {field}: {message}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Systolic/diastolic band boundaries (mmHg). Each value is the inclusive
/// lower bound of its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodPressureThresholds {
    pub elevated_systolic: u16,
    pub stage1_systolic: u16,
    pub stage2_systolic: u16,
    pub stage1_diastolic: u16,
    pub stage2_diastolic: u16,
}

impl Default for BloodPressureThresholds {
    fn default() -> Self {
        Self {
            elevated_systolic: 120,
            stage1_systolic: 130,
            stage2_systolic: 140,
            stage1_diastolic: 80,
            stage2_diastolic: 90,
        }
    }
}

/// Temperature band boundaries (degrees Fahrenheit, all inclusive).
///
/// Readings between `low_grade_fever_max` and `high_fever` belong to no band
/// and score 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureThresholds {
    pub low_grade_fever: f64,
    pub low_grade_fever_max: f64,
    pub high_fever: f64,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self {
            low_grade_fever: 99.6,
            low_grade_fever_max: 100.9,
            high_fever: 101.0,
        }
    }
}

/// Age band boundaries in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeThresholds {
    /// Inclusive lower bound of the middle band.
    pub middle_age: f64,
    /// Ages strictly above this value fall in the top band.
    pub senior_age: f64,
}

impl Default for AgeThresholds {
    fn default() -> Self {
        Self {
            middle_age: 40.0,
            senior_age: 65.0,
        }
    }
}

/// Cohort membership predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortThresholds {
    /// Minimum total score for the high-risk cohort.
    pub high_risk_score: u8,
    /// Minimum normalized temperature for the fever cohort.
    pub fever_temperature: f64,
}

impl Default for CohortThresholds {
    fn default() -> Self {
        Self {
            high_risk_score: 3,
            fever_temperature: 99.6,
        }
    }
}

/// All scoring and classification boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    pub blood_pressure: BloodPressureThresholds,
    pub temperature: TemperatureThresholds,
    pub age: AgeThresholds,
    pub cohort: CohortThresholds,
}

impl ScoringThresholds {
    /// Parse a JSON threshold document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ThresholdError> {
        let thresholds: Self = serde_json::from_str(json)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check that every band is ascending and every bound is usable.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let bp = &self.blood_pressure;
        ascending(
            "blood_pressure.systolic",
            &[
                f64::from(bp.elevated_systolic),
                f64::from(bp.stage1_systolic),
                f64::from(bp.stage2_systolic),
            ],
        )?;
        ascending(
            "blood_pressure.diastolic",
            &[f64::from(bp.stage1_diastolic), f64::from(bp.stage2_diastolic)],
        )?;
        ascending(
            "temperature",
            &[
                self.temperature.low_grade_fever,
                self.temperature.low_grade_fever_max,
                self.temperature.high_fever,
            ],
        )?;
        ascending("age", &[self.age.middle_age, self.age.senior_age])?;
        finite("cohort.fever_temperature", self.cohort.fever_temperature)?;
        if self.cohort.high_risk_score > 7 {
            return Err(ThresholdError::Invalid {
                field: "cohort.high_risk_score",
                message: format!(
                    "{} exceeds the maximum total score of 7",
                    self.cohort.high_risk_score
                ),
            });
        }
        Ok(())
    }
}

fn ascending(field: &'static str, bounds: &[f64]) -> Result<(), ThresholdError> {
    for bound in bounds {
        finite(field, *bound)?;
    }
    if bounds.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ThresholdError::Invalid {
            field,
            message: format!("bounds must be strictly ascending, got {bounds:?}"),
        });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), ThresholdError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ThresholdError::Invalid {
            field,
            message: format!("{value} is not a finite number"),
        })
    }
}
