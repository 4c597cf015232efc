//! Normalization, risk scoring and cohort classification of patient records.
//!
//! The pipeline for one record is:
//!
//! 1. [`normalize`] coerces the loosely typed raw fields into `Option` values.
//! 2. [`score`] applies the blood pressure, temperature and age rule tables.
//! 3. [`classify`] evaluates the high-risk, fever and data-quality predicates.
//! 4. [`aggregate`] appends the identifier to each matching cohort.
//!
//! Records are processed independently; only the aggregator keeps state.

pub mod aggregate;
pub mod classify;
pub mod normalize;
pub mod score;
pub mod thresholds;

pub use aggregate::{Analysis, CohortAggregator, analyze_records, assess_record};
pub use classify::classify;
pub use normalize::{normalize_age, normalize_blood_pressure, normalize_record, normalize_temperature};
pub use score::{score_age, score_blood_pressure, score_record, score_temperature};
pub use thresholds::{
    AgeThresholds, BloodPressureThresholds, CohortThresholds, ScoringThresholds,
    TemperatureThresholds, ThresholdError,
};
