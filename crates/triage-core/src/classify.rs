//! Cohort membership predicates.

use triage_model::{CohortFlags, NormalizedRecord, RiskScore};

use crate::thresholds::CohortThresholds;

/// Evaluate the three cohort predicates independently.
///
/// Fever is decided on the normalized temperature, not on the temperature
/// score. Only an unparseable blood pressure counts as a data-quality issue;
/// flagged records stay eligible for the other cohorts.
pub fn classify(
    record: &NormalizedRecord,
    score: &RiskScore,
    thresholds: &CohortThresholds,
) -> CohortFlags {
    CohortFlags {
        high_risk: is_high_risk(score, thresholds),
        fever: has_fever(record, thresholds),
        data_quality_issue: has_data_quality_issue(record),
    }
}

pub fn is_high_risk(score: &RiskScore, thresholds: &CohortThresholds) -> bool {
    score.total() >= thresholds.high_risk_score
}

pub fn has_fever(record: &NormalizedRecord, thresholds: &CohortThresholds) -> bool {
    record
        .temperature
        .is_some_and(|temperature| temperature >= thresholds.fever_temperature)
}

pub fn has_data_quality_issue(record: &NormalizedRecord) -> bool {
    record.blood_pressure.is_none()
}
