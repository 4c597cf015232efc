//! Folding assessed records into the three cohort lists.

use tracing::{debug, trace};

use triage_model::{Cohort, CohortResult, RawRecord, RecordAssessment};

use crate::classify::classify;
use crate::normalize::normalize_record;
use crate::score::score_record;
use crate::thresholds::ScoringThresholds;

/// Normalize, score and classify a single record. No state is shared between
/// records.
pub fn assess_record(record: &RawRecord, thresholds: &ScoringThresholds) -> RecordAssessment {
    let normalized = normalize_record(record);
    let score = score_record(&normalized, thresholds);
    let cohorts = classify(&normalized, &score, &thresholds.cohort);
    RecordAssessment {
        patient_id: record.patient_id.clone(),
        normalized,
        score,
        cohorts,
    }
}

/// Accumulates cohort membership in processing order.
///
/// The result is only reachable through [`CohortAggregator::finish`], which
/// consumes the aggregator, so a handed-off result can no longer change.
#[derive(Debug, Clone)]
pub struct CohortAggregator {
    thresholds: ScoringThresholds,
    result: CohortResult,
    assessed: usize,
}

impl CohortAggregator {
    pub fn new(thresholds: ScoringThresholds) -> Self {
        Self {
            thresholds,
            result: CohortResult::default(),
            assessed: 0,
        }
    }

    /// Assess one record and append its identifier to every matching cohort.
    pub fn assess(&mut self, record: &RawRecord) -> RecordAssessment {
        let assessment = assess_record(record, &self.thresholds);
        for cohort in assessment.cohorts.cohorts() {
            self.result.push(cohort, assessment.patient_id.clone());
        }
        trace!(
            record_index = self.assessed,
            total_score = assessment.score.total(),
            high_risk = assessment.cohorts.high_risk,
            fever = assessment.cohorts.fever,
            data_quality_issue = assessment.cohorts.data_quality_issue,
            "record assessed"
        );
        self.assessed += 1;
        assessment
    }

    /// Number of records assessed so far.
    pub fn assessed(&self) -> usize {
        self.assessed
    }

    /// Freeze the cohort lists.
    pub fn finish(self) -> CohortResult {
        debug!(
            records = self.assessed,
            high_risk = self.result.ids(Cohort::HighRisk).len(),
            fever = self.result.ids(Cohort::Fever).len(),
            data_quality_issues = self.result.ids(Cohort::DataQuality).len(),
            "cohorts finalized"
        );
        self.result
    }
}

/// Per-record assessments plus the frozen cohort lists for a batch.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub assessments: Vec<RecordAssessment>,
    pub cohorts: CohortResult,
}

/// Assess a whole batch in order.
pub fn analyze_records(records: &[RawRecord], thresholds: &ScoringThresholds) -> Analysis {
    let mut aggregator = CohortAggregator::new(*thresholds);
    let assessments = records
        .iter()
        .map(|record| aggregator.assess(record))
        .collect();
    Analysis {
        assessments,
        cohorts: aggregator.finish(),
    }
}
