use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::NormalizedRecord;

/// Per-dimension risk points for one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    /// 0..=3
    pub blood_pressure: u8,
    /// 0..=2
    pub temperature: u8,
    /// 0..=2
    pub age: u8,
}

impl RiskScore {
    /// Sum of the three sub-scores, 0..=7.
    pub fn total(&self) -> u8 {
        self.blood_pressure + self.temperature + self.age
    }
}

/// The reported patient groupings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    HighRisk,
    Fever,
    DataQuality,
}

impl Cohort {
    pub const ALL: [Cohort; 3] = [Cohort::HighRisk, Cohort::Fever, Cohort::DataQuality];

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighRisk => "High risk",
            Self::Fever => "Fever",
            Self::DataQuality => "Data quality issue",
        }
    }

    /// Field name in the submission payload.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::HighRisk => "high_risk_patients",
            Self::Fever => "fever_patients",
            Self::DataQuality => "data_quality_issues",
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which cohorts a single record belongs to. Any subset is valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortFlags {
    pub high_risk: bool,
    pub fever: bool,
    pub data_quality_issue: bool,
}

impl CohortFlags {
    pub fn contains(&self, cohort: Cohort) -> bool {
        match cohort {
            Cohort::HighRisk => self.high_risk,
            Cohort::Fever => self.fever,
            Cohort::DataQuality => self.data_quality_issue,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.high_risk || self.fever || self.data_quality_issue)
    }

    /// Member cohorts in reporting order.
    pub fn cohorts(&self) -> Vec<Cohort> {
        Cohort::ALL
            .into_iter()
            .filter(|cohort| self.contains(*cohort))
            .collect()
    }
}

/// Everything derived from one raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAssessment {
    pub patient_id: String,
    pub normalized: NormalizedRecord,
    pub score: RiskScore,
    pub cohorts: CohortFlags,
}

/// The submission payload: three ordered, non-deduplicated identifier lists.
///
/// Field order matches the wire format of the submission endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortResult {
    pub high_risk_patients: Vec<String>,
    pub fever_patients: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

impl CohortResult {
    pub fn ids(&self, cohort: Cohort) -> &[String] {
        match cohort {
            Cohort::HighRisk => &self.high_risk_patients,
            Cohort::Fever => &self.fever_patients,
            Cohort::DataQuality => &self.data_quality_issues,
        }
    }

    pub fn push(&mut self, cohort: Cohort, patient_id: impl Into<String>) {
        let target = match cohort {
            Cohort::HighRisk => &mut self.high_risk_patients,
            Cohort::Fever => &mut self.fever_patients,
            Cohort::DataQuality => &mut self.data_quality_issues,
        };
        target.push(patient_id.into());
    }

    pub fn is_empty(&self) -> bool {
        Cohort::ALL.iter().all(|cohort| self.ids(*cohort).is_empty())
    }
}
