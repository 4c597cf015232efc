//! Local stages shared by the `run` and `analyze` commands.
//!
//! 1. **Thresholds**: defaults, or a JSON override file
//! 2. **Records**: a local page body or bare array (`analyze` only)
//! 3. **Analyze**: score and classify every record in order

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, info, trace};

use triage_client::{DEFAULT_ADAPTERS, decode_page};
use triage_core::{Analysis, ScoringThresholds, analyze_records};
use triage_model::{Cohort, RawRecord};

use crate::logging::redact_value;

/// Load scoring thresholds, falling back to the built-in table.
pub fn load_thresholds(path: Option<&Path>) -> Result<ScoringThresholds> {
    let Some(path) = path else {
        return Ok(ScoringThresholds::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read thresholds {}", path.display()))?;
    let thresholds = ScoringThresholds::from_json_str(&text)
        .with_context(|| format!("parse thresholds {}", path.display()))?;
    debug!(path = %path.display(), "loaded threshold overrides");
    Ok(thresholds)
}

/// Read records from a JSON file.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read records {}", path.display()))?;
    let records =
        parse_records(&text).with_context(|| format!("parse records {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "records loaded");
    Ok(records)
}

/// Parse either a bare array of records or a listing page body.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>> {
    let body: Value = serde_json::from_str(text)?;
    if body.is_object() {
        return Ok(decode_page(1, &body, &DEFAULT_ADAPTERS)?.records);
    }
    let Value::Array(items) = body else {
        bail!("expected an array of records or an object with a record list");
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).with_context(|| format!("record {index}"))
        })
        .collect()
}

/// Score every record and log per-record outcomes at trace level.
pub fn analyze(records: &[RawRecord], thresholds: &ScoringThresholds) -> Analysis {
    let analysis = analyze_records(records, thresholds);
    for assessment in &analysis.assessments {
        trace!(
            patient_id = redact_value(&assessment.patient_id),
            blood_pressure = assessment.score.blood_pressure,
            temperature = assessment.score.temperature,
            age = assessment.score.age,
            total = assessment.score.total(),
            "patient scored"
        );
    }
    info!(
        records = analysis.assessments.len(),
        high_risk = analysis.cohorts.ids(Cohort::HighRisk).len(),
        fever = analysis.cohorts.ids(Cohort::Fever).len(),
        data_quality_issues = analysis.cohorts.ids(Cohort::DataQuality).len(),
        "analysis complete"
    );
    analysis
}
