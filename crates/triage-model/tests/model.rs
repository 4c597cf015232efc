//! Tests for triage-model wire formats.

use serde_json::json;
use triage_model::{Cohort, CohortResult, Pagination, RawRecord};

#[test]
fn raw_record_keeps_loose_fields_and_passthrough() {
    let record: RawRecord = serde_json::from_value(json!({
        "patient_id": "DEMO001",
        "name": "TestPatient, John",
        "age": "45",
        "gender": "M",
        "blood_pressure": "120/80",
        "temperature": 98.6,
        "visit_date": "2024-01-15",
        "diagnosis": "Hypertension",
        "medications": "Lisinopril 10mg daily"
    }))
    .expect("deserialize record");

    assert_eq!(record.patient_id, "DEMO001");
    assert_eq!(record.age, json!("45"));
    assert_eq!(record.temperature, json!(98.6));
    assert_eq!(record.field("name"), Some(&json!("TestPatient, John")));
    assert_eq!(record.field("diagnosis"), Some(&json!("Hypertension")));
    assert_eq!(record.passthrough.len(), 5);
}

#[test]
fn raw_record_missing_scored_fields_default_to_null() {
    let record: RawRecord =
        serde_json::from_value(json!({ "patient_id": "DEMO002" })).expect("deserialize record");
    assert!(record.age.is_null());
    assert!(record.blood_pressure.is_null());
    assert!(record.temperature.is_null());
}

#[test]
fn raw_record_accepts_numeric_patient_id() {
    let record: RawRecord =
        serde_json::from_value(json!({ "patient_id": 42 })).expect("deserialize record");
    assert_eq!(record.patient_id, "42");
}

#[test]
fn raw_record_requires_patient_id() {
    let missing = serde_json::from_value::<RawRecord>(json!({ "age": 30 }));
    assert!(missing.is_err());

    let wrong_type = serde_json::from_value::<RawRecord>(json!({ "patient_id": [1] }));
    assert!(wrong_type.is_err());
}

#[test]
fn pagination_reads_camel_case_and_defaults_has_next() {
    let pagination: Pagination = serde_json::from_value(json!({
        "page": 2,
        "limit": 5,
        "total": 50,
        "totalPages": 10,
        "hasNext": true,
        "hasPrevious": true
    }))
    .expect("deserialize pagination");
    assert_eq!(pagination.total_pages, Some(10));
    assert!(pagination.has_next);

    let empty: Pagination = serde_json::from_value(json!({})).expect("deserialize pagination");
    assert!(!empty.has_next);
}

#[test]
fn cohort_result_serializes_submission_body() {
    let mut result = CohortResult::default();
    result.push(Cohort::HighRisk, "X1");
    result.push(Cohort::Fever, "X1");
    result.push(Cohort::DataQuality, "X2");

    insta::assert_json_snapshot!(result, @r#"
    {
      "high_risk_patients": [
        "X1"
      ],
      "fever_patients": [
        "X1"
      ],
      "data_quality_issues": [
        "X2"
      ]
    }
    "#);
}

#[test]
fn cohort_field_names_match_payload() {
    let value = serde_json::to_value(CohortResult::default()).expect("serialize result");
    let object = value.as_object().expect("object payload");
    for cohort in Cohort::ALL {
        assert!(object.contains_key(cohort.field_name()));
    }
    assert_eq!(object.len(), 3);
}
