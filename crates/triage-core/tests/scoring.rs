//! Rule-table boundaries and end-to-end cohort assignment.

use serde_json::json;
use triage_core::{
    AgeThresholds, BloodPressureThresholds, ScoringThresholds, TemperatureThresholds,
    analyze_records, assess_record, normalize_blood_pressure, score_age, score_blood_pressure,
    score_temperature,
};
use triage_model::{BloodPressure, RawRecord};

// ============================================================================
// Boundary tables
// ============================================================================

#[test]
fn blood_pressure_boundaries() {
    let thresholds = BloodPressureThresholds::default();
    let cases = [
        ((119, 79), 0),
        ((120, 79), 1),
        ((129, 79), 1),
        ((130, 80), 2),
        ((139, 89), 2),
        ((140, 90), 3),
    ];
    for ((systolic, diastolic), expected) in cases {
        let reading = Some(BloodPressure::new(systolic, diastolic));
        assert_eq!(
            score_blood_pressure(reading, &thresholds),
            expected,
            "{systolic}/{diastolic}"
        );
    }
}

#[test]
fn diastolic_alone_escalates() {
    let thresholds = BloodPressureThresholds::default();
    assert_eq!(score_blood_pressure(Some(BloodPressure::new(110, 80)), &thresholds), 2);
    assert_eq!(score_blood_pressure(Some(BloodPressure::new(110, 89)), &thresholds), 2);
    assert_eq!(score_blood_pressure(Some(BloodPressure::new(110, 90)), &thresholds), 3);
    assert_eq!(score_blood_pressure(Some(BloodPressure::new(125, 90)), &thresholds), 3);
}

#[test]
fn temperature_boundaries() {
    let thresholds = TemperatureThresholds::default();
    let cases = [
        (99.5, 0),
        (99.55, 0),
        (99.6, 1),
        (100.9, 1),
        (100.95, 0),
        (100.99, 0),
        (101.0, 2),
    ];
    for (temperature, expected) in cases {
        assert_eq!(
            score_temperature(Some(temperature), &thresholds),
            expected,
            "{temperature}"
        );
    }
}

#[test]
fn age_boundaries() {
    let thresholds = AgeThresholds::default();
    let cases = [(39.0, 0), (40.0, 1), (65.0, 1), (66.0, 2)];
    for (age, expected) in cases {
        assert_eq!(score_age(Some(age), &thresholds), expected, "{age}");
    }
}

// ============================================================================
// Cohort assignment
// ============================================================================

#[test]
fn total_two_is_not_high_risk_and_three_is() {
    let thresholds = ScoringThresholds::default();

    // bp 1 + temp 0 + age 1
    let two = assess_record(
        &RawRecord::new("T2")
            .with_blood_pressure("125/75")
            .with_temperature(98.6)
            .with_age(50),
        &thresholds,
    );
    assert_eq!(two.score.total(), 2);
    assert!(!two.cohorts.high_risk);

    // bp 1 + temp 1 + age 1
    let three = assess_record(
        &RawRecord::new("T3")
            .with_blood_pressure("125/75")
            .with_temperature(99.8)
            .with_age(50),
        &thresholds,
    );
    assert_eq!(three.score.total(), 3);
    assert!(three.cohorts.high_risk);
}

#[test]
fn borderline_fever_with_low_score() {
    let assessment = assess_record(
        &RawRecord::new("F1")
            .with_blood_pressure("110/70")
            .with_temperature(99.6)
            .with_age(25),
        &ScoringThresholds::default(),
    );
    assert_eq!(assessment.score.total(), 1);
    assert!(assessment.cohorts.fever);
    assert!(!assessment.cohorts.high_risk);
}

#[test]
fn fever_between_temperature_bands_scores_zero() {
    let assessment = assess_record(
        &RawRecord::new("F2")
            .with_blood_pressure("110/70")
            .with_temperature(100.95)
            .with_age(25),
        &ScoringThresholds::default(),
    );
    assert_eq!(assessment.score.temperature, 0);
    assert!(assessment.cohorts.fever);
}

#[test]
fn malformed_temperature_and_age_are_not_data_quality_issues() {
    let assessment = assess_record(
        &RawRecord::new("Q1")
            .with_blood_pressure("120/80")
            .with_temperature("TEMP_ERROR")
            .with_age("fifty-three"),
        &ScoringThresholds::default(),
    );
    assert!(!assessment.cohorts.data_quality_issue);
    assert_eq!(assessment.score.temperature, 0);
    assert_eq!(assessment.score.age, 0);
}

#[test]
fn end_to_end_examples() {
    let records: Vec<RawRecord> = serde_json::from_value(json!([
        { "patient_id": "X1", "blood_pressure": "150/95", "temperature": 101.2, "age": 70 },
        { "patient_id": "X2", "blood_pressure": "bad", "temperature": 98, "age": 30 }
    ]))
    .expect("deserialize records");

    let analysis = analyze_records(&records, &ScoringThresholds::default());

    let x1 = &analysis.assessments[0];
    assert_eq!(x1.score.blood_pressure, 3);
    assert_eq!(x1.score.temperature, 2);
    assert_eq!(x1.score.age, 2);
    assert_eq!(x1.score.total(), 7);

    insta::assert_json_snapshot!(analysis.cohorts, @r#"
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
fn string_typed_fields_score_like_numbers() {
    let thresholds = ScoringThresholds::default();
    let typed = assess_record(
        &RawRecord::new("N")
            .with_blood_pressure("140/90")
            .with_temperature(100.2)
            .with_age(66),
        &thresholds,
    );
    let stringly = assess_record(
        &RawRecord::new("S")
            .with_blood_pressure(" 140 / 90 ")
            .with_temperature("100.2")
            .with_age("66"),
        &thresholds,
    );
    assert_eq!(typed.score, stringly.score);
    assert_eq!(typed.normalized, stringly.normalized);
}

#[test]
fn padded_reading_normalizes() {
    for raw in ["  120 /  80  ", "\t120/80\n", "1 2 0/8 0"] {
        assert_eq!(
            normalize_blood_pressure(&json!(raw)),
            Some(BloodPressure::new(120, 80)),
            "{raw:?}"
        );
    }
}
