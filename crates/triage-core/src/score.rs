//! Per-dimension risk scoring.
//!
//! Each scorer looks at exactly one normalized field and returns 0 when that
//! field is absent; absent data never adds risk points.

use triage_model::{BloodPressure, NormalizedRecord, RiskScore};

use crate::thresholds::{
    AgeThresholds, BloodPressureThresholds, ScoringThresholds, TemperatureThresholds,
};

/// Score all three dimensions of a normalized record.
pub fn score_record(record: &NormalizedRecord, thresholds: &ScoringThresholds) -> RiskScore {
    RiskScore {
        blood_pressure: score_blood_pressure(record.blood_pressure, &thresholds.blood_pressure),
        temperature: score_temperature(record.temperature, &thresholds.temperature),
        age: score_age(record.age, &thresholds.age),
    }
}

/// Blood pressure points, 0..=3.
///
/// Rules are evaluated in table order and the first match wins, so a reading
/// whose diastolic sits in the stage 1 band scores 2 even when its systolic
/// value alone would reach stage 2.
pub fn score_blood_pressure(
    reading: Option<BloodPressure>,
    thresholds: &BloodPressureThresholds,
) -> u8 {
    let Some(BloodPressure {
        systolic,
        diastolic,
    }) = reading
    else {
        return 0;
    };
    let t = thresholds;
    let stage1_systolic = (t.stage1_systolic..t.stage2_systolic).contains(&systolic);
    let stage1_diastolic = (t.stage1_diastolic..t.stage2_diastolic).contains(&diastolic);

    if systolic < t.elevated_systolic && diastolic < t.stage1_diastolic {
        0
    } else if (t.elevated_systolic..t.stage1_systolic).contains(&systolic)
        && diastolic < t.stage1_diastolic
    {
        1
    } else if stage1_systolic || stage1_diastolic {
        2
    } else if systolic >= t.stage2_systolic || diastolic >= t.stage2_diastolic {
        3
    } else {
        0
    }
}

/// Temperature points, 0..=2. Readings that fall between the bands score 0.
pub fn score_temperature(temperature: Option<f64>, thresholds: &TemperatureThresholds) -> u8 {
    let low_grade = thresholds.low_grade_fever..=thresholds.low_grade_fever_max;
    match temperature {
        Some(t) if t >= thresholds.high_fever => 2,
        Some(t) if low_grade.contains(&t) => 1,
        _ => 0,
    }
}

/// Age points, 0..=2.
pub fn score_age(age: Option<f64>, thresholds: &AgeThresholds) -> u8 {
    match age {
        Some(a) if a > thresholds.senior_age => 2,
        Some(a) if a >= thresholds.middle_age => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(systolic: u16, diastolic: u16) -> u8 {
        score_blood_pressure(
            Some(BloodPressure::new(systolic, diastolic)),
            &BloodPressureThresholds::default(),
        )
    }

    #[test]
    fn blood_pressure_bands() {
        assert_eq!(bp(110, 70), 0);
        assert_eq!(bp(125, 75), 1);
        assert_eq!(bp(135, 70), 2);
        assert_eq!(bp(115, 85), 2);
        assert_eq!(bp(150, 95), 3);
        assert_eq!(bp(110, 95), 3);
        assert_eq!(bp(145, 70), 3);
    }

    #[test]
    fn stage1_diastolic_takes_precedence_over_stage2_systolic() {
        assert_eq!(bp(150, 85), 2);
    }

    #[test]
    fn absent_reading_scores_zero() {
        assert_eq!(
            score_blood_pressure(None, &BloodPressureThresholds::default()),
            0
        );
        assert_eq!(score_temperature(None, &TemperatureThresholds::default()), 0);
        assert_eq!(score_age(None, &AgeThresholds::default()), 0);
    }

    #[test]
    fn custom_thresholds_shift_bands() {
        let thresholds = TemperatureThresholds {
            low_grade_fever: 100.4,
            low_grade_fever_max: 102.9,
            high_fever: 103.0,
        };
        assert_eq!(score_temperature(Some(100.0), &thresholds), 0);
        assert_eq!(score_temperature(Some(101.0), &thresholds), 1);
        assert_eq!(score_temperature(Some(102.95), &thresholds), 0);
        assert_eq!(score_temperature(Some(103.0), &thresholds), 2);
    }

    #[test]
    fn score_record_combines_dimensions() {
        let record = NormalizedRecord {
            blood_pressure: Some(BloodPressure::new(150, 95)),
            temperature: Some(101.2),
            age: Some(70.0),
        };
        let score = score_record(&record, &ScoringThresholds::default());
        assert_eq!(score.blood_pressure, 3);
        assert_eq!(score.temperature, 2);
        assert_eq!(score.age, 2);
        assert_eq!(score.total(), 7);
    }
}
