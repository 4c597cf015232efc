use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use triage_model::{Cohort, CohortFlags, RecordAssessment};

use triage_cli::logging::redact_value;
use crate::types::{RunResult, RunSource};

pub fn print_summary(result: &RunResult) {
    match &result.source {
        RunSource::Service { pages, requests } => {
            println!("Source: patient service ({pages} pages, {requests} requests)");
        }
        RunSource::File(path) => println!("Source: {path}"),
    }
    println!("Records: {}", result.analysis.assessments.len());
    print_assessment_table(&result.analysis.assessments);
    println!("{}", cohort_table(result));

    match &result.acknowledgment {
        Some(ack) => {
            println!("Submission response:");
            println!("{}", pretty_json(ack));
        }
        None => {
            println!("Payload (not submitted):");
            println!("{}", pretty_json(&result.analysis.cohorts));
        }
    }
}

fn cohort_table(result: &RunResult) -> Table {
    let cohorts = &result.analysis.cohorts;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Cohort"),
        header_cell("Field"),
        header_cell("Patients"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for cohort in Cohort::ALL {
        let color = match cohort {
            Cohort::HighRisk => Color::Red,
            Cohort::Fever => Color::Yellow,
            Cohort::DataQuality => Color::Magenta,
        };
        table.add_row(vec![
            Cell::new(cohort.label()).add_attribute(Attribute::Bold),
            dim_cell(cohort.field_name()),
            count_cell(cohorts.ids(cohort).len(), color),
        ]);
    }
    table
}

/// Per-patient breakdown. Identifiers follow the log redaction setting.
fn print_assessment_table(assessments: &[RecordAssessment]) {
    if assessments.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Patient"),
        header_cell("BP"),
        header_cell("Temp"),
        header_cell("Age"),
        header_cell("BP pts"),
        header_cell("Temp pts"),
        header_cell("Age pts"),
        header_cell("Total"),
        header_cell("Cohorts"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for assessment in assessments {
        let record = &assessment.normalized;
        let score = &assessment.score;
        table.add_row(vec![
            Cell::new(redact_value(&assessment.patient_id)),
            optional_cell(record.blood_pressure),
            optional_cell(record.temperature),
            optional_cell(record.age),
            Cell::new(score.blood_pressure),
            Cell::new(score.temperature),
            Cell::new(score.age),
            Cell::new(score.total()).add_attribute(Attribute::Bold),
            cohorts_cell(assessment.cohorts),
        ]);
    }
    println!("{table}");
}

fn cohorts_cell(flags: CohortFlags) -> Cell {
    if flags.is_empty() {
        return dim_cell("-");
    }
    let labels: Vec<&str> = flags.cohorts().into_iter().map(Cohort::label).collect();
    Cell::new(labels.join(", "))
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("missing"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|error| format!("<unprintable: {error}>"))
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::{ScoringThresholds, analyze_records};
    use triage_model::RawRecord;

    fn result() -> RunResult {
        let records = vec![
            RawRecord::new("A")
                .with_blood_pressure("150/95")
                .with_temperature(101.2)
                .with_age(70),
            RawRecord::new("B").with_temperature("98.6").with_age(30),
        ];
        RunResult {
            analysis: analyze_records(&records, &ScoringThresholds::default()),
            source: RunSource::File("records.json".to_string()),
            acknowledgment: None,
        }
    }

    #[test]
    fn test_cohort_table_lists_every_cohort() {
        let rendered = cohort_table(&result()).to_string();
        for cohort in Cohort::ALL {
            assert!(rendered.contains(cohort.field_name()), "{rendered}");
        }
    }

    #[test]
    fn test_cohorts_cell_labels() {
        let flags = CohortFlags {
            high_risk: true,
            fever: true,
            data_quality_issue: false,
        };
        assert_eq!(cohorts_cell(flags).content(), "High risk, Fever");
        assert_eq!(cohorts_cell(CohortFlags::default()).content(), "-");
    }

    #[test]
    fn test_payload_json_shape() {
        insta::assert_snapshot!(pretty_json(&result().analysis.cohorts), @r#"
        {
          "high_risk_patients": [
            "A"
          ],
          "fever_patients": [
            "A"
          ],
          "data_quality_issues": [
            "B"
          ]
        }
        "#);
    }
}
