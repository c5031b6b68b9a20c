//! Report command for experience time reports.
//!
//! This module implements `hv report` for one or more document numbers, with
//! human-readable and JSON output.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use hv_core::{Category, DocumentNumber, ExperienceReport, build_reports};
use hv_db::Database;
use serde::Serialize;

/// Width of the category column in text output.
const LABEL_WIDTH: usize = 26;

/// Report for one person.
#[derive(Debug, Serialize)]
pub struct PersonReport {
    pub document_number: DocumentNumber,
    #[serde(rename = "experience_report")]
    pub report: ExperienceReport,
}

// ========== Report Generation ==========

/// Loads each person's work history and builds their reports as of `today`.
///
/// Fails on the first unknown document number.
pub fn generate_reports(
    db: &Database,
    documents: &[DocumentNumber],
    today: NaiveDate,
) -> Result<Vec<PersonReport>> {
    let mut histories = Vec::with_capacity(documents.len());
    for document in documents {
        histories.push(db.experience_for(document)?);
    }

    let reports = build_reports(&histories, today);
    Ok(documents
        .iter()
        .cloned()
        .zip(reports)
        .map(|(document_number, report)| PersonReport {
            document_number,
            report,
        })
        .collect())
}

// ========== Text Output ==========

/// Writes the human-readable report table for each person.
pub fn format_report<W: Write>(
    writer: &mut W,
    reports: &[PersonReport],
    today: NaiveDate,
) -> std::io::Result<()> {
    let rule = "─".repeat(LABEL_WIDTH + 30);
    for (i, person) in reports.iter().enumerate() {
        if i > 0 {
            writeln!(writer)?;
        }
        writeln!(
            writer,
            "EXPERIENCE REPORT: {} (as of {today})",
            person.document_number
        )?;
        writeln!(writer)?;
        writeln!(writer, "{:<LABEL_WIDTH$}{:>6}  DURATION", "CATEGORY", "MONTHS")?;
        writeln!(writer, "{rule}")?;
        for row in person.report.rows() {
            if row.category == Category::Total {
                writeln!(writer, "{rule}")?;
            }
            writeln!(
                writer,
                "{:<LABEL_WIDTH$}{:>6}  {}",
                row.category.label(),
                row.total_months,
                row.description
            )?;
        }
    }
    Ok(())
}

// ========== JSON Output ==========

/// Formats reports as JSON: one object for a single person, an array otherwise.
pub fn format_report_json(reports: &[PersonReport]) -> Result<String> {
    let output = match reports {
        [single] => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(reports)?,
    };
    Ok(output)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    documents: &[DocumentNumber],
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let reports = generate_reports(db, documents, today)?;

    if json {
        writeln!(writer, "{}", format_report_json(&reports)?)?;
    } else {
        format_report(writer, &reports, today)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hv_core::{RawExperienceRecord, Sector};
    use hv_db::NewPerson;
    use insta::assert_snapshot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn doc(value: &str) -> DocumentNumber {
        DocumentNumber::new(value).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn seed(db: &mut Database, document: &str, records: &[RawExperienceRecord]) {
        let person_id = db
            .upsert_person(&NewPerson {
                document_number: doc(document),
                document_type: Some("CC".to_string()),
                full_name: None,
            })
            .unwrap();
        db.insert_experience(person_id, records).unwrap();
    }

    fn seeded_db() -> Database {
        let mut db = Database::open_in_memory().unwrap();
        seed(
            &mut db,
            "CC1001",
            &[
                RawExperienceRecord::new(Sector::Public, date(2015, 3, 1), Some(date(2018, 7, 31))),
                RawExperienceRecord::new(Sector::Public, date(2017, 1, 1), Some(date(2019, 1, 1))),
                RawExperienceRecord::new(Sector::Other, date(2018, 1, 1), Some(date(2019, 7, 1)))
                    .with_employer("Bancolombia"),
                RawExperienceRecord::new(Sector::Other, date(2023, 6, 15), None)
                    .with_employer("Consultor Independiente S.A.S")
                    .current(),
            ],
        );
        seed(&mut db, "CE2001", &[]);
        db
    }

    #[test]
    fn test_generate_reports_merges_overlaps() {
        let db = seeded_db();
        let reports = generate_reports(&db, &[doc("CC1001")], today()).unwrap();
        assert_eq!(reports.len(), 1);

        let report = &reports[0].report;
        assert_eq!(report.row(Category::PublicServant).total_months, 46);
        assert_eq!(report.row(Category::PrivateEmployee).total_months, 18);
        assert_eq!(report.row(Category::IndependentWorker).total_months, 12);
        // 2015-03-01..2019-07-01 plus 2023-06-15..2024-06-15
        assert_eq!(report.total().total_months, 52 + 12);
    }

    #[test]
    fn test_generate_reports_unknown_document_fails() {
        let db = seeded_db();
        let err = generate_reports(&db, &[doc("CC1001"), doc("CC404")], today()).unwrap_err();
        assert_eq!(err.to_string(), "no person with document CC404");
    }

    #[test]
    fn test_report_text_output() {
        let db = seeded_db();
        let reports = generate_reports(&db, &[doc("CC1001")], today()).unwrap();
        let mut output = Vec::new();
        format_report(&mut output, &reports, today()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        EXPERIENCE REPORT: CC1001 (as of 2024-06-15)

        CATEGORY                  MONTHS  DURATION
        ────────────────────────────────────────────────────────
        Public servant                46  3 years and 10 months
        Private sector employee       18  1 years and 6 months
        Independent worker            12  1 years and 0 months
        ────────────────────────────────────────────────────────
        Total experience              64  5 years and 4 months
        ");
    }

    #[test]
    fn test_report_text_output_without_records() {
        let db = seeded_db();
        let reports = generate_reports(&db, &[doc("CE2001")], today()).unwrap();
        let mut output = Vec::new();
        format_report(&mut output, &reports, today()).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with("EXPERIENCE REPORT: CE2001 (as of 2024-06-15)\n"));
        assert_eq!(output.matches("0 years and 0 months").count(), 4);
    }

    #[test]
    fn test_report_json_single_person() {
        let db = seeded_db();
        let reports = generate_reports(&db, &[doc("CE2001")], today()).unwrap();
        let output = format_report_json(&reports).unwrap();

        assert_snapshot!(output, @r#"
        {
          "document_number": "CE2001",
          "experience_report": [
            {
              "category": "PUBLIC_SERVANT",
              "years": 0,
              "months": 0,
              "total_months": 0,
              "description": "0 years and 0 months"
            },
            {
              "category": "PRIVATE_EMPLOYEE",
              "years": 0,
              "months": 0,
              "total_months": 0,
              "description": "0 years and 0 months"
            },
            {
              "category": "INDEPENDENT_WORKER",
              "years": 0,
              "months": 0,
              "total_months": 0,
              "description": "0 years and 0 months"
            },
            {
              "category": "TOTAL",
              "years": 0,
              "months": 0,
              "total_months": 0,
              "description": "0 years and 0 months"
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_report_json_many_people_is_array() {
        let db = seeded_db();
        let reports = generate_reports(&db, &[doc("CC1001"), doc("CE2001")], today()).unwrap();
        let output = format_report_json(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        let people = value.as_array().unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[0]["document_number"], "CC1001");
        assert_eq!(people[0]["experience_report"][3]["total_months"], 64);
        assert_eq!(people[1]["document_number"], "CE2001");
    }

    #[test]
    fn test_run_writes_json_line() {
        let db = seeded_db();
        let mut output = Vec::new();
        run(&mut output, &db, &[doc("CC1001")], today(), true).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["experience_report"][0]["description"], "3 years and 10 months");
    }
}
