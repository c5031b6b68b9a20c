//! Import command for loading people and work history into the local `SQLite` store.
//!
//! Input is JSON Lines, one person per line:
//!
//! ```json
//! {"document_number":"CC1001","document_type":"CC","full_name":"Ana Maria Lopez",
//!  "experience":[{"sector":"PUBLICA","employer":"Alcaldía","role":"Profesional",
//!                 "start_date":"2019-01-01","end_date":"2020-01-01","is_current":false}]}
//! ```

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use hv_core::{DocumentNumber, RawExperienceRecord};
use hv_db::{Database, NewPerson};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Replace each imported person's existing work history instead of appending.
    #[arg(long)]
    pub replace: bool,
}

/// Totals for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub people: usize,
    pub records: usize,
}

pub fn run<R: BufRead>(reader: R, args: &ImportArgs, db: &mut Database) -> Result<ImportStats> {
    let people = parse_people(reader)?;

    let mut stats = ImportStats::default();
    for person in people {
        let new_person = NewPerson {
            document_number: person.document_number.clone(),
            document_type: person.document_type,
            full_name: person.full_name,
        };
        let person_id = db
            .upsert_person(&new_person)
            .with_context(|| format!("failed to save person {}", person.document_number))?;
        let saved = if args.replace {
            db.replace_experience(person_id, &person.experience)
        } else {
            db.insert_experience(person_id, &person.experience)
        };
        let written = saved
            .with_context(|| format!("failed to save experience for {}", person.document_number))?;

        stats.people += 1;
        stats.records += written;
    }

    tracing::debug!(people = stats.people, records = stats.records, "import finished");
    Ok(stats)
}

fn parse_people<R: BufRead>(reader: R) -> Result<Vec<ImportPerson>> {
    let mut people = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let parsed: ImportPerson = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid JSON on line {}", idx + 1))?;
        people.push(parsed);
    }
    Ok(people)
}

#[derive(Debug, Deserialize)]
struct ImportPerson {
    document_number: DocumentNumber,
    #[serde(default)]
    document_type: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    experience: Vec<RawExperienceRecord>,
}
