//! Storage layer for work-experience records.
//!
//! Provides persistence for people and their work history using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Load records on one thread and hand the owned `Vec`s to
//! [`hv_core::build_reports`] for parallel computation.
//!
//! # Schema
//!
//! ## Date Format
//!
//! Dates are stored as TEXT in ISO 8601 calendar form (`2024-01-15`). Values
//! written by other tools may carry a time suffix (`2024-01-15 00:00:00`); only
//! the leading date is read. A stored date that cannot be parsed is read as
//! NULL, so a bad start date excludes the record and a bad end date leaves it
//! open-ended.

use std::path::Path;

use chrono::NaiveDate;
use hv_core::{DocumentNumber, RawExperienceRecord, Sector};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Storage date format.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// No person is registered with the document number.
    #[error("no person with document {document}")]
    PersonNotFound { document: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A person as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub person_id: i64,
    pub document_number: String,
    pub document_type: Option<String>,
    pub full_name: Option<String>,
}

/// A person to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub document_number: DocumentNumber,
    pub document_type: Option<String>,
    pub full_name: Option<String>,
}

/// Row counts for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub people: i64,
    pub records: i64,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS people (
                person_id INTEGER PRIMARY KEY,
                document_number TEXT NOT NULL UNIQUE,
                document_type TEXT,
                full_name TEXT
            );

            -- sector: free text, 'PUBLICA' marks public sector employment
            -- start_date/end_date: 'YYYY-MM-DD', NULL when unknown
            CREATE TABLE IF NOT EXISTS work_experience (
                experience_id INTEGER PRIMARY KEY,
                person_id INTEGER NOT NULL,
                sector TEXT,
                employer TEXT,
                role TEXT,
                start_date TEXT,
                end_date TEXT,
                is_current INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY (person_id) REFERENCES people(person_id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_work_experience_person ON work_experience(person_id);
            ",
        )?;
        Ok(())
    }

    /// Registers a person, or fills in missing details of an existing one.
    ///
    /// Returns the person's ID either way.
    pub fn upsert_person(&self, person: &NewPerson) -> Result<i64, DbError> {
        let person_id = self.conn.query_row(
            "
            INSERT INTO people (document_number, document_type, full_name)
            VALUES (?, ?, ?)
            ON CONFLICT(document_number) DO UPDATE SET
                document_type = COALESCE(excluded.document_type, people.document_type),
                full_name = COALESCE(excluded.full_name, people.full_name)
            RETURNING person_id
            ",
            params![
                person.document_number.as_str(),
                person.document_type,
                person.full_name,
            ],
            |row| row.get(0),
        )?;
        Ok(person_id)
    }

    /// Looks up a person by document number.
    pub fn find_person(&self, document: &DocumentNumber) -> Result<Option<Person>, DbError> {
        let person = self
            .conn
            .query_row(
                "
                SELECT person_id, document_number, document_type, full_name
                FROM people
                WHERE document_number = ?
                LIMIT 1
                ",
                [document.as_str()],
                |row| {
                    Ok(Person {
                        person_id: row.get(0)?,
                        document_number: row.get(1)?,
                        document_type: row.get(2)?,
                        full_name: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(person)
    }

    /// Appends work-history records for a person in one transaction.
    pub fn insert_experience(
        &mut self,
        person_id: i64,
        records: &[RawExperienceRecord],
    ) -> Result<usize, DbError> {
        self.write_experience(person_id, records, false)
    }

    /// Replaces a person's whole work history in one transaction.
    pub fn replace_experience(
        &mut self,
        person_id: i64,
        records: &[RawExperienceRecord],
    ) -> Result<usize, DbError> {
        self.write_experience(person_id, records, true)
    }

    fn write_experience(
        &mut self,
        person_id: i64,
        records: &[RawExperienceRecord],
        replace: bool,
    ) -> Result<usize, DbError> {
        if records.is_empty() && !replace {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        if replace {
            let removed = tx.execute(
                "DELETE FROM work_experience WHERE person_id = ?",
                [person_id],
            )?;
            tracing::debug!(person_id, removed, "cleared work experience");
        }
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT INTO work_experience
                (person_id, sector, employer, role, start_date, end_date, is_current)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )?;
            for record in records {
                inserted += stmt.execute(params![
                    person_id,
                    record.sector.as_str(),
                    record.employer_name,
                    record.role_description,
                    record.start_date.map(format_date),
                    record.end_date.map(format_date),
                    record.is_current,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(person_id, inserted, "inserted work experience");
        Ok(inserted)
    }

    /// Loads the full work history for the person with `document`.
    ///
    /// Records are ordered by start date, then insertion order.
    pub fn experience_for(
        &self,
        document: &DocumentNumber,
    ) -> Result<Vec<RawExperienceRecord>, DbError> {
        let person = self
            .find_person(document)?
            .ok_or_else(|| DbError::PersonNotFound {
                document: document.to_string(),
            })?;

        let mut stmt = self.conn.prepare(
            "
            SELECT experience_id, sector, employer, role, start_date, end_date, is_current
            FROM work_experience
            WHERE person_id = ?
            ORDER BY start_date ASC, experience_id ASC
            ",
        )?;
        let rows = stmt.query_map([person.person_id], |row| {
            let experience_id: i64 = row.get(0)?;
            let sector: Option<String> = row.get(1)?;
            let employer: Option<String> = row.get(2)?;
            let role: Option<String> = row.get(3)?;
            let start_date: Option<String> = row.get(4)?;
            let end_date: Option<String> = row.get(5)?;
            let is_current: i64 = row.get(6)?;
            Ok(RawExperienceRecord {
                sector: Sector::from_text(sector.as_deref().unwrap_or_default()),
                employer_name: employer.unwrap_or_default(),
                role_description: role.unwrap_or_default(),
                start_date: parse_stored_date(start_date.as_deref(), experience_id, "start_date"),
                end_date: parse_stored_date(end_date.as_deref(), experience_id, "end_date"),
                is_current: is_current != 0,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        tracing::debug!(%document, records = records.len(), "loaded work experience");
        Ok(records)
    }

    /// Counts registered people and work-history records.
    pub fn counts(&self) -> Result<Counts, DbError> {
        let counts = self.conn.query_row(
            "
            SELECT
                (SELECT COUNT(*) FROM people),
                (SELECT COUNT(*) FROM work_experience)
            ",
            [],
            |row| {
                Ok(Counts {
                    people: row.get(0)?,
                    records: row.get(1)?,
                })
            },
        )?;
        Ok(counts)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Reads a stored date, keeping only its leading `YYYY-MM-DD` part.
fn parse_stored_date(value: Option<&str>, experience_id: i64, column: &str) -> Option<NaiveDate> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    let date_part = value.get(..10).unwrap_or(value);
    match NaiveDate::parse_from_str(date_part, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(experience_id, column, value, error = %e, "ignoring unparseable stored date");
            None
        }
    }
}
