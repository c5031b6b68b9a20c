//! Work-history records as read from storage.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::fold_accents;

/// Sector of the employer for a work-history entry.
///
/// Stored as free text. Only spellings of "pública" are recognized as
/// [`Sector::Public`]; any other value (including empty) is [`Sector::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sector {
    Public,
    #[default]
    Other,
}

impl Sector {
    /// Parses the free-text sector column, ignoring case, accents and padding.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match fold_accents(text.trim()).as_str() {
            "publica" | "publico" | "public" => Self::Public,
            _ => Self::Other,
        }
    }

    /// Canonical string used for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "PUBLICA",
            Self::Other => "PRIVADA",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Sector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Sector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_text(&s))
    }
}

/// One work-history entry for a person.
///
/// A record without `start_date` cannot be placed in time and is excluded
/// from every total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawExperienceRecord {
    #[serde(default)]
    pub sector: Sector,

    /// Employer name; may be empty.
    #[serde(default, alias = "employer")]
    pub employer_name: String,

    /// Role or contract description; may be empty.
    #[serde(default, alias = "role")]
    pub role_description: String,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Ongoing engagement. Overrides any stored `end_date`.
    #[serde(default)]
    pub is_current: bool,
}

impl RawExperienceRecord {
    /// Creates a record with the given sector and dates and no employer text.
    #[must_use]
    pub fn new(sector: Sector, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            sector,
            start_date: Some(start_date),
            end_date,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_employer(mut self, employer: impl Into<String>) -> Self {
        self.employer_name = employer.into();
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role_description = role.into();
        self
    }

    /// Marks the record as an ongoing engagement.
    #[must_use]
    pub const fn current(mut self) -> Self {
        self.is_current = true;
        self
    }
}
