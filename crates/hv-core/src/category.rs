//! Employment category enum and the record classifier.

use std::fmt;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::record::{RawExperienceRecord, Sector};

/// Employment categories, in report order.
///
/// [`Category::Total`] is never assigned to a record; it labels the row that
/// covers the union of every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    PublicServant,
    PrivateEmployee,
    IndependentWorker,
    Total,
}

impl Category {
    /// All categories in the fixed report order.
    pub const ALL: [Self; 4] = [
        Self::PublicServant,
        Self::PrivateEmployee,
        Self::IndependentWorker,
        Self::Total,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PublicServant => "PUBLIC_SERVANT",
            Self::PrivateEmployee => "PRIVATE_EMPLOYEE",
            Self::IndependentWorker => "INDEPENDENT_WORKER",
            Self::Total => "TOTAL",
        }
    }

    /// Human-readable label for rendered reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PublicServant => "Public servant",
            Self::PrivateEmployee => "Private sector employee",
            Self::IndependentWorker => "Independent worker",
            Self::Total => "Total experience",
        }
    }

    /// Position of this category in [`Category::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::PublicServant => 0,
            Self::PrivateEmployee => 1,
            Self::IndependentWorker => 2,
            Self::Total => 3,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Substrings in employer or role text that mark independent work.
///
/// Plain substring match: "servicio" also matches "Servicios XYZ S.A.", which
/// may be an ordinary employer.
const INDEPENDENT_MARKERS: &[&str] = &["independiente", "freelance", "freelan", "servicio"];

/// Classifies a record into one of the three assignable categories.
///
/// Public sector always wins; otherwise employer or role text mentioning
/// independent work selects [`Category::IndependentWorker`], and everything
/// else is [`Category::PrivateEmployee`].
#[must_use]
pub fn classify(record: &RawExperienceRecord) -> Category {
    if record.sector == Sector::Public {
        Category::PublicServant
    } else if mentions_independent_work(&record.employer_name)
        || mentions_independent_work(&record.role_description)
    {
        Category::IndependentWorker
    } else {
        Category::PrivateEmployee
    }
}

fn mentions_independent_work(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let folded = fold_accents(text);
    INDEPENDENT_MARKERS
        .iter()
        .any(|marker| folded.contains(marker))
}

/// Lowercases and strips diacritics, whether they arrive precomposed (`í`)
/// or as a base letter followed by a combining mark (`i\u{301}`).
pub(crate) fn fold_accents(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
