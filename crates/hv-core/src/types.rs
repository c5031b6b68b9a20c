//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Identity document number of a person (e.g. `CC1001`).
///
/// Surrounding whitespace is stripped; the number itself is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Creates a new document number after validation.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "document_number",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the document number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentNumber> for String {
    fn from(doc: DocumentNumber) -> Self {
        doc.0
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for DocumentNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_number_trims_whitespace() {
        let doc = DocumentNumber::new("  CC1001 ").unwrap();
        assert_eq!(doc.as_str(), "CC1001");
    }

    #[test]
    fn document_number_rejects_blank() {
        let err = DocumentNumber::new("   ").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: "document_number"
            }
        );
        assert_eq!(err.to_string(), "document_number cannot be empty");
    }

    #[test]
    fn document_number_deserializes_with_validation() {
        let doc: DocumentNumber = serde_json::from_str(r#""CE2001""#).unwrap();
        assert_eq!(doc.to_string(), "CE2001");

        let err = serde_json::from_str::<DocumentNumber>(r#""""#);
        assert!(err.is_err());
    }
}
