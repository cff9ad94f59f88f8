//! Opaque record identifier assigned by the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// A stable, opaque identifier for a note record.
///
/// Identifiers are assigned by the store when a record is created and never
/// change afterwards. The crate treats them as opaque strings: any non-empty
/// value without whitespace or URL-reserved characters is accepted, so ids
/// minted by other backends round-trip unchanged.
///
/// # Examples
///
/// ```
/// use classnotes::domain::RecordId;
///
/// let id: RecordId = "a1b2c3".parse().unwrap();
/// assert_eq!(id.as_str(), "a1b2c3");
///
/// let minted = RecordId::generate();
/// assert_eq!(minted.as_str().len(), 26);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Mints a fresh identifier (a ULID string).
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid record identifier.
#[derive(Debug, Clone)]
pub struct ParseRecordIdError {
    value: String,
    reason: &'static str,
}

impl ParseRecordIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseRecordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid record id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseRecordIdError {}

impl FromStr for RecordId {
    type Err = ParseRecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParseRecordIdError {
            value: s.to_string(),
            reason,
        };

        if s.is_empty() {
            return Err(err("id cannot be empty"));
        }
        if s.chars().any(char::is_whitespace) {
            return Err(err("id cannot contain whitespace"));
        }
        if s.chars().any(|c| matches!(c, '/' | '?' | '#' | '&' | '=')) {
            return Err(err("id cannot contain URL-reserved characters"));
        }

        Ok(Self(s.to_string()))
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
