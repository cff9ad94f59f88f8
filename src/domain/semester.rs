//! Semester number partitioning the catalog into tabs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A semester tab: a small positive integer.
///
/// Semesters are mutually exclusive partitions of the catalog. Zero is not a
/// semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Semester(u8);

impl Semester {
    /// Semester shown when no preference has been stored.
    pub const DEFAULT: Semester = Semester(2);

    /// Largest accepted semester number.
    pub const MAX: u8 = 12;

    /// Creates a semester, rejecting zero and values above [`Semester::MAX`].
    pub fn new(n: u32) -> Result<Self, ParseSemesterError> {
        if n == 0 || n > Self::MAX as u32 {
            return Err(ParseSemesterError(n.to_string()));
        }
        Ok(Self(n as u8))
    }

    /// Returns the semester number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Semester {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a value is not a valid semester.
#[derive(Debug, Clone)]
pub struct ParseSemesterError(String);

impl fmt::Display for ParseSemesterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid semester '{}': expected an integer between 1 and {}",
            self.0,
            Semester::MAX
        )
    }
}

impl std::error::Error for ParseSemesterError {}

impl FromStr for Semester {
    type Err = ParseSemesterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| ParseSemesterError(s.to_string()))?;
        Self::new(n)
    }
}

impl TryFrom<u32> for Semester {
    type Error = ParseSemesterError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<Semester> for u32 {
    fn from(s: Semester) -> u32 {
        s.0 as u32
    }
}
