//! Reader comments attached to a record.

use crate::domain::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Author shown when a commenter leaves the name blank.
pub const ANONYMOUS: &str = "Anonymous";

/// A posted comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub record_id: RecordId,
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A validated comment waiting to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    record_id: RecordId,
    author: String,
    text: String,
}

/// Input rejected before any store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    #[error("comment text cannot be empty")]
    EmptyText,
}

impl NewComment {
    /// Validates comment input. Text is trimmed and must be non-empty; a
    /// blank author becomes [`ANONYMOUS`].
    pub fn new(record_id: RecordId, author: Option<&str>, text: &str) -> Result<Self, CommentError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CommentError::EmptyText);
        }
        let author = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(ANONYMOUS);

        Ok(Self {
            record_id,
            author: author.to_string(),
            text: text.to_string(),
        })
    }

    pub fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Stamps the comment, producing the stored form.
    pub fn into_comment(self, timestamp: DateTime<Utc>) -> Comment {
        Comment {
            record_id: self.record_id,
            author: self.author,
            text: self.text,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> RecordId {
        "r1".parse().unwrap()
    }

    #[test]
    fn rejects_blank_text() {
        assert_eq!(NewComment::new(id(), None, "  \n ").unwrap_err(), CommentError::EmptyText);
    }

    #[test]
    fn blank_author_is_anonymous() {
        let c = NewComment::new(id(), Some("   "), "hi").unwrap();
        assert_eq!(c.author(), ANONYMOUS);
        let c = NewComment::new(id(), None, "hi").unwrap();
        assert_eq!(c.author(), ANONYMOUS);
    }

    #[test]
    fn trims_fields() {
        let c = NewComment::new(id(), Some(" Riya "), "  great notes ").unwrap();
        assert_eq!(c.author(), "Riya");
        assert_eq!(c.text(), "great notes");
    }
}
