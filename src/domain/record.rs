//! Note record metadata and the normalization step at the store boundary.

use crate::domain::{RecordId, Semester};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Records uploaded within this many days carry the "new" badge.
pub const NEW_BADGE_DAYS: i64 = 7;

/// Metadata of one uploaded document.
///
/// Records are immutable once fetched; the only way to change one is a
/// re-upload. Serialized with the camelCase field names the document store
/// and the local cache use.
///
/// # Examples
///
/// ```
/// use classnotes::domain::{NoteRecord, Semester};
/// use chrono::NaiveDate;
///
/// let record = NoteRecord::builder(
///     "a".parse().unwrap(),
///     "Alkenes",
///     Semester::new(1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 9, 22).unwrap(),
/// )
/// .category("Organic")
/// .build();
/// assert_eq!(record.category(), "Organic");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    id: RecordId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    category: String,
    semester: Semester,
    upload_date: NaiveDate,
    #[serde(default, alias = "pdfUrl", skip_serializing_if = "Option::is_none")]
    file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uploaded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uploaded_by_name: Option<String>,
}

impl NoteRecord {
    /// Creates a builder with the required fields.
    pub fn builder(
        id: RecordId,
        title: impl Into<String>,
        semester: Semester,
        upload_date: NaiveDate,
    ) -> NoteRecordBuilder {
        NoteRecordBuilder::new(id, title, semester, upload_date)
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn semester(&self) -> Semester {
        self.semester
    }

    pub fn upload_date(&self) -> NaiveDate {
        self.upload_date
    }

    /// Returns the link to the stored document, if any.
    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn uploaded_by(&self) -> Option<&str> {
        self.uploaded_by.as_deref()
    }

    pub fn uploaded_by_name(&self) -> Option<&str> {
        self.uploaded_by_name.as_deref()
    }

    /// Returns true if the record was uploaded within the last
    /// [`NEW_BADGE_DAYS`] days relative to `today`.
    pub fn is_new(&self, today: NaiveDate) -> bool {
        let age = (today - self.upload_date).num_days();
        (0..=NEW_BADGE_DAYS).contains(&age)
    }

    /// Case-insensitive substring match across title, description,
    /// category and author. `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [
            &self.title,
            &self.description,
            &self.category,
            &self.author,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

impl fmt::Display for NoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id)
    }
}

impl fmt::Debug for NoteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoteRecord")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("category", &self.category)
            .field("semester", &self.semester)
            .field("upload_date", &self.upload_date)
            .finish_non_exhaustive()
    }
}

/// Builder for [`NoteRecord`] with optional fields.
pub struct NoteRecordBuilder {
    record: NoteRecord,
}

impl NoteRecordBuilder {
    fn new(id: RecordId, title: impl Into<String>, semester: Semester, upload_date: NaiveDate) -> Self {
        Self {
            record: NoteRecord {
                id,
                title: title.into().trim().to_string(),
                description: String::new(),
                author: String::new(),
                category: String::new(),
                semester,
                upload_date,
                file_url: None,
                file_name: None,
                uploaded_by: None,
                uploaded_by_name: None,
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.description = description.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.record.author = author.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.record.category = category.into();
        self
    }

    pub fn file_url(mut self, url: impl Into<String>) -> Self {
        self.record.file_url = Some(url.into());
        self
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.record.file_name = Some(name.into());
        self
    }

    pub fn uploaded_by(mut self, email: impl Into<String>, name: Option<String>) -> Self {
        self.record.uploaded_by = Some(email.into());
        self.record.uploaded_by_name = name;
        self
    }

    pub fn build(self) -> NoteRecord {
        self.record
    }
}

// ===========================================
// Boundary normalization
// ===========================================

/// A loosely-typed document as it comes out of the store or an import file.
///
/// Every field is optional; [`RawRecord::normalize`] turns it into a
/// [`NoteRecord`] or rejects it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub semester: Option<serde_json::Value>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default, alias = "pdfUrl")]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub uploaded_by_name: Option<String>,
}

/// Reasons a raw document cannot become a [`NoteRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    #[error("missing or invalid id")]
    InvalidId,

    #[error("record {0}: title is missing or blank")]
    MissingTitle(String),

    #[error("record {0}: semester is missing or invalid")]
    InvalidSemester(String),

    #[error("record {id}: invalid upload date '{value}'")]
    InvalidUploadDate { id: String, value: String },
}

impl RawRecord {
    /// Validates and normalizes the document.
    ///
    /// `id` overrides the document's own `id` field (store documents carry
    /// their id outside the body). Blank optional text fields become empty
    /// strings; a blank `fileUrl` becomes `None`.
    pub fn normalize(self, id: Option<&str>) -> Result<NoteRecord, MalformedRecord> {
        let id_str = id
            .map(str::to_string)
            .or(self.id)
            .ok_or(MalformedRecord::InvalidId)?;
        let id: RecordId = id_str.parse().map_err(|_| MalformedRecord::InvalidId)?;

        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MalformedRecord::MissingTitle(id.to_string()))?;

        let semester = self
            .semester
            .as_ref()
            .and_then(semester_from_value)
            .ok_or_else(|| MalformedRecord::InvalidSemester(id.to_string()))?;

        let date_str = self.upload_date.unwrap_or_default();
        let upload_date =
            parse_upload_date(&date_str).ok_or_else(|| MalformedRecord::InvalidUploadDate {
                id: id.to_string(),
                value: date_str.clone(),
            })?;

        let non_blank = |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(NoteRecord {
            id,
            title,
            description: self.description.unwrap_or_default().trim().to_string(),
            author: self.author.unwrap_or_default().trim().to_string(),
            category: self.category.unwrap_or_default().trim().to_string(),
            semester,
            upload_date,
            file_url: non_blank(self.file_url),
            file_name: non_blank(self.file_name),
            uploaded_by: non_blank(self.uploaded_by),
            uploaded_by_name: non_blank(self.uploaded_by_name),
        })
    }
}

impl From<&NoteRecord> for RawRecord {
    fn from(record: &NoteRecord) -> Self {
        Self {
            id: Some(record.id.to_string()),
            title: Some(record.title.clone()),
            description: Some(record.description.clone()),
            author: Some(record.author.clone()),
            category: Some(record.category.clone()),
            semester: Some(serde_json::Value::from(record.semester.get())),
            upload_date: Some(record.upload_date.format("%Y-%m-%d").to_string()),
            file_url: record.file_url.clone(),
            file_name: record.file_name.clone(),
            uploaded_by: record.uploaded_by.clone(),
            uploaded_by_name: record.uploaded_by_name.clone(),
        }
    }
}

fn semester_from_value(value: &serde_json::Value) -> Option<Semester> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .and_then(|n| Semester::new(n).ok()),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Parses an ISO date, accepting a full timestamp and keeping its date part.
fn parse_upload_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
