//! Validation of a document upload before anything reaches the store.

use crate::domain::{NoteRecord, RecordId, Semester};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Largest accepted upload (25 MB).
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Only PDFs are accepted.
pub const PDF_MIME: &str = "application/pdf";

static SLIDES_EXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(ppt|pptx)$").expect("valid regex"));

/// Local rejection reasons for an upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("no file selected")]
    MissingFile,

    #[error("invalid file format: only PDFs are allowed")]
    NotPdf,

    #[error("file too large: {size} bytes (max 25MB)")]
    TooLarge { size: u64 },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("file link is required")]
    MissingUrl,
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl SelectedFile {
    /// Rejects non-PDF and oversized files.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.mime_type != PDF_MIME {
            return Err(UploadError::NotPdf);
        }
        if self.size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge { size: self.size });
        }
        Ok(())
    }
}

/// Rewrites slide-deck file names to the `.pdf` name the converted file gets.
pub fn stored_file_name(name: &str) -> String {
    SLIDES_EXT.replace(name, ".pdf").into_owned()
}

/// Form fields of an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    pub author: String,
    pub category: String,
    pub semester: Option<Semester>,
    pub file: Option<SelectedFile>,
    /// Storage link returned by the file host.
    pub file_url: String,
    pub uploaded_by: Option<String>,
    pub uploaded_by_name: Option<String>,
}

impl UploadForm {
    /// Validates the form and produces the record to store.
    ///
    /// `id` is the identifier the store assigned; `today` becomes the upload
    /// date.
    pub fn into_record(self, id: RecordId, today: NaiveDate) -> Result<NoteRecord, UploadError> {
        let file = self.file.ok_or(UploadError::MissingFile)?;
        file.validate()?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(UploadError::MissingField("title"));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(UploadError::MissingField("category"));
        }
        let semester = self.semester.ok_or(UploadError::MissingField("semester"))?;
        let file_url = self.file_url.trim();
        if file_url.is_empty() {
            return Err(UploadError::MissingUrl);
        }

        let mut builder = NoteRecord::builder(id, title, semester, today)
            .description(self.description.trim())
            .author(self.author.trim())
            .category(category)
            .file_url(file_url)
            .file_name(stored_file_name(&file.name));

        if let Some(email) = self.uploaded_by {
            let name = self
                .uploaded_by_name
                .or_else(|| email.split('@').next().map(str::to_string));
            builder = builder.uploaded_by(email, name);
        }

        Ok(builder.build())
    }
}
