//! RemoteStore trait and result types.

use crate::domain::{Comment, NewComment, NoteRecord, RawRecord, RecordId, SponsorBoard};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend refused the read; it is deliberately locked.
    #[error("permission denied by the store")]
    PermissionDenied,

    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored document could not be decoded.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A record with this id already exists.
    #[error("record already exists: {id}")]
    Duplicate { id: String },

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// True for authorization failures, which signal maintenance rather
    /// than a fault.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, StoreError::PermissionDenied)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Contents of the control document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSnapshot {
    /// The site is down for maintenance.
    pub maintenance: bool,
}

/// Per-record analytics events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    View,
    Download,
    AdClick,
}

impl InteractionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::View => "view_pdf",
            InteractionKind::Download => "download",
            InteractionKind::AdClick => "ad_click",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document-collection backend.
///
/// Reads return raw documents; normalization into [`NoteRecord`] happens in
/// the catalog layer so malformed documents can be skipped and reported
/// there. Record reads fail with [`StoreError::PermissionDenied`] while the
/// backend is locked.
pub trait RemoteStore {
    /// All note documents, newest upload date first.
    fn fetch_all_newest_first(&self) -> StoreResult<Vec<RawRecord>>;

    /// Id of the single newest document, or `None` for an empty collection.
    fn probe_newest(&self) -> StoreResult<Option<RecordId>>;

    /// Current contents of the control document.
    fn read_control(&self) -> StoreResult<ControlSnapshot>;

    /// All sponsor slots.
    fn fetch_sponsors(&self) -> StoreResult<SponsorBoard>;

    /// Comments on a record, newest first.
    fn fetch_comments(&self, id: &RecordId) -> StoreResult<Vec<Comment>>;

    /// Posts a validated comment, returning it as stored.
    fn post_comment(&mut self, comment: NewComment) -> StoreResult<Comment>;

    /// Adds a new note record.
    fn add_record(&mut self, record: &NoteRecord) -> StoreResult<()>;

    /// Fire-and-forget search analytics.
    fn log_search(&mut self, term: &str) -> StoreResult<()>;

    /// Fire-and-forget interaction analytics.
    fn log_interaction(
        &mut self,
        kind: InteractionKind,
        label: &str,
        record: Option<&RecordId>,
    ) -> StoreResult<()>;
}
