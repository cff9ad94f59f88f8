//! Core types: NoteRecord, RecordId, Semester, CategoryFilter, sponsors, comments

mod category;
mod comment;
mod record;
mod record_id;
mod semester;
pub mod share;
mod sponsor;
mod upload;

pub use category::CategoryFilter;
pub use comment::{ANONYMOUS, Comment, CommentError, NewComment};
pub use record::{MalformedRecord, NEW_BADGE_DAYS, NoteRecord, NoteRecordBuilder, RawRecord};
pub use record_id::{ParseRecordIdError, RecordId};
pub use semester::{ParseSemesterError, Semester};
pub use share::SharePayload;
pub use sponsor::{AdSlot, GRID_FALLBACK_SLOT, SponsorBoard, SponsorContent, grid_slot_name};
pub use upload::{
    MAX_UPLOAD_BYTES, PDF_MIME, SelectedFile, UploadError, UploadForm, stored_file_name,
};
