//! Share text and deep-link URLs for a record.

use crate::domain::{NoteRecord, RecordId};

/// Query parameter carrying a record id in deep links.
pub const DEEP_LINK_PARAM: &str = "pdf";

/// What a shared message calls the document, inferred from its title.
pub fn infer_label(title: &str) -> &'static str {
    let t = title.to_lowercase();

    if t.contains("syllabus") {
        "syllabus"
    } else if t.contains("holiday") {
        "holiday list"
    } else if t.contains("time table") || t.contains("timetable") {
        "timetable"
    } else if t.contains("exam") || t.contains("question") || t.contains("qb") || t.contains("pyq") {
        "question paper"
    } else if t.contains("assignment") {
        "assignment"
    } else {
        "notes"
    }
}

/// Single-word titles and lecturer-name titles say nothing useful in a share
/// message.
pub fn is_weak_title(title: &str) -> bool {
    let t = title.trim().to_lowercase();
    if t.split_whitespace().count() <= 1 {
        return true;
    }
    t.contains("sir") || t.contains("ma'am") || t.contains("mam")
}

/// Builds the message body for sharing a record.
pub fn share_text(title: &str) -> String {
    let label = infer_label(title);
    if is_weak_title(title) {
        format!("Check out these {} on ClassNotes", label)
    } else {
        format!("Check out these {}: {} on ClassNotes", label, title)
    }
}

/// Public URL that opens the record on the site.
pub fn share_url(site_url: &str, id: &RecordId) -> String {
    format!(
        "{}/?{}={}",
        site_url.trim_end_matches('/'),
        DEEP_LINK_PARAM,
        id
    )
}

/// Everything a share sheet needs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_record(record: &NoteRecord, site_url: &str) -> Self {
        Self {
            title: format!("ClassNotes · {}", record.title()),
            text: share_text(record.title()),
            url: share_url(site_url, record.id()),
        }
    }
}
