//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::catalog::CatalogSource;
use crate::domain::{Comment, NoteRecord, SharePayload};
use crate::render::GridItem;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Rendered HTML fragment
    Html,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct RecordListing {
    pub id: String,
    pub title: String,
    pub category: String,
    pub semester: u8,
    pub upload_date: String,
    pub is_new: bool,
    pub favorite: bool,
}

impl RecordListing {
    pub fn new(record: &NoteRecord, is_new: bool, favorite: bool) -> Self {
        Self {
            id: record.id().to_string(),
            title: record.title().to_string(),
            category: record.category().to_string(),
            semester: record.semester().get(),
            upload_date: record.upload_date().format("%Y-%m-%d").to_string(),
            is_new,
            favorite,
        }
    }
}

/// One grid cell in listing output.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridEntry {
    Card(RecordListing),
    Sponsor {
        slot: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl GridEntry {
    pub fn from_item(item: &GridItem, is_new: impl Fn(&NoteRecord) -> bool, favorite: impl Fn(&NoteRecord) -> bool) -> Self {
        match item {
            GridItem::Card(r) => GridEntry::Card(RecordListing::new(r, is_new(r), favorite(r))),
            GridItem::Sponsor { slot, ad } => GridEntry::Sponsor {
                slot: slot.clone(),
                label: ad.map(|a| a.label().to_string()),
            },
        }
    }
}

/// Result of `ls`.
#[derive(Debug, Serialize)]
pub struct GridListing {
    pub semester: u8,
    pub category: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<CatalogSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<String>,
    pub items: Vec<GridEntry>,
}

/// Result of `sync`.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub source: CatalogSource,
    pub count: usize,
}

/// A comment in listing output.
#[derive(Debug, Serialize)]
pub struct CommentListing {
    pub author: String,
    pub text: String,
    pub timestamp: String,
}

impl From<&Comment> for CommentListing {
    fn from(c: &Comment) -> Self {
        Self {
            author: c.author.clone(),
            text: c.text.clone(),
            timestamp: c.timestamp.to_rfc3339(),
        }
    }
}

/// Result of `show`.
#[derive(Debug, Serialize)]
pub struct RecordDetail {
    #[serde(flatten)]
    pub record: RecordListing,
    pub description: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    pub share: SharePayload,
    pub comments: Vec<CommentListing>,
}

/// A sponsor slot in listing output.
#[derive(Debug, Serialize)]
pub struct SponsorListing {
    pub slot: String,
    pub active: bool,
    pub kind: &'static str,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}
