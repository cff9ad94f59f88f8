//! Command handlers for the CLI.

mod admin;
mod browse;
mod comments;
mod favorites;
mod list;
mod show;
mod sync;
mod upload;


use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::App;
use crate::debounce::{Clock, SystemClock};
use crate::domain::{NoteRecord, RecordId};
use crate::infra::{FileStorage, LocalStorage};
use crate::render::{Grid, GridItem};
use crate::store::{RemoteStore, SqliteStore};

// Re-export public items
pub use admin::{handle_maintenance, handle_sponsor, handle_watch};
pub use browse::{handle_browse, run_session};
pub use comments::{handle_comment, handle_comments};
pub use favorites::{handle_fav, handle_favs};
pub use list::handle_list;
pub use show::handle_show;
pub use sync::handle_sync;
pub use upload::{detect_mime, handle_import, handle_upload, read_import};

// ===========================================
// Shared Utilities
// ===========================================

/// Resolved settings shared by every handler.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub site_url: String,
    pub debounce: Duration,
}

/// The application state as the CLI uses it.
pub(crate) type CliApp = App<SqliteStore, FileStorage, SystemClock>;

/// Returns the store database path for a data directory.
pub(crate) fn store_db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("store.db")
}

/// Returns the local key/value file for a data directory.
pub(crate) fn local_storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join("local.json")
}

pub(crate) fn open_store(data_dir: &Path) -> Result<SqliteStore> {
    let db_path = store_db_path(data_dir);
    SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open store at {}", db_path.display()))
}

pub(crate) fn open_storage(data_dir: &Path) -> Result<FileStorage> {
    let path = local_storage_path(data_dir);
    FileStorage::open(&path)
        .with_context(|| format!("failed to open local storage at {}", path.display()))
}

/// Opens the store and local storage without loading anything.
pub(crate) fn open_app(settings: &Settings) -> Result<CliApp> {
    let store = open_store(&settings.data_dir)?;
    let storage = open_storage(&settings.data_dir)?;
    Ok(App::with_clock(store, storage, SystemClock, settings.debounce))
}

/// Opens the app and runs the initial load.
pub(crate) fn boot_app(settings: &Settings, deep_link: Option<&str>) -> Result<CliApp> {
    let mut app = open_app(settings)?;
    app.bootstrap(deep_link);
    Ok(app)
}

pub(crate) fn parse_id(s: &str) -> Result<RecordId> {
    s.parse().with_context(|| format!("invalid note id: '{}'", s))
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Writes one table row for a record.
pub(crate) fn write_record_row<W: Write>(
    out: &mut W,
    record: &NoteRecord,
    is_new: bool,
    favorite: bool,
) -> std::io::Result<()> {
    let marks = format!(
        "{}{}",
        if favorite { "*" } else { " " },
        if is_new { "N" } else { " " }
    );
    writeln!(
        out,
        "{:<26}  {:<2}  {:<40}  {:<12}  {:>10}",
        record.id(),
        marks,
        truncate_str(record.title(), 40),
        truncate_str(record.category(), 12),
        record.upload_date().format("%Y-%m-%d")
    )
}

/// Writes the laid-out grid as a table, sponsor blocks included.
pub(crate) fn write_grid<S, L, C, W>(out: &mut W, app: &App<S, L, C>, grid: &Grid) -> std::io::Result<()>
where
    S: RemoteStore,
    L: LocalStorage,
    C: Clock,
    W: Write,
{
    match grid {
        Grid::Empty(state) => {
            writeln!(out, "{}", state.heading())?;
            writeln!(out, "{}", state.message())?;
        }
        Grid::Items(items) => {
            for item in items {
                match item {
                    GridItem::Card(r) => write_record_row(
                        out,
                        r,
                        r.is_new(app.today()),
                        app.favorites().contains(r.id()),
                    )?,
                    GridItem::Sponsor { ad: Some(ad), .. } => {
                        writeln!(out, "  -- Sponsored: {}", ad.label())?
                    }
                    GridItem::Sponsor { ad: None, .. } => writeln!(out, "  -- Advertise Here")?,
                }
            }
            writeln!(out)?;
            writeln!(out, "{} note(s)", grid.cards().len())?;
        }
    }
    Ok(())
}
