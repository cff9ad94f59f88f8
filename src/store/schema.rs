//! SQLite schema for the document store.

use rusqlite::Connection;

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// Name of the control document the maintenance flag lives in.
pub const CONTROL_DOC: &str = "classNotes";

/// Creates the database schema for the document store.
///
/// Idempotent: calling it on an existing database is safe.
///
/// # Tables Created
/// - `pdfs` - Note documents as JSON bodies, with the upload date lifted
///   out for ordering
/// - `comments` - Reader comments per note
/// - `sponsors` - Sponsor slot documents
/// - `control` - Control documents (maintenance and lock flags)
/// - `search_history` - Search analytics
/// - `interactions` - View/download/ad-click analytics
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS pdfs (
            id TEXT PRIMARY KEY,
            upload_date TEXT NOT NULL,
            body TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_pdfs_upload_date ON pdfs(upload_date DESC);",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY,
            pdf_id TEXT NOT NULL,
            author TEXT NOT NULL,
            text TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_comments_pdf ON comments(pdf_id, timestamp DESC);",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sponsors (
            slot TEXT PRIMARY KEY,
            body TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS control (
            name TEXT PRIMARY KEY,
            is_maintenance INTEGER NOT NULL DEFAULT 0,
            locked INTEGER NOT NULL DEFAULT 0
        );",
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO control (name, is_maintenance, locked) VALUES (?, 0, 0)",
        [CONTROL_DOC],
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS search_history (
            id INTEGER PRIMARY KEY,
            term TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS interactions (
            id INTEGER PRIMARY KEY,
            pdf_id TEXT,
            kind TEXT NOT NULL,
            label TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );",
    )?;

    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;
    let has_version: bool =
        conn.query_row("SELECT EXISTS(SELECT 1 FROM schema_version)", [], |row| row.get(0))?;
    if !has_version {
        conn.execute("INSERT INTO schema_version (version) VALUES (?)", [SCHEMA_VERSION])?;
    }

    Ok(())
}
