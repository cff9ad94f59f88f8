//! SQLite-backed document store.

mod admin;
mod connection;
mod store_impl;


use rusqlite::Connection;

pub use admin::ControlFlags;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed implementation of [`RemoteStore`](crate::store::RemoteStore).
///
/// Plays the role of the hosted document backend: note documents are kept
/// as JSON bodies, the control document carries the maintenance and lock
/// flags, and analytics are appended to their own tables.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
