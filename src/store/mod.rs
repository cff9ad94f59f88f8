//! Document store trait and its SQLite implementation

#[cfg(test)]
pub(crate) mod fake;
mod repository;
mod schema;
mod sqlite;

pub use repository::{ControlSnapshot, InteractionKind, RemoteStore, StoreError, StoreResult};
pub use schema::{CONTROL_DOC, SCHEMA_VERSION, create_schema};
pub use sqlite::{ControlFlags, SqliteStore};
