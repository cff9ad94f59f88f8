//! Operator-side methods: control flags, sponsor slots, analytics reads.

use super::SqliteStore;
use crate::domain::AdSlot;
use crate::store::schema::CONTROL_DOC;
use crate::store::{StoreError, StoreResult};
use serde::Serialize;
use tracing::info;

/// Both flags of the control document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlFlags {
    pub maintenance: bool,
    pub locked: bool,
}

impl SqliteStore {
    /// Reads both control flags.
    pub fn control_flags(&self) -> StoreResult<ControlFlags> {
        let (maintenance, locked) = self.conn.query_row(
            "SELECT is_maintenance, locked FROM control WHERE name = ?",
            [CONTROL_DOC],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(ControlFlags {
            maintenance,
            locked,
        })
    }

    /// Overwrites the control document.
    pub fn set_control(&mut self, flags: ControlFlags) -> StoreResult<()> {
        self.conn.execute(
            "UPDATE control SET is_maintenance = ?, locked = ? WHERE name = ?",
            rusqlite::params![flags.maintenance, flags.locked, CONTROL_DOC],
        )?;
        info!(
            maintenance = flags.maintenance,
            locked = flags.locked,
            "control document updated"
        );
        Ok(())
    }

    /// Creates or replaces a sponsor slot.
    pub fn put_sponsor(&mut self, slot: &str, ad: &AdSlot) -> StoreResult<()> {
        let body =
            serde_json::to_string(ad).map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO sponsors (slot, body) VALUES (?, ?)
             ON CONFLICT(slot) DO UPDATE SET body = excluded.body",
            rusqlite::params![slot, body],
        )?;
        Ok(())
    }

    /// Deletes a sponsor slot. Returns false if it did not exist.
    pub fn remove_sponsor(&mut self, slot: &str) -> StoreResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM sponsors WHERE slot = ?", [slot])?;
        Ok(n > 0)
    }

    /// Logged search terms, oldest first.
    pub fn search_history(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT term FROM search_history ORDER BY id")?;
        let terms = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(terms)
    }

    /// Number of logged interactions of the given kind name.
    pub fn interaction_count(&self, kind: &str) -> StoreResult<usize> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM interactions WHERE kind = ?",
            [kind],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }
}
