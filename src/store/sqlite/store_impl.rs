//! RemoteStore trait implementation for SqliteStore.

use super::SqliteStore;
use crate::domain::{AdSlot, Comment, NewComment, NoteRecord, RawRecord, RecordId, SponsorBoard};
use crate::store::schema::CONTROL_DOC;
use crate::store::{ControlSnapshot, InteractionKind, RemoteStore, StoreError, StoreResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::OptionalExtension;
use std::collections::BTreeMap;
use tracing::{debug, warn};

impl SqliteStore {
    /// Fails with `PermissionDenied` while the control document is locked.
    fn ensure_readable(&self) -> StoreResult<()> {
        let locked: bool = self
            .conn
            .query_row(
                "SELECT locked FROM control WHERE name = ?",
                [CONTROL_DOC],
                |row| row.get(0),
            )
            .optional()?
            .unwrap_or(false);

        if locked {
            debug!("record read refused: store is locked");
            return Err(StoreError::PermissionDenied);
        }
        Ok(())
    }
}

fn decode_document(id: String, body: &str) -> StoreResult<RawRecord> {
    let mut raw: RawRecord = serde_json::from_str(body)
        .map_err(|e| StoreError::InvalidDocument(format!("pdfs/{}: {}", id, e)))?;
    raw.id = Some(id);
    Ok(raw)
}

impl RemoteStore for SqliteStore {
    fn fetch_all_newest_first(&self) -> StoreResult<Vec<RawRecord>> {
        self.ensure_readable()?;

        let mut stmt = self
            .conn
            .prepare("SELECT id, body FROM pdfs ORDER BY upload_date DESC, rowid DESC")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut docs = Vec::with_capacity(rows.len());
        for (id, body) in rows {
            match decode_document(id.clone(), &body) {
                Ok(raw) => docs.push(raw),
                // Undecodable bodies still occupy their position; keep the id
                // so the newest-id fingerprint stays aligned with the probe.
                Err(e) => {
                    warn!(error = %e, "undecodable document");
                    docs.push(RawRecord {
                        id: Some(id),
                        ..Default::default()
                    });
                }
            }
        }

        debug!(count = docs.len(), "fetched all documents");
        Ok(docs)
    }

    fn probe_newest(&self) -> StoreResult<Option<RecordId>> {
        self.ensure_readable()?;

        let id: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM pdfs ORDER BY upload_date DESC, rowid DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        id.map(|s| {
            s.parse()
                .map_err(|e| StoreError::InvalidDocument(format!("{}", e)))
        })
        .transpose()
    }

    fn read_control(&self) -> StoreResult<ControlSnapshot> {
        let maintenance: bool = self
            .conn
            .query_row(
                "SELECT is_maintenance FROM control WHERE name = ?",
                [CONTROL_DOC],
                |row| row.get(0),
            )
            .optional()?
            .unwrap_or(false);
        Ok(ControlSnapshot { maintenance })
    }

    fn fetch_sponsors(&self) -> StoreResult<SponsorBoard> {
        let mut stmt = self.conn.prepare("SELECT slot, body FROM sponsors")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut slots = BTreeMap::new();
        for (slot, body) in rows {
            match serde_json::from_str::<AdSlot>(&body) {
                Ok(ad) => {
                    slots.insert(slot, ad);
                }
                Err(e) => warn!(slot = %slot, error = %e, "skipping malformed sponsor slot"),
            }
        }
        Ok(SponsorBoard::new(slots))
    }

    fn fetch_comments(&self, id: &RecordId) -> StoreResult<Vec<Comment>> {
        self.ensure_readable()?;

        let mut stmt = self.conn.prepare(
            "SELECT author, text, timestamp FROM comments
             WHERE pdf_id = ? ORDER BY timestamp DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([id.as_str()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(author, text, ts)| {
                let timestamp = DateTime::parse_from_rfc3339(&ts)
                    .map_err(|e| StoreError::InvalidDocument(format!("comment timestamp: {}", e)))?
                    .with_timezone(&Utc);
                Ok(Comment {
                    record_id: id.clone(),
                    author,
                    text,
                    timestamp,
                })
            })
            .collect()
    }

    fn post_comment(&mut self, comment: NewComment) -> StoreResult<Comment> {
        let comment = comment.into_comment(Utc::now());
        self.conn.execute(
            "INSERT INTO comments (pdf_id, author, text, timestamp) VALUES (?, ?, ?, ?)",
            rusqlite::params![
                comment.record_id.as_str(),
                comment.author,
                comment.text,
                comment.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;
        Ok(comment)
    }

    fn add_record(&mut self, record: &NoteRecord) -> StoreResult<()> {
        let mut raw = RawRecord::from(record);
        raw.id = None;
        let body = serde_json::to_string(&raw)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?;

        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO pdfs (id, upload_date, body) VALUES (?, ?, ?)",
            rusqlite::params![
                record.id().as_str(),
                record.upload_date().format("%Y-%m-%d").to_string(),
                body,
            ],
        )?;
        if inserted == 0 {
            return Err(StoreError::Duplicate {
                id: record.id().to_string(),
            });
        }
        debug!(id = %record.id(), "added record");
        Ok(())
    }

    fn log_search(&mut self, term: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO search_history (term, timestamp) VALUES (?, ?)",
            rusqlite::params![term, Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)],
        )?;
        Ok(())
    }

    fn log_interaction(
        &mut self,
        kind: InteractionKind,
        label: &str,
        record: Option<&RecordId>,
    ) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO interactions (pdf_id, kind, label, timestamp) VALUES (?, ?, ?, ?)",
            rusqlite::params![
                record.map(RecordId::as_str),
                kind.as_str(),
                label,
                Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true),
            ],
        )?;
        Ok(())
    }
}
