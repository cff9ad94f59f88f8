//! Scriptable in-memory store for unit tests.

use crate::domain::{Comment, NewComment, NoteRecord, RawRecord, RecordId, SponsorBoard};
use crate::store::{ControlSnapshot, InteractionKind, RemoteStore, StoreError, StoreResult};
use chrono::Utc;
use std::cell::Cell;

/// How a scripted call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
    PermissionDenied,
    Offline,
}

impl Failure {
    fn error(self) -> StoreError {
        match self {
            Failure::PermissionDenied => StoreError::PermissionDenied,
            Failure::Offline => StoreError::Unavailable("network unreachable".into()),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeStore {
    pub docs: Vec<RawRecord>,
    /// Overrides the probe answer; defaults to the first document's id.
    pub probe_override: Option<Option<RecordId>>,
    pub fail_probe: Option<Failure>,
    pub fail_fetch: Option<Failure>,
    pub fail_sponsors: bool,
    pub control: ControlSnapshot,
    pub sponsors: SponsorBoard,
    pub comments: Vec<Comment>,
    pub searches: Vec<String>,
    pub interactions: Vec<(InteractionKind, String)>,
    pub full_fetches: Cell<usize>,
    pub probes: Cell<usize>,
}

impl FakeStore {
    pub fn with_records(records: &[NoteRecord]) -> Self {
        Self {
            docs: records.iter().map(RawRecord::from).collect(),
            ..Default::default()
        }
    }
}

impl RemoteStore for FakeStore {
    fn fetch_all_newest_first(&self) -> StoreResult<Vec<RawRecord>> {
        self.full_fetches.set(self.full_fetches.get() + 1);
        if let Some(f) = self.fail_fetch {
            return Err(f.error());
        }
        Ok(self.docs.clone())
    }

    fn probe_newest(&self) -> StoreResult<Option<RecordId>> {
        self.probes.set(self.probes.get() + 1);
        if let Some(f) = self.fail_probe {
            return Err(f.error());
        }
        if let Some(answer) = &self.probe_override {
            return Ok(answer.clone());
        }
        Ok(self
            .docs
            .first()
            .and_then(|d| d.id.as_deref())
            .and_then(|s| s.parse().ok()))
    }

    fn read_control(&self) -> StoreResult<ControlSnapshot> {
        Ok(self.control)
    }

    fn fetch_sponsors(&self) -> StoreResult<SponsorBoard> {
        if self.fail_sponsors {
            return Err(Failure::Offline.error());
        }
        Ok(self.sponsors.clone())
    }

    fn fetch_comments(&self, id: &RecordId) -> StoreResult<Vec<Comment>> {
        Ok(self
            .comments
            .iter()
            .rev()
            .filter(|c| &c.record_id == id)
            .cloned()
            .collect())
    }

    fn post_comment(&mut self, comment: NewComment) -> StoreResult<Comment> {
        let comment = comment.into_comment(Utc::now());
        self.comments.push(comment.clone());
        Ok(comment)
    }

    fn add_record(&mut self, record: &NoteRecord) -> StoreResult<()> {
        self.docs.insert(0, RawRecord::from(record));
        Ok(())
    }

    fn log_search(&mut self, term: &str) -> StoreResult<()> {
        self.searches.push(term.to_string());
        Ok(())
    }

    fn log_interaction(
        &mut self,
        kind: InteractionKind,
        label: &str,
        _record: Option<&RecordId>,
    ) -> StoreResult<()> {
        self.interactions.push((kind, label.to_string()));
        Ok(())
    }
}
