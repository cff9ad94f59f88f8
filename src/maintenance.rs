//! Two-state maintenance machine and the control-document watcher.

use crate::store::{ControlSnapshot, RemoteStore, StoreResult};
use serde::Serialize;
use tracing::{debug, info};

/// Whether the site is serving content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Operational,
    Maintenance,
}

/// Effect of feeding an event to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Entered,
    Left,
    Unchanged,
}

impl Availability {
    pub fn is_maintenance(self) -> bool {
        self == Availability::Maintenance
    }

    /// Applies the remote maintenance flag.
    pub fn on_flag(&mut self, maintenance: bool) -> Transition {
        match (*self, maintenance) {
            (Availability::Operational, true) => {
                *self = Availability::Maintenance;
                info!("entering maintenance");
                Transition::Entered
            }
            (Availability::Maintenance, false) => {
                *self = Availability::Operational;
                info!("leaving maintenance");
                Transition::Left
            }
            _ => Transition::Unchanged,
        }
    }

    /// Applies a catalog read refused by the store.
    ///
    /// Only the flag clearing leads back to `Operational`.
    pub fn on_load_denied(&mut self) -> Transition {
        if self.is_maintenance() {
            return Transition::Unchanged;
        }
        *self = Availability::Maintenance;
        info!("entering maintenance after refused catalog read");
        Transition::Entered
    }
}

/// Polls the control document and reports only changes.
#[derive(Debug, Default)]
pub struct ControlWatcher {
    last: Option<ControlSnapshot>,
}

impl ControlWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the control document. Returns the snapshot if it differs from
    /// the previous read; the first read always counts as a change.
    pub fn poll<S: RemoteStore + ?Sized>(&mut self, store: &S) -> StoreResult<Option<ControlSnapshot>> {
        let snapshot = store.read_control()?;
        if self.last == Some(snapshot) {
            return Ok(None);
        }
        debug!(maintenance = snapshot.maintenance, "control document changed");
        self.last = Some(snapshot);
        Ok(Some(snapshot))
    }
}
