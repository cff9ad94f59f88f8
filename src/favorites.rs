//! Saved notes, persisted in local storage.

use crate::domain::RecordId;
use crate::infra::{LocalStorage, StorageError, keys};
use tracing::{debug, warn};

/// Result of [`FavoriteSet::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

impl Toggle {
    /// User-facing feedback for the toggle.
    pub fn message(self) -> &'static str {
        match self {
            Toggle::Added => "Added to saved notes",
            Toggle::Removed => "Removed from saved notes",
        }
    }
}

/// The set of favorited record ids.
///
/// Stored as a JSON array of ids in insertion order. There is no cap and no
/// expiry; ids of records that no longer exist are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: Vec<RecordId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the set. Missing or corrupt state reads as empty; individual
    /// entries that are not valid ids are dropped.
    pub fn load<L: LocalStorage + ?Sized>(storage: &L) -> Self {
        let Some(raw) = storage.get(keys::FAVORITES) else {
            return Self::new();
        };

        let entries: Vec<String> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "favorites are corrupt, starting empty");
                return Self::new();
            }
        };

        let mut set = Self::new();
        for entry in entries {
            match entry.parse::<RecordId>() {
                Ok(id) if !set.contains(&id) => set.ids.push(id),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "dropping invalid favorite"),
            }
        }
        set
    }

    /// Persists the whole set.
    pub fn save<L: LocalStorage + ?Sized>(&self, storage: &mut L) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.ids)?;
        storage.set(keys::FAVORITES, json)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.ids.contains(id)
    }

    /// Removes `id` if present, otherwise adds it.
    pub fn toggle(&mut self, id: &RecordId) -> Toggle {
        if let Some(pos) = self.ids.iter().position(|f| f == id) {
            self.ids.remove(pos);
            debug!(id = %id, "favorite removed");
            Toggle::Removed
        } else {
            self.ids.push(id.clone());
            debug!(id = %id, "favorite added");
            Toggle::Added
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<RecordId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            if !set.contains(&id) {
                set.ids.push(id);
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> RecordId {
        s.parse().unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut favs = FavoriteSet::new();
        assert_eq!(favs.toggle(&id("a")), Toggle::Added);
        assert!(favs.contains(&id("a")));
        assert_eq!(favs.toggle(&id("a")), Toggle::Removed);
        assert!(favs.is_empty());
    }

    #[test]
    fn double_toggle_restores_membership() {
        let mut favs: FavoriteSet = [id("a"), id("b")].into_iter().collect();
        let before = favs.clone();

        favs.toggle(&id("b"));
        favs.toggle(&id("b"));
        assert_eq!(favs.contains(&id("b")), before.contains(&id("b")));

        favs.toggle(&id("c"));
        favs.toggle(&id("c"));
        assert!(!favs.contains(&id("c")));
    }

    #[test]
    fn feedback_messages() {
        assert_eq!(Toggle::Added.message(), "Added to saved notes");
        assert_eq!(Toggle::Removed.message(), "Removed from saved notes");
    }

    #[test]
    fn save_then_load() {
        let mut storage = MemoryStorage::new();
        let favs: FavoriteSet = [id("b"), id("a")].into_iter().collect();
        favs.save(&mut storage).unwrap();

        assert_eq!(storage.get(keys::FAVORITES).unwrap(), r#"["b","a"]"#);
        assert_eq!(FavoriteSet::load(&storage), favs);
    }

    #[test]
    fn missing_state_is_empty() {
        assert!(FavoriteSet::load(&MemoryStorage::new()).is_empty());
    }

    #[test]
    fn corrupt_state_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::FAVORITES, "{not an array".into()).unwrap();
        assert!(FavoriteSet::load(&storage).is_empty());
    }

    #[test]
    fn invalid_and_duplicate_entries_are_dropped() {
        let mut storage = MemoryStorage::new();
        storage
            .set(keys::FAVORITES, r#"["a", "", "a", "b"]"#.into())
            .unwrap();
        let favs = FavoriteSet::load(&storage);
        let ids: Vec<_> = favs.iter().map(RecordId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
