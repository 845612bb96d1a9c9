//! The replicated key/value store, as seen by one engine instance.

use crate::domain::{StoreDelta, SynchronizedData};
use parking_lot::RwLock;
use shared_types::StoreValue;
use std::collections::BTreeMap;

/// Single source of truth all participants observe identically after each
/// round commits.
///
/// Owned by the engine; rounds and behaviour tasks read snapshots. A
/// commit replaces all of its keys under one write lock, so no partially
/// updated state is ever observable.
#[derive(Default)]
pub struct SynchronizedStore {
    entries: RwLock<BTreeMap<String, StoreValue>>,
}

impl SynchronizedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with cross-period keys.
    pub fn seeded(entries: StoreDelta) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn get(&self, key: &str) -> Option<StoreValue> {
        self.entries.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Apply a round's outcome atomically.
    pub fn commit(&self, delta: StoreDelta) {
        let mut entries = self.entries.write();
        for (key, value) in delta {
            entries.insert(key, value);
        }
    }

    /// Point-in-time copy for round evaluation and behaviour tasks.
    pub fn snapshot(&self) -> SynchronizedData {
        SynchronizedData::from_entries(self.entries.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_commit_is_visible_in_later_snapshots_only() {
        let store = SynchronizedStore::new();
        let before = store.snapshot();
        store.commit(StoreDelta::from([("price".to_owned(), json!(1.5))]));
        assert!(!before.contains_key("price"));
        assert_eq!(store.snapshot().get("price"), Some(&json!(1.5)));
    }

    #[test]
    fn test_commit_overwrites_existing_keys() {
        let store = SynchronizedStore::seeded(StoreDelta::from([(
            "price".to_owned(),
            json!(1.0),
        )]));
        store.commit(StoreDelta::from([("price".to_owned(), json!(2.5))]));
        assert_eq!(store.get("price"), Some(json!(2.5)));
    }
}
