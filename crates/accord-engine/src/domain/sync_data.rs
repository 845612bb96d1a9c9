//! Immutable snapshot of the synchronized store.

use super::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use shared_types::StoreValue;
use std::collections::BTreeMap;

/// A set of key updates committed atomically.
pub type StoreDelta = BTreeMap<String, StoreValue>;

/// The synchronized data visible to a round: a point-in-time copy of the
/// replicated store. Rounds and behaviour tasks only ever read snapshots;
/// mutation goes through the engine's commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynchronizedData {
    entries: BTreeMap<String, StoreValue>,
}

impl SynchronizedData {
    pub fn from_entries(entries: BTreeMap<String, StoreValue>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&StoreValue> {
        self.entries.get(key)
    }

    /// Get a key that must exist at this point of the workflow.
    pub fn get_strict(&self, key: &str) -> EngineResult<&StoreValue> {
        self.entries
            .get(key)
            .ok_or_else(|| EngineError::MissingKey(key.to_owned()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
