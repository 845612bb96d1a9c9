//! Domain entities shared across subsystems.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A hex-encoded safe transaction hash is `0x` plus 32 bytes of hex.
pub const TX_HASH_LENGTH: usize = 66;

/// The value type of the replicated key/value store.
///
/// The replication layer is schema-less; each key's shape is enforced by
/// typed accessors at the crate that owns the key.
pub type StoreValue = serde_json::Value;

/// Identity of one participant in the agent group.
///
/// Opaque to the engine; in production this is the agent's on-chain
/// address, in simulation a runtime-assigned name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}
