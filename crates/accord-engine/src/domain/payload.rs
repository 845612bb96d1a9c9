//! Round identity and the per-participant payload.

use serde::{Deserialize, Serialize};
use shared_types::{ParticipantId, StoreValue};
use std::borrow::Cow;
use std::fmt;

/// Identity of one workflow stage.
///
/// Round tables are declared as consts, so the common case borrows a
/// static name; deserialized payloads carry an owned one. Equality is by
/// name either way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(Cow<'static, str>);

impl RoundId {
    pub const fn of(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One participant's candidate answer for the active round.
///
/// Immutable after submission. `values` is ordered to match the round's
/// selection keys; agreement means another participant submitted an equal
/// vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub sender: ParticipantId,
    pub round: RoundId,
    pub values: Vec<StoreValue>,
}

impl Payload {
    pub fn new(sender: ParticipantId, round: RoundId, values: Vec<StoreValue>) -> Self {
        Self {
            sender,
            round,
            values,
        }
    }
}
