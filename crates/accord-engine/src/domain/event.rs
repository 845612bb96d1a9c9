//! Workflow events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reason a round concluded.
///
/// Produced only by a round's end-of-block evaluation, consumed only by
/// the transition table. `NoMajority` and `RoundTimeout` are not failures
/// in the error sense; the table typically routes them back to the same
/// round for a fresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Done,
    Error,
    Transact,
    NoMajority,
    RoundTimeout,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Done => "done",
            Event::Error => "error",
            Event::Transact => "transact",
            Event::NoMajority => "no_majority",
            Event::RoundTimeout => "round_timeout",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw payload content that does not name a known event.
#[derive(Debug, thiserror::Error)]
#[error("unknown event {0:?}")]
pub struct ParseEventError(pub String);

impl FromStr for Event {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "done" => Ok(Event::Done),
            "error" => Ok(Event::Error),
            "transact" => Ok(Event::Transact),
            "no_majority" => Ok(Event::NoMajority),
            "round_timeout" => Ok(Event::RoundTimeout),
            other => Err(ParseEventError(other.to_owned())),
        }
    }
}
