//! Published events.

use crate::domain::{Event, RoundId};
use serde::{Deserialize, Serialize};

/// Emitted once per round conclusion, after the commit (if any) and
/// before the next round activates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEndedEvent {
    /// The round that just concluded.
    pub round: RoundId,
    /// Why it concluded.
    pub event: Event,
    /// The round the transition table resolved.
    pub next: RoundId,
    /// Activation counter of the concluded round; restarts bump it.
    pub generation: u64,
    /// Store keys written by this round's commit, empty when nothing was
    /// committed (no-majority, timeout, decision rounds).
    pub committed_keys: Vec<String>,
    /// Unix timestamp of the conclusion.
    pub ended_at: u64,
}
