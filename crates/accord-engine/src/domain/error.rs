//! Error types for the round-consensus core.

use super::{Event, RoundId};

/// Engine error types.
///
/// Configuration errors (unmapped transitions, validation failures, unmet
/// pre/post-conditions) are fatal: they indicate an authoring bug, never a
/// runtime data issue, and must abort construction or the workflow run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid threshold {threshold} for {total} participants")]
    InvalidThreshold { threshold: usize, total: usize },

    #[error("payload for round {got} submitted while {active} is active")]
    RoundMismatch { active: RoundId, got: RoundId },

    #[error("round {round} expects {expected} payload value(s), got {got}")]
    PayloadArity {
        round: RoundId,
        expected: usize,
        got: usize,
    },

    #[error("no transition from {round} on event {event}")]
    UnmappedTransition { round: RoundId, event: Event },

    #[error("transition references undefined round {0}")]
    UnknownRound(RoundId),

    #[error("round {0} defined more than once")]
    DuplicateRound(RoundId),

    #[error("round {round} can emit {event} but has no outgoing edge for it")]
    MissingEdge { round: RoundId, event: Event },

    #[error("terminal round {0} has outgoing transitions")]
    TerminalWithEdges(RoundId),

    #[error("round {0} is not reachable from the initial round")]
    UnreachableRound(RoundId),

    #[error("workflow has no terminal rounds")]
    NoTerminalRounds,

    #[error("pre-condition key {key:?} missing when activating round {round}")]
    PreconditionMissing { round: RoundId, key: String },

    #[error("post-condition key {key:?} missing at terminal round {round}")]
    PostconditionMissing { round: RoundId, key: String },

    #[error("required key {0:?} is not present in the synchronized data")]
    MissingKey(String),

    #[error("agreed payload in round {round} does not decode to a declared event: {raw:?}")]
    UndecodableEvent { round: RoundId, raw: String },

    #[error("no round is active")]
    NoActiveRound,

    #[error("event bus error: {0}")]
    EventBusError(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
