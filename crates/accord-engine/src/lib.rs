//! # accord-engine
//!
//! Round-consensus core for Accord agent services.
//!
//! ## Architecture
//!
//! A workflow is a validated state machine of named rounds. Each
//! participant computes a candidate payload for the active round and
//! submits it; the [`domain::PayloadCollector`] accumulates one payload
//! per participant and detects super-majority agreement. The
//! [`service::RoundEngine`] drives the machine: it evaluates the active
//! round's end-of-block condition after every submission, commits agreed
//! values to the [`state::SynchronizedStore`] atomically with the single
//! emitted [`domain::Event`], and resolves the next round from the
//! transition table.
//!
//! ```text
//! participants ──payload──→ [PayloadCollector]
//!                                  │ threshold reached?
//!                                  ↓
//!                           [RoundEngine::tick]
//!                      commit ↙        ↘ Event
//!              [SynchronizedStore]   [Workflow::next] ──→ next round
//! ```
//!
//! ## Guarantees
//!
//! - The store is updated at most once per round activation, atomically
//!   with respect to the emitted event.
//! - `tick()` is idempotent: with no new submissions it changes nothing.
//! - An unmapped transition or an unmet pre/post-condition is a fatal
//!   configuration error, surfaced at workflow build time where possible.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;

// Re-export main types
pub use adapters::InMemoryEventBus;
pub use domain::{
    EngineError, EngineResult, Event, OutcomeRule, Payload, PayloadCollector, RoundDef, RoundId,
    StoreDelta, SynchronizedData, Threshold, Workflow, WorkflowBuilder,
};
pub use events::RoundEndedEvent;
pub use ports::{EventBus, SystemTimeSource, TimeSource};
pub use service::{EngineDependencies, RoundEngine};
pub use state::SynchronizedStore;
