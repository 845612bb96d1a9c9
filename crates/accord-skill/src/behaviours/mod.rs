//! Behaviour tasks: the per-participant, per-round units of work.
//!
//! A behaviour runs to completion producing exactly one payload, or
//! terminates early without one. Suspension points are exactly the
//! external-call boundaries (the port `await`s); cancellation mid-await
//! is safe because no partial payload is ever handed out and the HTTP
//! clients release their connections on drop.

mod api_check;
mod data_publish;
mod decision;
mod tx_preparation;

pub use api_check::ApiCheckBehaviour;
pub use data_publish::DataPublishBehaviour;
pub use decision::DecisionBehaviour;
pub use tx_preparation::TxPreparationBehaviour;

use accord_engine::{Payload, RoundId, SynchronizedData};
use async_trait::async_trait;
use shared_types::ParticipantId;

/// What a behaviour sees: its own identity and a snapshot of the
/// synchronized data as of the round's activation.
#[derive(Clone)]
pub struct BehaviourContext {
    pub sender: ParticipantId,
    pub data: SynchronizedData,
}

impl BehaviourContext {
    pub fn new(sender: ParticipantId, data: SynchronizedData) -> Self {
        Self { sender, data }
    }
}

/// One round's worth of work for one participant.
#[async_trait]
pub trait Behaviour: Send + Sync {
    /// The round this behaviour produces payloads for.
    fn matching_round(&self) -> RoundId;

    /// Compute the payload. `None` means the task failed past its local
    /// fallbacks and this participant contributes nothing this round;
    /// the round concludes without it or restarts on timeout.
    async fn act(&self, ctx: &BehaviourContext) -> Option<Payload>;
}
