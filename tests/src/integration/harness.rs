//! Helpers for driving a [`RoundEngine`] with skill behaviours, the same
//! way the node runtime does: one snapshot per activation, every
//! participant's behaviour runs against it, payloads feed the engine as
//! they are produced.

use std::sync::Arc;

use accord_engine::{
    EngineDependencies, EngineError, Event, InMemoryEventBus, RoundEngine, SynchronizedStore,
    Workflow,
};
use accord_skill::{Behaviour, BehaviourContext};
use shared_types::ParticipantId;

pub const TOTAL_PARTICIPANTS: usize = 4;

pub fn participants(n: usize) -> Vec<ParticipantId> {
    (0..n)
        .map(|i| ParticipantId::new(format!("agent-{i}")))
        .collect()
}

pub fn engine(workflow: Workflow) -> RoundEngine<InMemoryEventBus> {
    RoundEngine::new(EngineDependencies {
        workflow,
        store: Arc::new(SynchronizedStore::new()),
        event_bus: Arc::new(InMemoryEventBus::default()),
        total_participants: TOTAL_PARTICIPANTS,
    })
    .expect("engine construction")
}

/// Run one behaviour for every given participant against the current
/// snapshot, ticking after each submission. Returns the first event the
/// round concluded with, or `None` if it is still open afterwards.
pub async fn run_activation(
    engine: &mut RoundEngine<InMemoryEventBus>,
    behaviour: &dyn Behaviour,
    participants: &[ParticipantId],
) -> Option<Event> {
    let data = engine.snapshot();
    for participant in participants {
        let ctx = BehaviourContext::new(participant.clone(), data.clone());
        let Some(payload) = behaviour.act(&ctx).await else {
            continue;
        };
        match engine.submit_payload(payload) {
            Ok(()) => {}
            Err(EngineError::RoundMismatch { .. }) => break,
            Err(err) => panic!("unexpected engine error: {err}"),
        }
        if let Some(event) = engine.tick().await.expect("tick") {
            return Some(event);
        }
    }
    None
}
