//! Round engine - drives the workflow state machine.
//!
//! # Guarantees
//! - At most one commit per round activation, atomic with the single
//!   emitted event.
//! - `tick()` is idempotent with no new submissions.
//! - Pre/post-condition violations and unmapped transitions abort the run;
//!   they are authoring bugs, not runtime data issues.

use crate::domain::{
    EngineError, EngineResult, Event, OutcomeRule, Payload, PayloadCollector, RoundDef, RoundId,
    StoreDelta, SynchronizedData, Threshold, Workflow,
};
use crate::events::RoundEndedEvent;
use crate::ports::{EventBus, SystemTimeSource, TimeSource};
use crate::state::SynchronizedStore;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Dependencies for [`RoundEngine`].
pub struct EngineDependencies<B: EventBus> {
    pub workflow: Workflow,
    pub store: Arc<SynchronizedStore>,
    pub event_bus: Arc<B>,
    pub total_participants: usize,
}

/// The active round: its definition plus the collection being filled.
struct ActiveRound {
    def: RoundDef,
    collector: PayloadCollector,
}

impl ActiveRound {
    /// Evaluate the end-of-block condition against the current collection.
    ///
    /// Returns the delta to commit and the event to emit, or `None` while
    /// the round should keep waiting for submissions.
    fn end_block(&self, total_participants: usize) -> EngineResult<Option<(StoreDelta, Event)>> {
        let Some((values, _support)) = self.collector.most_common_value() else {
            return Ok(None);
        };
        if self.collector.threshold_reached(values) {
            match &self.def.outcome {
                OutcomeRule::Fixed { done_event } => {
                    let mut delta = StoreDelta::new();
                    for (key, value) in self.def.selection_keys.iter().zip(values) {
                        delta.insert(key.clone(), value.clone());
                    }
                    if let Some(key) = &self.def.collection_key {
                        delta.insert(key.clone(), self.collector.as_store_value());
                    }
                    Ok(Some((delta, *done_event)))
                }
                OutcomeRule::FromPayload { events } => {
                    let raw = values.first().and_then(|v| v.as_str()).unwrap_or_default();
                    let event = Event::from_str(raw).map_err(|_| EngineError::UndecodableEvent {
                        round: self.def.id.clone(),
                        raw: raw.to_owned(),
                    })?;
                    if !events.contains(&event) {
                        return Err(EngineError::UndecodableEvent {
                            round: self.def.id.clone(),
                            raw: raw.to_owned(),
                        });
                    }
                    Ok(Some((StoreDelta::new(), event)))
                }
            }
        } else if !self.collector.majority_still_possible(total_participants) {
            Ok(Some((StoreDelta::new(), Event::NoMajority)))
        } else {
            Ok(None)
        }
    }
}

/// Drives the workflow: activates rounds, feeds submissions to the
/// collector, commits agreed outcomes, and advances via the transition
/// table. Exactly one round is active until a terminal round is reached.
pub struct RoundEngine<B: EventBus> {
    workflow: Workflow,
    store: Arc<SynchronizedStore>,
    event_bus: Arc<B>,
    total_participants: usize,
    threshold: Threshold,
    time_source: Box<dyn TimeSource>,
    active: Option<ActiveRound>,
    finished: Option<RoundId>,
    generation: u64,
}

impl<B: EventBus> RoundEngine<B> {
    /// Create an engine with the `2n/3 + 1` super-majority threshold and
    /// activate the initial round.
    pub fn new(deps: EngineDependencies<B>) -> EngineResult<Self> {
        let threshold = Threshold::two_thirds_majority(deps.total_participants)?;
        Self::with_threshold(deps, threshold)
    }

    /// Create an engine with an explicit threshold.
    pub fn with_threshold(deps: EngineDependencies<B>, threshold: Threshold) -> EngineResult<Self> {
        let mut engine = Self {
            workflow: deps.workflow,
            store: deps.store,
            event_bus: deps.event_bus,
            total_participants: deps.total_participants,
            threshold,
            time_source: Box::new(SystemTimeSource),
            active: None,
            finished: None,
            generation: 0,
        };
        let initial = engine.workflow.initial().clone();
        engine.activate(initial)?;
        Ok(engine)
    }

    /// Set a custom time source (for testing).
    pub fn with_time_source(mut self, time_source: Box<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    pub fn active_round(&self) -> Option<&RoundId> {
        self.active.as_ref().map(|a| &a.def.id)
    }

    pub fn finished(&self) -> Option<&RoundId> {
        self.finished.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Activation counter; restarts of the same round bump it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Payloads collected for the active round.
    pub fn collected(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.collector.len())
    }

    pub fn store(&self) -> &Arc<SynchronizedStore> {
        &self.store
    }

    pub fn snapshot(&self) -> SynchronizedData {
        self.store.snapshot()
    }

    /// Accept one participant's payload for the active round.
    ///
    /// Stale payloads (older round) are rejected with `RoundMismatch`;
    /// the caller decides whether to drop or escalate.
    pub fn submit_payload(&mut self, payload: Payload) -> EngineResult<()> {
        let active = self.active.as_mut().ok_or(EngineError::NoActiveRound)?;
        if &payload.round != active.collector.round() {
            return Err(EngineError::RoundMismatch {
                active: active.collector.round().clone(),
                got: payload.round,
            });
        }
        let expected = active.def.payload_arity();
        if payload.values.len() != expected {
            return Err(EngineError::PayloadArity {
                round: active.def.id.clone(),
                expected,
                got: payload.values.len(),
            });
        }
        debug!(sender = %payload.sender, round = %payload.round, "payload collected");
        active.collector.submit(payload)
    }

    /// Evaluate the active round's completion condition.
    ///
    /// Commits and advances when agreement is reached, emits `NoMajority`
    /// when agreement has become impossible, and does nothing otherwise.
    pub async fn tick(&mut self) -> EngineResult<Option<Event>> {
        let outcome = match &self.active {
            Some(active) => active.end_block(self.total_participants)?,
            None => return Ok(None),
        };
        let Some((delta, event)) = outcome else {
            return Ok(None);
        };
        let committed_keys: Vec<String> = delta.keys().cloned().collect();
        if !delta.is_empty() {
            info!(keys = ?committed_keys, event = %event, "committing round outcome");
            self.store.commit(delta);
        }
        self.advance(event, committed_keys).await?;
        Ok(Some(event))
    }

    /// Conclude the active round with `RoundTimeout`. Called by the
    /// runtime's timer when the round's deadline expires without
    /// agreement.
    pub async fn inject_timeout(&mut self) -> EngineResult<Event> {
        let round = self
            .active_round()
            .cloned()
            .ok_or(EngineError::NoActiveRound)?;
        warn!(round = %round, generation = self.generation, "round timed out");
        self.advance(Event::RoundTimeout, Vec::new()).await?;
        Ok(Event::RoundTimeout)
    }

    fn activate(&mut self, id: RoundId) -> EngineResult<()> {
        let def = self.workflow.round(&id)?.clone();
        if let Some(keys) = self.workflow.pre_conditions(&id) {
            for key in keys {
                if !self.store.contains_key(key) {
                    return Err(EngineError::PreconditionMissing {
                        round: id,
                        key: key.clone(),
                    });
                }
            }
        }
        self.generation += 1;
        info!(round = %id, generation = self.generation, "round activated");
        self.active = Some(ActiveRound {
            collector: PayloadCollector::new(def.id.clone(), self.threshold),
            def,
        });
        Ok(())
    }

    async fn advance(&mut self, event: Event, committed_keys: Vec<String>) -> EngineResult<()> {
        let current = match &self.active {
            Some(active) => active.def.id.clone(),
            None => return Err(EngineError::NoActiveRound),
        };
        let next = self.workflow.next(&current, event)?.clone();
        self.active = None;

        let ended = RoundEndedEvent {
            round: current.clone(),
            event,
            next: next.clone(),
            generation: self.generation,
            committed_keys,
            ended_at: self.time_source.now(),
        };
        self.event_bus
            .publish_round_ended(ended)
            .await
            .map_err(EngineError::EventBusError)?;
        info!(round = %current, event = %event, next = %next, "round ended");

        if self.workflow.is_terminal(&next) {
            if let Some(keys) = self.workflow.post_conditions(&next) {
                for key in keys {
                    if !self.store.contains_key(key) {
                        return Err(EngineError::PostconditionMissing {
                            round: next,
                            key: key.clone(),
                        });
                    }
                }
            }
            info!(round = %next, "workflow finished");
            self.finished = Some(next);
            Ok(())
        } else {
            self.activate(next)
        }
    }
}
