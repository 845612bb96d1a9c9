//! Round driver: runs every participant's behaviour against the active
//! round and feeds the engine until the workflow reaches a terminal round.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};

use accord_engine::{
    EngineDependencies, EngineError, Event, InMemoryEventBus, RoundEndedEvent, RoundEngine,
    RoundId, SynchronizedData, SynchronizedStore,
};
use accord_skill::{Behaviour, BehaviourContext};
use shared_types::ParticipantId;

use crate::container::ServiceContainer;

/// Result of a completed workflow run.
pub struct RunOutcome {
    pub finished: RoundId,
    pub data: SynchronizedData,
    pub rounds_ended: Vec<RoundEndedEvent>,
}

/// Sequentially drives all participants through the workflow.
///
/// One process plays every agent: each activation, every participant's
/// behaviour runs against the same data snapshot and its payload goes
/// straight into the engine. The engine's quorum logic is indifferent to
/// whether payloads arrive over a network or from a loop.
pub struct RoundDriver {
    engine: RoundEngine<InMemoryEventBus>,
    event_bus: Arc<InMemoryEventBus>,
    behaviours: HashMap<RoundId, Arc<dyn Behaviour>>,
    participants: Vec<ParticipantId>,
    round_timeout: Duration,
    max_round_restarts: u64,
}

impl RoundDriver {
    pub fn new(container: ServiceContainer) -> Result<Self> {
        let service = &container.config.service;
        let participants = (0..service.participants)
            .map(|i| ParticipantId::new(format!("agent-{i}")))
            .collect();
        let event_bus = Arc::new(InMemoryEventBus::default());
        let engine = RoundEngine::new(EngineDependencies {
            workflow: container.workflow,
            store: Arc::new(SynchronizedStore::new()),
            event_bus: Arc::clone(&event_bus),
            total_participants: service.participants,
        })?;
        Ok(Self {
            engine,
            event_bus,
            behaviours: container.behaviours,
            participants,
            round_timeout: Duration::from_secs(service.round_timeout_secs),
            max_round_restarts: service.max_round_restarts,
        })
    }

    /// Run the workflow to a terminal round.
    pub async fn run(mut self) -> Result<RunOutcome> {
        let mut attempts: HashMap<RoundId, u64> = HashMap::new();

        while !self.engine.is_finished() {
            let round = self
                .engine
                .active_round()
                .cloned()
                .context("engine has neither an active nor a finished round")?;

            let attempt = attempts.entry(round.clone()).or_insert(0);
            *attempt += 1;
            if *attempt > self.max_round_restarts {
                bail!(
                    "round {round} failed to conclude after {} attempts",
                    self.max_round_restarts
                );
            }

            self.run_activation(&round).await?;
        }

        let finished = self
            .engine
            .finished()
            .cloned()
            .context("engine finished without a terminal round")?;
        Ok(RunOutcome {
            finished,
            data: self.engine.snapshot(),
            rounds_ended: self.event_bus.get_events(),
        })
    }

    /// One activation: run every behaviour against the same snapshot,
    /// submit, and tick. Falls back to a timeout injection if the round
    /// is still open when the deadline passes or everyone has spoken.
    async fn run_activation(&mut self, round: &RoundId) -> Result<()> {
        let behaviour = self
            .behaviours
            .get(round)
            .with_context(|| format!("no behaviour registered for round {round}"))?
            .clone();
        let data = self.engine.snapshot();
        let deadline = Instant::now() + self.round_timeout;

        for participant in self.participants.clone() {
            let ctx = BehaviourContext::new(participant.clone(), data.clone());
            let payload = match timeout_at(deadline, behaviour.act(&ctx)).await {
                Ok(payload) => payload,
                Err(_) => {
                    warn!(round = %round, "round deadline reached mid-activation");
                    break;
                }
            };
            let Some(payload) = payload else {
                debug!(participant = %participant, round = %round, "no payload this round");
                continue;
            };
            match self.engine.submit_payload(payload) {
                Ok(()) => {}
                // the round already advanced; remaining payloads are stale
                Err(EngineError::RoundMismatch { .. }) => {
                    debug!(participant = %participant, "stale payload dropped");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
            if let Some(event) = self.engine.tick().await? {
                info!(round = %round, event = %event, "round concluded");
                return Ok(());
            }
        }

        // all participants spoke (or the deadline hit) without agreement
        if self.engine.active_round() == Some(round) {
            let event: Event = self.engine.inject_timeout().await?;
            info!(round = %round, event = %event, "round restarted");
        }
        Ok(())
    }
}
