//! Declarative round definitions.

use super::{Event, RoundId};

/// How a round resolves its event once agreement is reached.
#[derive(Debug, Clone)]
pub enum OutcomeRule {
    /// Emit a fixed event; the agreed values are committed under the
    /// round's selection keys.
    Fixed { done_event: Event },
    /// Decode the event from the agreed payload itself. The payload
    /// carries a single value naming one of the declared events; nothing
    /// is committed.
    FromPayload { events: Vec<Event> },
}

/// One stage of the workflow: the payload shape it accepts, the store
/// keys it writes, and its outcome rule.
///
/// Exactly one round is active at a time per engine; its collection is
/// created on activation and discarded on transition.
#[derive(Debug, Clone)]
pub struct RoundDef {
    pub id: RoundId,
    /// Store keys the agreed values are committed under, in payload order.
    pub selection_keys: Vec<String>,
    /// Store key for the participant -> payload collection, if recorded.
    pub collection_key: Option<String>,
    pub outcome: OutcomeRule,
}

impl RoundDef {
    /// A round that waits for `threshold` equal payloads, commits them,
    /// and emits `done_event`.
    pub fn collect_same_until_threshold(
        id: RoundId,
        done_event: Event,
        selection_keys: &[&str],
        collection_key: &str,
    ) -> Self {
        Self {
            id,
            selection_keys: selection_keys.iter().map(|k| (*k).to_owned()).collect(),
            collection_key: Some(collection_key.to_owned()),
            outcome: OutcomeRule::Fixed { done_event },
        }
    }

    /// A round whose agreed payload names the event to emit.
    pub fn decision(id: RoundId, events: &[Event]) -> Self {
        Self {
            id,
            selection_keys: Vec::new(),
            collection_key: None,
            outcome: OutcomeRule::FromPayload {
                events: events.to_vec(),
            },
        }
    }

    /// Number of values a payload for this round must carry.
    pub fn payload_arity(&self) -> usize {
        match &self.outcome {
            OutcomeRule::Fixed { .. } => self.selection_keys.len(),
            OutcomeRule::FromPayload { .. } => 1,
        }
    }

    /// Every event this round can emit, per its own definition. The
    /// transition table must have an outgoing edge for each.
    pub fn emitted_events(&self) -> Vec<Event> {
        let mut events = match &self.outcome {
            OutcomeRule::Fixed { done_event } => vec![*done_event],
            OutcomeRule::FromPayload { events } => events.clone(),
        };
        events.push(Event::NoMajority);
        events.push(Event::RoundTimeout);
        events
    }
}
