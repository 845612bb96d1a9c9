//! Per-round payload accumulation and quorum math.

use super::{EngineError, EngineResult, Payload, RoundId};
use shared_types::{ParticipantId, StoreValue};
use std::collections::HashMap;

/// A validated quorum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(usize);

impl Threshold {
    /// The Tendermint-style super-majority: `2n/3 + 1`.
    ///
    /// This matches the fault-tolerance assumption of the replicated
    /// transport the engine sits on: agreement survives up to `n/3`
    /// faulty participants.
    pub fn two_thirds_majority(total: usize) -> EngineResult<Self> {
        Self::explicit(2 * total / 3 + 1, total)
    }

    /// An explicit quorum size; `0 < threshold <= total` is enforced.
    pub fn explicit(threshold: usize, total: usize) -> EngineResult<Self> {
        if threshold == 0 || threshold > total {
            return Err(EngineError::InvalidThreshold { threshold, total });
        }
        Ok(Self(threshold))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// Accumulates one payload per participant for the active round.
///
/// Re-submission by the same participant overwrites its previous payload
/// without duplicating it; the participant keeps its original arrival
/// position so `most_common_value`'s first-seen tie-break stays
/// deterministic. The collection is discarded when the round retires.
pub struct PayloadCollector {
    round: RoundId,
    threshold: Threshold,
    collection: HashMap<ParticipantId, Payload>,
    arrival: Vec<ParticipantId>,
}

impl PayloadCollector {
    pub fn new(round: RoundId, threshold: Threshold) -> Self {
        Self {
            round,
            threshold,
            collection: HashMap::new(),
            arrival: Vec::new(),
        }
    }

    pub fn round(&self) -> &RoundId {
        &self.round
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Accept a payload for this round.
    ///
    /// A payload declaring a different round is rejected; the caller
    /// decides whether that is a stale straggler to drop or a bug.
    pub fn submit(&mut self, payload: Payload) -> EngineResult<()> {
        if payload.round != self.round {
            return Err(EngineError::RoundMismatch {
                active: self.round.clone(),
                got: payload.round,
            });
        }
        if !self.collection.contains_key(&payload.sender) {
            self.arrival.push(payload.sender.clone());
        }
        self.collection.insert(payload.sender.clone(), payload);
        Ok(())
    }

    pub fn get(&self, participant: &ParticipantId) -> Option<&Payload> {
        self.collection.get(participant)
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Number of participants whose payload equals `values`.
    pub fn support_for(&self, values: &[StoreValue]) -> usize {
        self.collection
            .values()
            .filter(|p| p.values == values)
            .count()
    }

    /// The payload value submitted by the largest number of distinct
    /// participants; ties broken by first-seen value.
    pub fn most_common_value(&self) -> Option<(&[StoreValue], usize)> {
        let mut groups: Vec<(&Payload, usize)> = Vec::new();
        for id in &self.arrival {
            if let Some(payload) = self.collection.get(id) {
                match groups.iter_mut().find(|(p, _)| p.values == payload.values) {
                    Some((_, count)) => *count += 1,
                    None => groups.push((payload, 1)),
                }
            }
        }
        let mut best: Option<(&Payload, usize)> = None;
        for (payload, count) in groups {
            if best.map_or(true, |(_, leading)| count > leading) {
                best = Some((payload, count));
            }
        }
        best.map(|(payload, count)| (payload.values.as_slice(), count))
    }

    /// True when enough participants agree on `values`.
    pub fn threshold_reached(&self, values: &[StoreValue]) -> bool {
        self.support_for(values) >= self.threshold.get()
    }

    /// False only when no value can mathematically still reach the
    /// threshold, even with unanimous agreement among non-responders.
    pub fn majority_still_possible(&self, total_participants: usize) -> bool {
        let remaining = total_participants.saturating_sub(self.len());
        let leading = self.most_common_value().map_or(0, |(_, count)| count);
        remaining + leading >= self.threshold.get()
    }

    /// The collection as a store value: participant id -> submitted values.
    pub fn as_store_value(&self) -> StoreValue {
        let mut map = serde_json::Map::new();
        for (id, payload) in &self.collection {
            map.insert(id.to_string(), StoreValue::Array(payload.values.clone()));
        }
        StoreValue::Object(map)
    }
}
