//! The workflow transition table, validated at construction.

use super::{EngineError, EngineResult, Event, RoundDef, RoundId};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// A validated workflow: round definitions, the transition table, the
/// initial round, and the terminal set with post-condition keys.
///
/// Construction via [`WorkflowBuilder::build`] guarantees:
/// - every event a round can emit has an outgoing edge,
/// - every referenced round is defined and reachable from the initial
///   round,
/// - terminal rounds have no outgoing edges, and at least one exists.
#[derive(Debug, Clone)]
pub struct Workflow {
    initial: RoundId,
    rounds: HashMap<RoundId, RoundDef>,
    edges: HashMap<RoundId, HashMap<Event, RoundId>>,
    terminals: HashMap<RoundId, BTreeSet<String>>,
    pre_conditions: HashMap<RoundId, BTreeSet<String>>,
}

impl Workflow {
    pub fn builder(initial: RoundId) -> WorkflowBuilder {
        WorkflowBuilder {
            initial,
            rounds: Vec::new(),
            edges: Vec::new(),
            terminals: HashMap::new(),
            pre_conditions: HashMap::new(),
        }
    }

    pub fn initial(&self) -> &RoundId {
        &self.initial
    }

    /// Resolve the next round. An unmapped edge is a fatal configuration
    /// error: build-time validation makes it unreachable for declared
    /// events, so hitting it means the table and the round disagree.
    pub fn next(&self, round: &RoundId, event: Event) -> EngineResult<&RoundId> {
        self.edges
            .get(round)
            .and_then(|edges| edges.get(&event))
            .ok_or_else(|| EngineError::UnmappedTransition {
                round: round.clone(),
                event,
            })
    }

    pub fn round(&self, id: &RoundId) -> EngineResult<&RoundDef> {
        self.rounds
            .get(id)
            .ok_or_else(|| EngineError::UnknownRound(id.clone()))
    }

    pub fn is_terminal(&self, id: &RoundId) -> bool {
        self.terminals.contains_key(id)
    }

    /// Keys that must exist in the store before `id` counts as validly
    /// reached (terminal rounds only).
    pub fn post_conditions(&self, id: &RoundId) -> Option<&BTreeSet<String>> {
        self.terminals.get(id)
    }

    /// Keys that must already exist when `id` is activated.
    pub fn pre_conditions(&self, id: &RoundId) -> Option<&BTreeSet<String>> {
        self.pre_conditions.get(id)
    }
}

/// Builder for [`Workflow`]; all validation happens in [`Self::build`].
pub struct WorkflowBuilder {
    initial: RoundId,
    rounds: Vec<RoundDef>,
    edges: Vec<(RoundId, Event, RoundId)>,
    terminals: HashMap<RoundId, BTreeSet<String>>,
    pre_conditions: HashMap<RoundId, BTreeSet<String>>,
}

impl WorkflowBuilder {
    pub fn round(mut self, def: RoundDef) -> Self {
        self.rounds.push(def);
        self
    }

    pub fn terminal(mut self, id: RoundId, post_condition_keys: &[&str]) -> Self {
        self.terminals.insert(
            id,
            post_condition_keys.iter().map(|k| (*k).to_owned()).collect(),
        );
        self
    }

    pub fn transition(mut self, from: RoundId, event: Event, to: RoundId) -> Self {
        self.edges.push((from, event, to));
        self
    }

    pub fn pre_condition(mut self, round: RoundId, keys: &[&str]) -> Self {
        self.pre_conditions
            .entry(round)
            .or_default()
            .extend(keys.iter().map(|k| (*k).to_owned()));
        self
    }

    pub fn build(self) -> EngineResult<Workflow> {
        let mut rounds: HashMap<RoundId, RoundDef> = HashMap::new();
        for def in self.rounds {
            if rounds.contains_key(&def.id) || self.terminals.contains_key(&def.id) {
                return Err(EngineError::DuplicateRound(def.id));
            }
            rounds.insert(def.id.clone(), def);
        }
        if self.terminals.is_empty() {
            return Err(EngineError::NoTerminalRounds);
        }
        if !rounds.contains_key(&self.initial) {
            return Err(EngineError::UnknownRound(self.initial));
        }

        let mut edges: HashMap<RoundId, HashMap<Event, RoundId>> = HashMap::new();
        for (from, event, to) in self.edges {
            if self.terminals.contains_key(&from) {
                return Err(EngineError::TerminalWithEdges(from));
            }
            if !rounds.contains_key(&from) {
                return Err(EngineError::UnknownRound(from));
            }
            if !rounds.contains_key(&to) && !self.terminals.contains_key(&to) {
                return Err(EngineError::UnknownRound(to));
            }
            edges.entry(from).or_default().insert(event, to);
        }

        // Totality: every event a round can emit has an outgoing edge.
        for def in rounds.values() {
            let outgoing = edges.get(&def.id);
            for event in def.emitted_events() {
                let mapped = outgoing.map_or(false, |e| e.contains_key(&event));
                if !mapped {
                    return Err(EngineError::MissingEdge {
                        round: def.id.clone(),
                        event,
                    });
                }
            }
        }

        // Reachability from the initial round.
        let mut reached: HashSet<&RoundId> = HashSet::new();
        let mut queue = VecDeque::from([&self.initial]);
        while let Some(id) = queue.pop_front() {
            if !reached.insert(id) {
                continue;
            }
            if let Some(outgoing) = edges.get(id) {
                queue.extend(outgoing.values());
            }
        }
        for id in rounds.keys().chain(self.terminals.keys()) {
            if !reached.contains(id) {
                return Err(EngineError::UnreachableRound(id.clone()));
            }
        }

        Ok(Workflow {
            initial: self.initial,
            rounds,
            edges,
            terminals: self.terminals,
            pre_conditions: self.pre_conditions,
        })
    }
}
