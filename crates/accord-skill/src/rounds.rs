//! Rounds and workflows of the price-watch skill.

use accord_engine::{EngineResult, Event, RoundDef, RoundId, Workflow, WorkflowBuilder};

pub const API_CHECK: RoundId = RoundId::of("api_check");
pub const DATA_PUBLISH: RoundId = RoundId::of("data_publish");
pub const DECISION_MAKING: RoundId = RoundId::of("decision_making");
pub const TX_PREPARATION: RoundId = RoundId::of("tx_preparation");
pub const FINISHED_DECISION_MAKING: RoundId = RoundId::of("finished_decision_making");
pub const FINISHED_TX_PREPARATION: RoundId = RoundId::of("finished_tx_preparation");

/// Keys this workflow persists in the synchronized store.
pub mod keys {
    pub const PRICE: &str = "price";
    pub const PARTICIPANT_TO_PRICE_ROUND: &str = "participant_to_price_round";
    pub const DATA_HASH: &str = "data_hash";
    pub const PARTICIPANT_TO_DATA_ROUND: &str = "participant_to_data_round";
    pub const MOST_VOTED_TX_HASH: &str = "most_voted_tx_hash";
    pub const PARTICIPANT_TO_TX_ROUND: &str = "participant_to_tx_round";
    pub const TX_SUBMITTER: &str = "tx_submitter";
}

fn api_check_def() -> RoundDef {
    RoundDef::collect_same_until_threshold(
        API_CHECK,
        Event::Done,
        &[keys::PRICE],
        keys::PARTICIPANT_TO_PRICE_ROUND,
    )
}

fn data_publish_def() -> RoundDef {
    RoundDef::collect_same_until_threshold(
        DATA_PUBLISH,
        Event::Done,
        &[keys::DATA_HASH],
        keys::PARTICIPANT_TO_DATA_ROUND,
    )
}

fn decision_making_def() -> RoundDef {
    RoundDef::decision(
        DECISION_MAKING,
        &[Event::Done, Event::Error, Event::Transact],
    )
}

fn tx_preparation_def() -> RoundDef {
    RoundDef::collect_same_until_threshold(
        TX_PREPARATION,
        Event::Done,
        &[keys::TX_SUBMITTER, keys::MOST_VOTED_TX_HASH],
        keys::PARTICIPANT_TO_TX_ROUND,
    )
}

/// Transitions shared by both workflow variants: decision onward, plus
/// retry self-loops. A round that fails to agree or times out restarts
/// from scratch with a fresh collection rather than failing the workflow.
fn tail(builder: WorkflowBuilder) -> WorkflowBuilder {
    builder
        .round(decision_making_def())
        .round(tx_preparation_def())
        .terminal(FINISHED_DECISION_MAKING, &[])
        .terminal(FINISHED_TX_PREPARATION, &[keys::MOST_VOTED_TX_HASH])
        .transition(API_CHECK, Event::NoMajority, API_CHECK)
        .transition(API_CHECK, Event::RoundTimeout, API_CHECK)
        .transition(DECISION_MAKING, Event::Done, FINISHED_DECISION_MAKING)
        .transition(DECISION_MAKING, Event::Error, FINISHED_DECISION_MAKING)
        .transition(DECISION_MAKING, Event::Transact, TX_PREPARATION)
        .transition(DECISION_MAKING, Event::NoMajority, DECISION_MAKING)
        .transition(DECISION_MAKING, Event::RoundTimeout, DECISION_MAKING)
        .transition(TX_PREPARATION, Event::Done, FINISHED_TX_PREPARATION)
        .transition(TX_PREPARATION, Event::NoMajority, TX_PREPARATION)
        .transition(TX_PREPARATION, Event::RoundTimeout, TX_PREPARATION)
}

/// The default workflow: price check, decision, transaction preparation.
pub fn price_workflow() -> EngineResult<Workflow> {
    tail(
        Workflow::builder(API_CHECK)
            .round(api_check_def())
            .transition(API_CHECK, Event::Done, DECISION_MAKING),
    )
    .build()
}

/// Extended workflow that publishes a bulk dataset's content hash between
/// the price check and the decision.
pub fn data_publish_workflow() -> EngineResult<Workflow> {
    tail(
        Workflow::builder(API_CHECK)
            .round(api_check_def())
            .round(data_publish_def())
            .transition(API_CHECK, Event::Done, DATA_PUBLISH)
            .transition(DATA_PUBLISH, Event::Done, DECISION_MAKING)
            .transition(DATA_PUBLISH, Event::NoMajority, DATA_PUBLISH)
            .transition(DATA_PUBLISH, Event::RoundTimeout, DATA_PUBLISH),
    )
    .build()
}
