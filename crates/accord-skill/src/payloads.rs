//! Payload constructors for the price-watch rounds.
//!
//! A payload's values are ordered to match its round's selection keys;
//! these constructors are the only place that ordering is spelled out.

use crate::rounds::{API_CHECK, DATA_PUBLISH, DECISION_MAKING, TX_PREPARATION};
use accord_engine::{Event, Payload};
use serde_json::json;
use shared_types::{ParticipantId, StoreValue};

/// The price submitted when the oracle was unreachable. Keeps the round
/// live: a quorum of sentinels still concludes the round.
pub fn sentinel_price() -> StoreValue {
    json!("")
}

pub fn api_check(sender: ParticipantId, price: StoreValue) -> Payload {
    Payload::new(sender, API_CHECK, vec![price])
}

pub fn data_publish(sender: ParticipantId, content_hash: String) -> Payload {
    Payload::new(sender, DATA_PUBLISH, vec![json!(content_hash)])
}

pub fn decision(sender: ParticipantId, event: Event) -> Payload {
    Payload::new(sender, DECISION_MAKING, vec![json!(event.as_str())])
}

pub fn tx_preparation(sender: ParticipantId, tx_submitter: String, tx_hash: String) -> Payload {
    Payload::new(
        sender,
        TX_PREPARATION,
        vec![json!(tx_submitter), json!(tx_hash)],
    )
}
