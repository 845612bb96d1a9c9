//! Typed accessors over the loosely-typed synchronized data.
//!
//! The replicated store's external contract is string keys to JSON
//! values; this trait is the one place each key's shape is interpreted.

use crate::rounds::keys;
use accord_engine::SynchronizedData;
use shared_types::StoreValue;
use std::collections::BTreeMap;

/// Per-participant payload values recorded for a concluded round.
pub type DeserializedCollection = BTreeMap<String, Vec<StoreValue>>;

pub trait PriceWatchData {
    /// The agreed token price; `None` when absent or when the sentinel
    /// was agreed.
    fn price(&self) -> Option<f64>;
    fn most_voted_tx_hash(&self) -> Option<&str>;
    /// The round that submitted the prepared transaction for settlement.
    fn tx_submitter(&self) -> Option<&str>;
    fn data_hash(&self) -> Option<&str>;
    fn participant_to_price_round(&self) -> Option<DeserializedCollection>;
    fn participant_to_tx_round(&self) -> Option<DeserializedCollection>;
}

fn collection(data: &SynchronizedData, key: &str) -> Option<DeserializedCollection> {
    data.get(key)
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
}

impl PriceWatchData for SynchronizedData {
    fn price(&self) -> Option<f64> {
        self.get(keys::PRICE).and_then(StoreValue::as_f64)
    }

    fn most_voted_tx_hash(&self) -> Option<&str> {
        self.get(keys::MOST_VOTED_TX_HASH).and_then(StoreValue::as_str)
    }

    fn tx_submitter(&self) -> Option<&str> {
        self.get(keys::TX_SUBMITTER).and_then(StoreValue::as_str)
    }

    fn data_hash(&self) -> Option<&str> {
        self.get(keys::DATA_HASH).and_then(StoreValue::as_str)
    }

    fn participant_to_price_round(&self) -> Option<DeserializedCollection> {
        collection(self, keys::PARTICIPANT_TO_PRICE_ROUND)
    }

    fn participant_to_tx_round(&self) -> Option<DeserializedCollection> {
        collection(self, keys::PARTICIPANT_TO_TX_ROUND)
    }
}
