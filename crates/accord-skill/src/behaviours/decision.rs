//! Decision behaviour.

use super::{Behaviour, BehaviourContext};
use crate::data::PriceWatchData;
use crate::payloads;
use crate::rounds::DECISION_MAKING;
use accord_engine::{Event, Payload, RoundId};
use async_trait::async_trait;
use tracing::{info, warn};

/// Transfer when the agreed price is below this.
const TRANSACT_PRICE_THRESHOLD: f64 = 2.0;

/// Pure function of the previously agreed price: decide whether to
/// prepare a transfer. The only external input is the synchronized data,
/// so this behaviour never suspends.
pub struct DecisionBehaviour;

#[async_trait]
impl Behaviour for DecisionBehaviour {
    fn matching_round(&self) -> RoundId {
        DECISION_MAKING
    }

    async fn act(&self, ctx: &BehaviourContext) -> Option<Payload> {
        let event = match ctx.data.price() {
            Some(price) if price < TRANSACT_PRICE_THRESHOLD => Event::Transact,
            Some(_) => Event::Done,
            None => {
                // agreed price was the sentinel or never committed
                warn!("no usable agreed price, voting to finish with error");
                Event::Error
            }
        };
        info!(event = %event, "decision made");
        Some(payloads::decision(ctx.sender.clone(), event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounds::keys;
    use accord_engine::SynchronizedData;
    use serde_json::json;
    use shared_types::ParticipantId;
    use std::collections::BTreeMap;

    async fn decide(price: serde_json::Value) -> Vec<serde_json::Value> {
        let data = SynchronizedData::from_entries(BTreeMap::from([(
            keys::PRICE.to_owned(),
            price,
        )]));
        let ctx = BehaviourContext::new(ParticipantId::new("agent-0"), data);
        DecisionBehaviour.act(&ctx).await.unwrap().values
    }

    #[tokio::test]
    async fn test_low_price_votes_transact() {
        assert_eq!(decide(json!(1.5)).await, vec![json!("transact")]);
    }

    #[tokio::test]
    async fn test_high_price_votes_done() {
        assert_eq!(decide(json!(2.5)).await, vec![json!("done")]);
    }

    #[tokio::test]
    async fn test_threshold_price_votes_done() {
        assert_eq!(decide(json!(2.0)).await, vec![json!("done")]);
    }

    #[tokio::test]
    async fn test_sentinel_price_votes_error() {
        assert_eq!(decide(json!("")).await, vec![json!("error")]);
    }
}
