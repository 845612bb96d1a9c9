//! Price observation behaviour.

use super::{Behaviour, BehaviourContext};
use crate::payloads;
use crate::ports::PriceSource;
use crate::rounds::API_CHECK;
use accord_engine::{Payload, RoundId};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Fetches the token price and submits it.
///
/// A failed fetch is transient: the behaviour falls back to the sentinel
/// price instead of withholding its payload, so a flaky oracle cannot
/// stall the round.
pub struct ApiCheckBehaviour<P: PriceSource> {
    source: Arc<P>,
}

impl<P: PriceSource> ApiCheckBehaviour<P> {
    pub fn new(source: Arc<P>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<P: PriceSource> Behaviour for ApiCheckBehaviour<P> {
    fn matching_round(&self) -> RoundId {
        API_CHECK
    }

    async fn act(&self, ctx: &BehaviourContext) -> Option<Payload> {
        let price = match self.source.fetch_price().await {
            Ok(price) => {
                info!(price, "fetched token price");
                json!(price)
            }
            Err(err) => {
                error!(%err, "could not retrieve price, submitting sentinel");
                payloads::sentinel_price()
            }
        };
        Some(payloads::api_check(ctx.sender.clone(), price))
    }
}
