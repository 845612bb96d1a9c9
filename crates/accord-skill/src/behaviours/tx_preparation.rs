//! Transaction preparation behaviour.

use super::{Behaviour, BehaviourContext};
use crate::params::TransferParams;
use crate::payloads;
use crate::ports::{ContractResponse, SafeGateway};
use crate::rounds::TX_PREPARATION;
use crate::tx_hash::hash_payload_to_hex;
use accord_engine::{Payload, RoundId};
use async_trait::async_trait;
use shared_types::TX_HASH_LENGTH;
use std::sync::Arc;
use tracing::{error, info};

/// Queries the multisig contract for the raw safe transaction hash and
/// submits the packed settlement payload.
///
/// Any deviation from the expected response shape (wrong performative,
/// wrong hash length) aborts the payload with a diagnostic; the process
/// never crashes on a malformed contract response.
pub struct TxPreparationBehaviour<S: SafeGateway> {
    gateway: Arc<S>,
    params: TransferParams,
}

impl<S: SafeGateway> TxPreparationBehaviour<S> {
    pub fn new(gateway: Arc<S>, params: TransferParams) -> Self {
        Self { gateway, params }
    }

    async fn build_safe_tx_hash(&self) -> Option<String> {
        let request = self.params.safe_tx_request();
        let response = match self.gateway.raw_tx_hash(&request).await {
            Ok(response) => response,
            Err(err) => {
                error!(%err, "contract query failed");
                return None;
            }
        };
        let state = match response {
            ContractResponse::State(state) => state,
            ContractResponse::Other(performative) => {
                error!(
                    performative,
                    "couldn't get safe tx hash, expected a state response"
                );
                return None;
            }
        };
        if state.tx_hash.len() != TX_HASH_LENGTH {
            error!(tx_hash = %state.tx_hash, "invalid safe tx hash returned");
            return None;
        }
        // the packing step takes the bare hash, without the 0x prefix
        let Some(bare) = state.tx_hash.strip_prefix("0x") else {
            error!(tx_hash = %state.tx_hash, "safe tx hash is missing the 0x prefix");
            return None;
        };
        Some(bare.to_owned())
    }
}

#[async_trait]
impl<S: SafeGateway> Behaviour for TxPreparationBehaviour<S> {
    fn matching_round(&self) -> RoundId {
        TX_PREPARATION
    }

    async fn act(&self, ctx: &BehaviourContext) -> Option<Payload> {
        let safe_tx_hash = match self.build_safe_tx_hash().await {
            Some(hash) => hash,
            None => {
                error!("could not build the safe transaction's hash");
                return None;
            }
        };
        let tx_hash = match hash_payload_to_hex(
            &safe_tx_hash,
            self.params.value,
            self.params.safe_tx_gas,
            &self.params.to_address,
            &self.params.data,
        ) {
            Ok(tx_hash) => tx_hash,
            Err(err) => {
                error!(%err, "could not pack the settlement payload");
                return None;
            }
        };
        info!(tx_hash, "prepared transaction");
        Some(payloads::tx_preparation(
            ctx.sender.clone(),
            TX_PREPARATION.name().to_owned(),
            tx_hash,
        ))
    }
}
