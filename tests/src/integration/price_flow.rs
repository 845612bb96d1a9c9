//! End-to-end runs of the default price-watch workflow.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use accord_engine::Event;
    use accord_skill::adapters::{MemoryPriceSource, MemorySafeGateway};
    use accord_skill::ports::{ContractResponse, SafeTxState};
    use accord_skill::rounds::{
        DECISION_MAKING, FINISHED_DECISION_MAKING, FINISHED_TX_PREPARATION, TX_PREPARATION,
    };
    use accord_skill::tx_hash::hash_payload_to_hex;
    use accord_skill::{
        keys, params, price_workflow, ApiCheckBehaviour, DecisionBehaviour, TransferParams,
        TxPreparationBehaviour,
    };

    use crate::integration::harness::{engine, participants, run_activation, TOTAL_PARTICIPANTS};

    const SAFE_TX_HASH: &str =
        "7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d7d";

    fn scripted_gateway() -> Arc<MemorySafeGateway> {
        Arc::new(MemorySafeGateway::new(vec![ContractResponse::State(
            SafeTxState {
                tx_hash: format!("0x{SAFE_TX_HASH}"),
            },
        )]))
    }

    #[tokio::test]
    async fn test_low_price_runs_the_full_transact_path() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(1.5)));
        assert_eq!(
            run_activation(&mut engine, &api, &group).await,
            Some(Event::Done)
        );
        assert_eq!(engine.active_round(), Some(&DECISION_MAKING));
        let data = engine.snapshot();
        assert_eq!(data.get(keys::PRICE), Some(&json!(1.5)));
        // quorum is 3 of 4; the round concluded before the last submission
        let collection = data.get(keys::PARTICIPANT_TO_PRICE_ROUND).unwrap();
        assert_eq!(collection.as_object().unwrap().len(), 3);

        assert_eq!(
            run_activation(&mut engine, &DecisionBehaviour, &group).await,
            Some(Event::Transact)
        );
        assert_eq!(engine.active_round(), Some(&TX_PREPARATION));

        let tx = TxPreparationBehaviour::new(scripted_gateway(), TransferParams::default());
        assert_eq!(
            run_activation(&mut engine, &tx, &group).await,
            Some(Event::Done)
        );

        assert!(engine.is_finished());
        assert_eq!(engine.finished(), Some(&FINISHED_TX_PREPARATION));
        let data = engine.snapshot();
        let expected = hash_payload_to_hex(
            SAFE_TX_HASH,
            params::ETHER_VALUE,
            params::SAFE_GAS,
            params::TO_ADDRESS,
            params::TX_DATA,
        )
        .unwrap();
        assert_eq!(data.get(keys::MOST_VOTED_TX_HASH), Some(&json!(expected)));
        assert_eq!(data.get(keys::TX_SUBMITTER), Some(&json!("tx_preparation")));
        assert!(data.contains_key(keys::PARTICIPANT_TO_TX_ROUND));
    }

    #[tokio::test]
    async fn test_high_price_finishes_without_a_transaction() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(2.5)));
        run_activation(&mut engine, &api, &group).await;
        assert_eq!(
            run_activation(&mut engine, &DecisionBehaviour, &group).await,
            Some(Event::Done)
        );

        assert_eq!(engine.finished(), Some(&FINISHED_DECISION_MAKING));
        let data = engine.snapshot();
        assert_eq!(data.get(keys::PRICE), Some(&json!(2.5)));
        assert!(!data.contains_key(keys::MOST_VOTED_TX_HASH));
    }

    #[tokio::test]
    async fn test_unreachable_oracle_agrees_on_the_sentinel_and_errors_out() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::unavailable()));
        assert_eq!(
            run_activation(&mut engine, &api, &group).await,
            Some(Event::Done)
        );
        // a quorum of sentinels still concludes the observation round
        assert_eq!(engine.snapshot().get(keys::PRICE), Some(&json!("")));

        assert_eq!(
            run_activation(&mut engine, &DecisionBehaviour, &group).await,
            Some(Event::Error)
        );
        assert_eq!(engine.finished(), Some(&FINISHED_DECISION_MAKING));
    }
}
