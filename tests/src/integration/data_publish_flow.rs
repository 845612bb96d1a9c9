//! End-to-end runs of the extended workflow with dataset publication.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use sha2::{Digest, Sha256};

    use accord_engine::Event;
    use accord_skill::adapters::{
        MemoryBulkDataSource, MemoryContentStore, MemoryPriceSource, MemorySafeGateway,
    };
    use accord_skill::ports::{ContractResponse, SafeTxState};
    use accord_skill::rounds::{DATA_PUBLISH, DECISION_MAKING, FINISHED_TX_PREPARATION};
    use accord_skill::{
        data_publish_workflow, keys, ApiCheckBehaviour, DataPublishBehaviour, DecisionBehaviour,
        TransferParams, TxPreparationBehaviour,
    };

    use crate::integration::harness::{engine, participants, run_activation, TOTAL_PARTICIPANTS};

    #[tokio::test]
    async fn test_dataset_hash_is_agreed_between_price_and_decision() {
        let mut engine = engine(data_publish_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(1.9)));
        assert_eq!(
            run_activation(&mut engine, &api, &group).await,
            Some(Event::Done)
        );
        assert_eq!(engine.active_round(), Some(&DATA_PUBLISH));

        let dataset = json!({"data": {"pairs": [{"id": "0xabc", "volumeUSD": "123.4"}]}});
        let store = Arc::new(MemoryContentStore::new());
        let publish = DataPublishBehaviour::new(
            Arc::new(MemoryBulkDataSource::new(dataset.clone())),
            Arc::clone(&store),
        );
        assert_eq!(
            run_activation(&mut engine, &publish, &group).await,
            Some(Event::Done)
        );
        assert_eq!(engine.active_round(), Some(&DECISION_MAKING));

        let expected_hash = hex::encode(Sha256::digest(dataset.to_string().as_bytes()));
        let data = engine.snapshot();
        assert_eq!(data.get(keys::DATA_HASH), Some(&json!(expected_hash)));
        assert!(data.contains_key(keys::PARTICIPANT_TO_DATA_ROUND));
        // the object itself is retrievable under the agreed hash
        assert_eq!(store.get(&expected_hash), Some(dataset));

        assert_eq!(
            run_activation(&mut engine, &DecisionBehaviour, &group).await,
            Some(Event::Transact)
        );
        let gateway = Arc::new(MemorySafeGateway::new(vec![ContractResponse::State(
            SafeTxState {
                tx_hash: format!("0x{}", "1f".repeat(32)),
            },
        )]));
        let tx = TxPreparationBehaviour::new(gateway, TransferParams::default());
        assert_eq!(
            run_activation(&mut engine, &tx, &group).await,
            Some(Event::Done)
        );
        assert_eq!(engine.finished(), Some(&FINISHED_TX_PREPARATION));
    }

    #[tokio::test]
    async fn test_failed_publication_restarts_the_round_on_timeout() {
        struct FailingSource;

        #[async_trait::async_trait]
        impl accord_skill::BulkDataSource for FailingSource {
            async fn fetch_dataset(
                &self,
            ) -> Result<shared_types::StoreValue, accord_skill::ClientError> {
                Err(accord_skill::ClientError::Body("null body".to_owned()))
            }
        }

        let mut engine = engine(data_publish_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(1.9)));
        run_activation(&mut engine, &api, &group).await;
        let generation = engine.generation();

        // nobody manages to publish, so nothing is submitted
        let publish =
            DataPublishBehaviour::new(Arc::new(FailingSource), Arc::new(MemoryContentStore::new()));
        assert_eq!(run_activation(&mut engine, &publish, &group).await, None);
        assert_eq!(engine.collected(), 0);

        // the runtime's deadline fires and the round restarts in place
        assert_eq!(
            engine.inject_timeout().await.unwrap(),
            Event::RoundTimeout
        );
        assert_eq!(engine.active_round(), Some(&DATA_PUBLISH));
        assert_eq!(engine.generation(), generation + 1);
        // the agreed price survives the restart
        assert!(engine.snapshot().contains_key(keys::PRICE));
    }
}
