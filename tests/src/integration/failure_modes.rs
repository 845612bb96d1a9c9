//! Disagreement, timeouts, and partial participation.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use accord_engine::{EngineError, Event};
    use accord_skill::adapters::{MemoryPriceSource, MemorySafeGateway};
    use accord_skill::ports::{ContractResponse, SafeTxState};
    use accord_skill::rounds::{API_CHECK, DECISION_MAKING, FINISHED_TX_PREPARATION};
    use accord_skill::{
        keys, payloads, price_workflow, ApiCheckBehaviour, Behaviour, BehaviourContext,
        DecisionBehaviour, TransferParams, TxPreparationBehaviour,
    };
    use shared_types::ParticipantId;

    use crate::integration::harness::{engine, participants, run_activation, TOTAL_PARTICIPANTS};

    #[tokio::test]
    async fn test_divergent_prices_restart_the_round_then_agreement_wins() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        // every participant observes a different price: after the third
        // distinct value, even unanimity among the rest cannot reach the
        // 3-of-4 quorum
        let mut outcome = None;
        for (i, participant) in group.iter().enumerate() {
            let payload = payloads::api_check(participant.clone(), json!(1.0 + i as f64));
            engine.submit_payload(payload).unwrap();
            if let Some(event) = engine.tick().await.unwrap() {
                outcome = Some(event);
                break;
            }
        }
        assert_eq!(outcome, Some(Event::NoMajority));
        assert_eq!(engine.active_round(), Some(&API_CHECK));
        assert_eq!(engine.collected(), 0);
        assert!(!engine.snapshot().contains_key(keys::PRICE));

        // second attempt: everyone sees the same oracle
        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(1.5)));
        assert_eq!(
            run_activation(&mut engine, &api, &group).await,
            Some(Event::Done)
        );
        assert_eq!(engine.snapshot().get(keys::PRICE), Some(&json!(1.5)));
    }

    #[tokio::test]
    async fn test_single_outlier_does_not_block_the_majority() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        engine
            .submit_payload(payloads::api_check(group[0].clone(), json!(9.9)))
            .unwrap();
        assert_eq!(engine.tick().await.unwrap(), None);
        let mut outcome = None;
        for participant in &group[1..] {
            engine
                .submit_payload(payloads::api_check(participant.clone(), json!(1.5)))
                .unwrap();
            outcome = engine.tick().await.unwrap();
        }
        assert_eq!(outcome, Some(Event::Done));
        assert_eq!(engine.snapshot().get(keys::PRICE), Some(&json!(1.5)));
    }

    #[tokio::test]
    async fn test_quorum_is_reached_without_full_participation() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(1.5)));
        run_activation(&mut engine, &api, &group).await;
        run_activation(&mut engine, &DecisionBehaviour, &group).await;

        // the first contract query fails, the rest succeed: three payloads
        // are enough for the 3-of-4 quorum
        let gateway = Arc::new(MemorySafeGateway::new(vec![
            ContractResponse::Other("error performative".to_owned()),
            ContractResponse::State(SafeTxState {
                tx_hash: format!("0x{}", "2a".repeat(32)),
            }),
        ]));
        let tx = TxPreparationBehaviour::new(gateway, TransferParams::default());
        assert_eq!(
            run_activation(&mut engine, &tx, &group).await,
            Some(Event::Done)
        );
        assert_eq!(engine.finished(), Some(&FINISHED_TX_PREPARATION));
        let collection = engine.snapshot();
        let tx_round = collection.get(keys::PARTICIPANT_TO_TX_ROUND).unwrap();
        assert_eq!(tx_round.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_wrong_length_hash_stalls_tx_preparation_until_restart() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(1.5)));
        run_activation(&mut engine, &api, &group).await;
        run_activation(&mut engine, &DecisionBehaviour, &group).await;

        // the contract keeps returning a truncated hash, so nobody can
        // build a payload and the round goes round in circles
        let gateway = Arc::new(MemorySafeGateway::new(vec![ContractResponse::State(
            SafeTxState {
                tx_hash: "0xdeadbeef".to_owned(),
            },
        )]));
        let tx = TxPreparationBehaviour::new(gateway, TransferParams::default());
        let generation = engine.generation();
        assert_eq!(run_activation(&mut engine, &tx, &group).await, None);
        assert_eq!(engine.collected(), 0);

        engine.inject_timeout().await.unwrap();
        assert_eq!(
            engine.active_round(),
            Some(&accord_skill::rounds::TX_PREPARATION)
        );
        assert_eq!(engine.generation(), generation + 1);
    }

    #[tokio::test]
    async fn test_timeout_restart_keeps_earlier_commits() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(2.5)));
        run_activation(&mut engine, &api, &group).await;
        assert_eq!(engine.active_round(), Some(&DECISION_MAKING));
        let generation = engine.generation();

        // one vote arrives, then the deadline fires
        let ctx = BehaviourContext::new(group[0].clone(), engine.snapshot());
        let payload = DecisionBehaviour.act(&ctx).await.unwrap();
        engine.submit_payload(payload).unwrap();
        engine.inject_timeout().await.unwrap();

        assert_eq!(engine.active_round(), Some(&DECISION_MAKING));
        assert_eq!(engine.generation(), generation + 1);
        assert_eq!(engine.collected(), 0);
        assert_eq!(engine.snapshot().get(keys::PRICE), Some(&json!(2.5)));
    }

    #[tokio::test]
    async fn test_stale_payloads_are_rejected_after_the_round_advances() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(1.5)));
        run_activation(&mut engine, &api, &group).await;
        assert_eq!(engine.active_round(), Some(&DECISION_MAKING));

        // the slow fourth participant submits its observation too late
        let late = payloads::api_check(ParticipantId::new("agent-3"), json!(1.5));
        assert!(matches!(
            engine.submit_payload(late),
            Err(EngineError::RoundMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_timeout_after_the_workflow_finished_is_an_error() {
        let mut engine = engine(price_workflow().unwrap());
        let group = participants(TOTAL_PARTICIPANTS);

        let api = ApiCheckBehaviour::new(Arc::new(MemoryPriceSource::new(2.5)));
        run_activation(&mut engine, &api, &group).await;
        run_activation(&mut engine, &DecisionBehaviour, &group).await;
        assert!(engine.is_finished());

        assert!(matches!(
            engine.inject_timeout().await,
            Err(EngineError::NoActiveRound)
        ));
    }
}
