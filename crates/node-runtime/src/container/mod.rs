//! Service container: builds the workflow, behaviours, and adapters from
//! configuration.

mod config;

pub use config::{ConfigError, EndpointConfig, NodeConfig, ServiceConfig};

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use accord_engine::{RoundId, Workflow};
use accord_skill::adapters::{
    HttpBulkDataSource, HttpContentStore, HttpPriceSource, HttpSafeGateway, MemoryBulkDataSource,
    MemoryContentStore, MemoryPriceSource, MemorySafeGateway,
};
use accord_skill::ports::{ContractResponse, SafeTxState};
use accord_skill::{
    data_publish_workflow, price_workflow, ApiCheckBehaviour, Behaviour, DataPublishBehaviour,
    DecisionBehaviour, TxPreparationBehaviour,
};

/// Everything a driver needs: the workflow topology and one behaviour per
/// live round.
pub struct ServiceContainer {
    pub config: NodeConfig,
    pub workflow: Workflow,
    pub behaviours: HashMap<RoundId, Arc<dyn Behaviour>>,
}

impl ServiceContainer {
    pub fn build(config: NodeConfig) -> Result<Self> {
        config.validate()?;

        let workflow = if config.service.publish_dataset {
            data_publish_workflow()
        } else {
            price_workflow()
        }
        .context("workflow construction failed")?;

        let behaviours = if config.service.simulate {
            info!("using in-memory adapters (simulated run)");
            simulated_behaviours(&config)
        } else {
            info!("using live HTTP adapters");
            live_behaviours(&config)?
        };

        Ok(Self {
            config,
            workflow,
            behaviours,
        })
    }
}

fn register(behaviours: &mut HashMap<RoundId, Arc<dyn Behaviour>>, behaviour: Arc<dyn Behaviour>) {
    behaviours.insert(behaviour.matching_round(), behaviour);
}

fn simulated_behaviours(config: &NodeConfig) -> HashMap<RoundId, Arc<dyn Behaviour>> {
    let mut behaviours = HashMap::new();
    let price_source = Arc::new(MemoryPriceSource::new(config.service.simulated_price));
    register(&mut behaviours, Arc::new(ApiCheckBehaviour::new(price_source)));
    if config.service.publish_dataset {
        register(
            &mut behaviours,
            Arc::new(DataPublishBehaviour::new(
                Arc::new(MemoryBulkDataSource::default()),
                Arc::new(MemoryContentStore::new()),
            )),
        );
    }
    register(&mut behaviours, Arc::new(DecisionBehaviour));
    let gateway = Arc::new(MemorySafeGateway::new(vec![ContractResponse::State(
        SafeTxState {
            tx_hash: format!("0x{}", "7d".repeat(32)),
        },
    )]));
    register(
        &mut behaviours,
        Arc::new(TxPreparationBehaviour::new(gateway, config.transfer.clone())),
    );
    behaviours
}

fn live_behaviours(config: &NodeConfig) -> Result<HashMap<RoundId, Arc<dyn Behaviour>>> {
    let endpoints = &config.endpoints;
    let mut behaviours = HashMap::new();

    let price_source = Arc::new(
        HttpPriceSource::new(&endpoints.price_endpoint, &endpoints.price_api_key)
            .context("price source client")?,
    );
    register(&mut behaviours, Arc::new(ApiCheckBehaviour::new(price_source)));

    if config.service.publish_dataset {
        let dataset_source = Arc::new(
            HttpBulkDataSource::new(
                &endpoints.subgraph_endpoint,
                &endpoints.subgraph_api_key,
                endpoints.dataset_page_size,
            )
            .context("subgraph client")?,
        );
        let content_store = Arc::new(
            HttpContentStore::new(&endpoints.content_store_endpoint)
                .context("content store client")?,
        );
        register(
            &mut behaviours,
            Arc::new(DataPublishBehaviour::new(dataset_source, content_store)),
        );
    }

    register(&mut behaviours, Arc::new(DecisionBehaviour));

    let gateway = Arc::new(
        HttpSafeGateway::new(&endpoints.safe_gateway_endpoint).context("safe gateway client")?,
    );
    register(
        &mut behaviours,
        Arc::new(TxPreparationBehaviour::new(gateway, config.transfer.clone())),
    );

    Ok(behaviours)
}
