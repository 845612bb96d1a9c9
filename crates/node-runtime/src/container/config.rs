//! Node configuration.
//!
//! Defaults are tuned for a local simulated run; every knob that matters
//! for a live deployment has an `ACCORD_*` environment override.

use accord_skill::TransferParams;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub service: ServiceConfig,
    pub endpoints: EndpointConfig,
    pub transfer: TransferParams,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            endpoints: EndpointConfig::default(),
            transfer: TransferParams::default(),
        }
    }
}

/// Service-level knobs.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Number of participating agents.
    pub participants: usize,
    /// Per-round deadline before a timeout restart.
    pub round_timeout_secs: u64,
    /// How many activations of the same round to tolerate before giving up.
    pub max_round_restarts: u64,
    /// Run the extended workflow that publishes the bulk dataset.
    pub publish_dataset: bool,
    /// Use in-memory adapters instead of live endpoints.
    pub simulate: bool,
    /// Price served by the simulated oracle.
    pub simulated_price: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            participants: 4,
            round_timeout_secs: 30,
            max_round_restarts: 3,
            publish_dataset: false,
            simulate: true,
            simulated_price: 1.31,
        }
    }
}

/// External-service endpoints. Price and subgraph URLs are templates
/// carrying an `{api_key}` placeholder.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub price_endpoint: String,
    pub price_api_key: String,
    pub subgraph_endpoint: String,
    pub subgraph_api_key: String,
    pub dataset_page_size: usize,
    pub content_store_endpoint: String,
    pub safe_gateway_endpoint: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            price_endpoint:
                "https://api.coingecko.com/api/v3/simple/price?ids=autonolas&vs_currencies=usd&x_cg_demo_api_key={api_key}"
                    .to_owned(),
            price_api_key: String::new(),
            subgraph_endpoint: "https://gateway.thegraph.com/api/{api_key}/subgraphs/id/uniswap-v2"
                .to_owned(),
            subgraph_api_key: String::new(),
            dataset_page_size: 100,
            content_store_endpoint: "http://localhost:5001/api/v0/add".to_owned(),
            safe_gateway_endpoint: "http://localhost:8545/safe".to_owned(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("participants must be at least 1, got {0}")]
    NoParticipants(usize),

    #[error("round timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("live runs need a safe contract address; set ACCORD_SAFE_CONTRACT_ADDRESS")]
    MissingSafeContract,
}

impl NodeConfig {
    /// Build a config from defaults plus `ACCORD_*` environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(participants) = env_parse("ACCORD_PARTICIPANTS") {
            config.service.participants = participants;
        }
        if let Some(timeout) = env_parse("ACCORD_ROUND_TIMEOUT_SECS") {
            config.service.round_timeout_secs = timeout;
        }
        if let Some(restarts) = env_parse("ACCORD_MAX_ROUND_RESTARTS") {
            config.service.max_round_restarts = restarts;
        }
        if let Some(simulate) = env_parse("ACCORD_SIMULATE") {
            config.service.simulate = simulate;
        }
        if let Some(publish) = env_parse("ACCORD_PUBLISH_DATASET") {
            config.service.publish_dataset = publish;
        }
        if let Ok(endpoint) = std::env::var("ACCORD_PRICE_ENDPOINT") {
            config.endpoints.price_endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("ACCORD_PRICE_API_KEY") {
            config.endpoints.price_api_key = key;
        }
        if let Ok(endpoint) = std::env::var("ACCORD_SUBGRAPH_ENDPOINT") {
            config.endpoints.subgraph_endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("ACCORD_SUBGRAPH_API_KEY") {
            config.endpoints.subgraph_api_key = key;
        }
        if let Ok(endpoint) = std::env::var("ACCORD_CONTENT_STORE_ENDPOINT") {
            config.endpoints.content_store_endpoint = endpoint;
        }
        if let Ok(endpoint) = std::env::var("ACCORD_SAFE_GATEWAY_ENDPOINT") {
            config.endpoints.safe_gateway_endpoint = endpoint;
        }
        if let Ok(address) = std::env::var("ACCORD_SAFE_CONTRACT_ADDRESS") {
            config.transfer.safe_contract_address = address;
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.participants == 0 {
            return Err(ConfigError::NoParticipants(self.service.participants));
        }
        if self.service.round_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !self.service.simulate && self.transfer.safe_contract_address.is_empty() {
            return Err(ConfigError::MissingSafeContract);
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|raw| raw.parse().ok())
}
