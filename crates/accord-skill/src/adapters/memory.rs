//! In-memory adapters for tests and simulation runs.

use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use shared_types::StoreValue;

use crate::error::ClientError;
use crate::ports::{
    BulkDataSource, ContentStore, ContractResponse, Filetype, PriceSource, SafeGateway,
    SafeTxRequest,
};

/// Fixed-price oracle. `None` behaves as an unreachable endpoint.
pub struct MemoryPriceSource {
    price: Option<f64>,
}

impl MemoryPriceSource {
    pub fn new(price: f64) -> Self {
        Self { price: Some(price) }
    }

    pub fn unavailable() -> Self {
        Self { price: None }
    }
}

#[async_trait]
impl PriceSource for MemoryPriceSource {
    async fn fetch_price(&self) -> Result<f64, ClientError> {
        self.price.ok_or(ClientError::Status(503))
    }
}

/// Canned dataset.
pub struct MemoryBulkDataSource {
    dataset: StoreValue,
}

impl MemoryBulkDataSource {
    pub fn new(dataset: StoreValue) -> Self {
        Self { dataset }
    }
}

impl Default for MemoryBulkDataSource {
    fn default() -> Self {
        Self::new(serde_json::json!({ "data": { "pairs": [] } }))
    }
}

#[async_trait]
impl BulkDataSource for MemoryBulkDataSource {
    async fn fetch_dataset(&self) -> Result<StoreValue, ClientError> {
        Ok(self.dataset.clone())
    }
}

/// Content-addressed store keyed by the sha256 of the serialized object.
#[derive(Default)]
pub struct MemoryContentStore {
    objects: RwLock<Vec<(String, StoreValue)>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, hash: &str) -> Option<StoreValue> {
        self.objects
            .read()
            .iter()
            .find(|(stored, _)| stored == hash)
            .map(|(_, obj)| obj.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn store(&self, obj: &StoreValue, _filetype: Filetype) -> Result<String, ClientError> {
        let hash = hex::encode(Sha256::digest(obj.to_string().as_bytes()));
        self.objects.write().push((hash.clone(), obj.clone()));
        Ok(hash)
    }
}

/// Scriptable multisig gateway: responses are served in push order, and
/// the last one repeats once the script runs out.
pub struct MemorySafeGateway {
    script: RwLock<Vec<ContractResponse>>,
    requests: RwLock<Vec<SafeTxRequest>>,
}

impl MemorySafeGateway {
    pub fn new(responses: Vec<ContractResponse>) -> Self {
        Self {
            script: RwLock::new(responses),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<SafeTxRequest> {
        self.requests.read().clone()
    }
}

#[async_trait]
impl SafeGateway for MemorySafeGateway {
    async fn raw_tx_hash(&self, request: &SafeTxRequest) -> Result<ContractResponse, ClientError> {
        self.requests.write().push(request.clone());
        let mut script = self.script.write();
        if script.is_empty() {
            return Err(ClientError::Contract("no scripted response".to_owned()));
        }
        if script.len() == 1 {
            Ok(script[0].clone())
        } else {
            Ok(script.remove(0))
        }
    }
}
