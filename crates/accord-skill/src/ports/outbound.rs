//! Driven ports (outbound dependencies).
//!
//! Behaviours suspend exactly at these call boundaries; every implementor
//! must release whatever it acquired on all exit paths, including
//! cancellation mid-await.

use crate::error::ClientError;
use async_trait::async_trait;
use serde::Deserialize;
use shared_types::StoreValue;

/// Price oracle.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Current token price in USD.
    async fn fetch_price(&self) -> Result<f64, ClientError>;
}

/// Bulk dataset query endpoint.
#[async_trait]
pub trait BulkDataSource: Send + Sync {
    /// Fetch the dataset as a generic mapping. A null or absent body is
    /// an error; partial data is the caller's problem to judge.
    async fn fetch_dataset(&self) -> Result<StoreValue, ClientError>;
}

/// Filetypes the content-addressed store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filetype {
    Json,
}

/// Content-addressed storage.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store an object and return its opaque content hash.
    async fn store(&self, obj: &StoreValue, filetype: Filetype) -> Result<String, ClientError>;
}

/// Parameters of a raw safe-transaction-hash query.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeTxRequest {
    pub contract_address: String,
    pub to_address: String,
    pub value: u64,
    pub data: Vec<u8>,
    pub safe_tx_gas: u64,
    pub chain_id: String,
}

/// State carried by a successful contract query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SafeTxState {
    pub tx_hash: String,
}

/// Outcome of a contract query, mirroring the contract protocol's
/// performatives: only `State` carries a usable result.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractResponse {
    State(SafeTxState),
    /// Any other performative, carried verbatim for diagnostics.
    Other(String),
}

/// Multisig contract gateway.
#[async_trait]
pub trait SafeGateway: Send + Sync {
    /// Query the raw safe transaction hash for the given transfer.
    async fn raw_tx_hash(&self, request: &SafeTxRequest) -> Result<ContractResponse, ClientError>;
}
