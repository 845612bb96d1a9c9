//! # accord-skill
//!
//! The price-watch workflow built on `accord-engine`.
//!
//! Participants agree on a token price fetched from a public API, decide
//! from the agreed price whether to transfer, and if so agree on the hash
//! of the transaction to settle. An extended variant additionally fetches
//! a bulk dataset and publishes its content hash before deciding.
//!
//! ```text
//! api_check --done--> decision_making --transact--> tx_preparation --done--> finished_tx_preparation
//!                                     --done|error--> finished_decision_making
//! (self-loops on no_majority|round_timeout for every live round)
//! ```
//!
//! Each round has one behaviour: the resumable task a participant runs to
//! produce its payload. Behaviours talk to the outside world exclusively
//! through the ports in [`ports`]; HTTP adapters and in-memory adapters
//! live in [`adapters`]. No external-call failure escapes a behaviour:
//! each failure path ends in a logged diagnostic plus either a sentinel
//! payload or no payload at all.

pub mod adapters;
pub mod behaviours;
pub mod data;
pub mod error;
pub mod params;
pub mod payloads;
pub mod ports;
pub mod queries;
pub mod rounds;
pub mod tx_hash;

// Re-export main types
pub use behaviours::{
    ApiCheckBehaviour, Behaviour, BehaviourContext, DataPublishBehaviour, DecisionBehaviour,
    TxPreparationBehaviour,
};
pub use data::PriceWatchData;
pub use error::ClientError;
pub use params::TransferParams;
pub use ports::{
    BulkDataSource, ContentStore, ContractResponse, Filetype, PriceSource, SafeGateway,
    SafeTxRequest, SafeTxState,
};
pub use rounds::{data_publish_workflow, keys, price_workflow};
