//! # Shared Types Crate
//!
//! Types shared by every Accord crate: participant identity, the
//! loosely-typed value stored in the synchronized store, and constants of
//! the transaction-settlement wire format.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: all cross-crate types are defined here.
//! - **Loose external contract, strict internal access**: the replicated
//!   store speaks `StoreValue`; typed accessors live next to the code that
//!   knows each key's shape.

pub mod entities;

pub use entities::{ParticipantId, StoreValue, TX_HASH_LENGTH};
