//! Port implementations.
//!
//! `http` talks to the real services over reqwest; `memory` provides
//! deterministic in-process stand-ins for tests and simulation runs.

mod http;
mod memory;

pub use http::{HttpBulkDataSource, HttpContentStore, HttpPriceSource, HttpSafeGateway};
pub use memory::{
    MemoryBulkDataSource, MemoryContentStore, MemoryPriceSource, MemorySafeGateway,
};
