//! Cross-crate workflow tests.

pub mod harness;

mod data_publish_flow;
mod failure_modes;
mod price_flow;
