//! Ports of the round-consensus core.

mod outbound;

pub use outbound::*;
