//! Ports to the external collaborators of the price-watch workflow.

mod outbound;

pub use outbound::*;
