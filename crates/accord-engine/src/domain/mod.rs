//! Domain layer for the round-consensus core.
//!
//! - `event`: the enumerated reasons a round can conclude
//! - `payload`: round identity and the per-participant payload
//! - `collector`: per-round agreement accumulation and quorum math
//! - `round`: declarative round definitions and outcome rules
//! - `transition`: the validated workflow (transition table)
//! - `sync_data`: the immutable store snapshot rounds evaluate against

mod collector;
mod error;
mod event;
mod payload;
mod round;
mod sync_data;
mod transition;

pub use collector::*;
pub use error::*;
pub use event::*;
pub use payload::*;
pub use round::*;
pub use sync_data::*;
pub use transition::*;
