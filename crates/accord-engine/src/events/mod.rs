//! Events published by the engine.

mod published;

pub use published::*;
