//! Adapters implementing the engine's ports.

mod event_bus;

pub use event_bus::InMemoryEventBus;
