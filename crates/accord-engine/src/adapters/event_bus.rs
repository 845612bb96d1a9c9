//! Event bus adapter.
//!
//! Implements the EventBus port by recording round-ended events in memory.

use crate::events::RoundEndedEvent;
use crate::ports::EventBus;
use async_trait::async_trait;

/// In-memory event bus for tests and single-process runs.
pub struct InMemoryEventBus {
    events: parking_lot::RwLock<Vec<RoundEndedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            events: parking_lot::RwLock::new(Vec::new()),
        }
    }

    pub fn get_events(&self) -> Vec<RoundEndedEvent> {
        self.events.read().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.read().len()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish_round_ended(&self, event: RoundEndedEvent) -> Result<(), String> {
        self.events.write().push(event);
        Ok(())
    }
}
