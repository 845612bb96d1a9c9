//! Driven ports (outbound dependencies).

use crate::events::RoundEndedEvent;
use async_trait::async_trait;

/// Sink for round-conclusion events.
///
/// The runtime uses this to wake suspended behaviour tasks and to arm the
/// next round's timeout timer.
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish_round_ended(&self, event: RoundEndedEvent) -> Result<(), String>;
}

/// Time source for event timestamps.
pub trait TimeSource: Send + Sync {
    /// Current unix timestamp in seconds.
    fn now(&self) -> u64;
}

/// Default time source using system time.
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
