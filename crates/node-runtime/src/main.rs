//! # Accord Node
//!
//! Entry point for a single-process run of the price-watch workflow: all
//! participants live in this process and the engine drives them round by
//! round until a terminal round is reached.
//!
//! ```text
//! config ──→ container ──→ driver ──→ engine
//!              (adapters,    (one activation     (quorum, commit,
//!               behaviours)   per live round)     transition table)
//! ```
//!
//! Configuration comes from defaults plus `ACCORD_*` environment
//! overrides; see `container::config` for the full list. By default the
//! run is simulated with in-memory adapters; set `ACCORD_SIMULATE=false`
//! to hit live endpoints.

mod container;
mod driver;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::container::{NodeConfig, ServiceContainer};
use crate::driver::RoundDriver;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = NodeConfig::from_env();
    info!(
        participants = config.service.participants,
        simulate = config.service.simulate,
        publish_dataset = config.service.publish_dataset,
        "starting accord node"
    );

    let container = ServiceContainer::build(config)?;
    let driver = RoundDriver::new(container)?;
    let outcome = driver.run().await?;

    info!(finished = %outcome.finished, "workflow complete");
    for ended in &outcome.rounds_ended {
        info!(
            round = %ended.round,
            event = %ended.event,
            next = %ended.next,
            generation = ended.generation,
            "round history"
        );
    }
    info!(
        data = %serde_json::to_string_pretty(&outcome.data)?,
        "final synchronized data"
    );

    Ok(())
}
