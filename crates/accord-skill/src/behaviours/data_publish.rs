//! Dataset publication behaviour.

use super::{Behaviour, BehaviourContext};
use crate::payloads;
use crate::ports::{BulkDataSource, ContentStore, Filetype};
use crate::rounds::DATA_PUBLISH;
use accord_engine::{Payload, RoundId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Fetches the bulk dataset and publishes its content hash.
///
/// Both the fetch and the upload are hard failures: either one aborts
/// the payload for this round, leaving this participant absent from the
/// collection until the round restarts.
pub struct DataPublishBehaviour<G: BulkDataSource, C: ContentStore> {
    source: Arc<G>,
    content_store: Arc<C>,
}

impl<G: BulkDataSource, C: ContentStore> DataPublishBehaviour<G, C> {
    pub fn new(source: Arc<G>, content_store: Arc<C>) -> Self {
        Self {
            source,
            content_store,
        }
    }
}

#[async_trait]
impl<G: BulkDataSource, C: ContentStore> Behaviour for DataPublishBehaviour<G, C> {
    fn matching_round(&self) -> RoundId {
        DATA_PUBLISH
    }

    async fn act(&self, ctx: &BehaviourContext) -> Option<Payload> {
        let dataset = match self.source.fetch_dataset().await {
            Ok(dataset) => dataset,
            Err(err) => {
                error!(%err, "failed to fetch dataset");
                return None;
            }
        };
        let content_hash = match self.content_store.store(&dataset, Filetype::Json).await {
            Ok(hash) => hash,
            Err(err) => {
                error!(%err, "error while uploading dataset");
                return None;
            }
        };
        info!(content_hash, "dataset published");
        Some(payloads::data_publish(ctx.sender.clone(), content_hash))
    }
}
