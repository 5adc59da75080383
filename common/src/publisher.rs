// Publishing pipeline
//
// One run loads the fixed content item, composes the status text, uploads
// the image and publishes the status. Every failure terminates the run with
// a single log record; nothing propagates past `publish_next`.

use crate::compose::{compose_status, PhrasePools};
use crate::content::{ContentItem, ContentStore};
use crate::errors::PublishError;
use crate::mastodon::{StatusClient, Visibility, IMAGE_JPEG};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Language tag sent with every status
const LANGUAGE: &str = "en";

/// Terminal outcome of one publishing run
#[derive(Debug)]
pub enum PublishOutcome {
    Posted { status_id: String },
    Failed { error: PublishError },
}

/// Entry point of the publishing pipeline, driven by the scheduler
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusPublisher: Send + Sync {
    /// Execute one end-to-end posting attempt.
    ///
    /// Infallible by type: failures are logged and folded into the outcome.
    async fn publish_next(&self) -> PublishOutcome;
}

/// Stateless pipeline over a content store and a Mastodon client
pub struct Publisher {
    store: Arc<dyn ContentStore>,
    client: Arc<dyn StatusClient>,
    pools: PhrasePools,
    item: ContentItem,
}

impl Publisher {
    /// Create a publisher posting the given item on every run
    pub fn new(
        store: Arc<dyn ContentStore>,
        client: Arc<dyn StatusClient>,
        pools: PhrasePools,
        item: ContentItem,
    ) -> Self {
        Self {
            store,
            client,
            pools,
            item,
        }
    }

    /// The pipeline proper. Steps run strictly in sequence; the first
    /// failure aborts the run, so upload is never attempted after a content
    /// failure and publish never after an upload failure.
    async fn run_pipeline(&self) -> Result<String, PublishError> {
        let metadata = self.store.load_metadata(&self.item).await?;
        let image = self.store.load_image(&self.item).await?;

        let text = compose_status(&metadata, &self.pools);

        let media_id = self
            .client
            .upload_media(image, IMAGE_JPEG, &metadata.description)
            .await?;

        let status_id = self
            .client
            .create_status(&text, &[media_id], Visibility::Public, LANGUAGE)
            .await?;

        Ok(status_id)
    }
}

#[async_trait]
impl StatusPublisher for Publisher {
    #[instrument(skip(self), fields(item_id = %self.item.id))]
    async fn publish_next(&self) -> PublishOutcome {
        info!(image = %self.item.image_path.display(), "Going to post new content item");

        match self.run_pipeline().await {
            Ok(status_id) => {
                info!(%status_id, "Status successfully posted");
                PublishOutcome::Posted { status_id }
            }
            Err(error) => {
                let http_status = match &error {
                    PublishError::Mastodon(e) => e.http_status(),
                    PublishError::Content(_) => None,
                };
                error!(error = %error, ?http_status, "Publishing run failed");
                PublishOutcome::Failed { error }
            }
        }
    }
}
