// Bot binary entry point

use anyhow::Result;
use common::compose::PhrasePools;
use common::config::Settings;
use common::content::{self, ContentItem, ContentStore, FileContentStore};
use common::mastodon::{ApiStatusClient, StatusClient};
use common::publisher::{Publisher, StatusPublisher};
use common::scheduler::PostScheduler;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load and validate configuration
    let settings = Settings::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // Initialize tracing/logging
    common::telemetry::init_logging(&settings.observability.log_level)?;

    info!("Starting hourly content-posting bot");

    // Startup diagnostic: report how much content is available
    let image_count = content::count_images(&settings.content.dir).await;
    info!(
        dir = %settings.content.dir,
        images = image_count,
        "Bot started, content directory scanned"
    );

    // Construct the collaborators
    let store: Arc<dyn ContentStore> = Arc::new(FileContentStore::new());
    let client: Arc<dyn StatusClient> =
        Arc::new(ApiStatusClient::new(&settings.mastodon).map_err(|e| {
            error!(error = %e, "Failed to create Mastodon client");
            anyhow::anyhow!("Mastodon client error: {}", e)
        })?);

    let pools = PhrasePools::from(&settings.text);
    let item = ContentItem::in_dir(&settings.content.dir, &settings.content.item_id);
    info!(item_id = %item.id, "Publisher configured");

    let publisher: Arc<dyn StatusPublisher> =
        Arc::new(Publisher::new(store, client, pools, item));

    // Create the scheduler; the cron expression was validated with the settings
    let scheduler = Arc::new(
        PostScheduler::new(&settings.schedule.cron, publisher).map_err(|e| {
            error!(error = %e, "Failed to create scheduler");
            anyhow::anyhow!("Scheduler error: {}", e)
        })?,
    );

    // Set up graceful shutdown
    let scheduler_for_shutdown = scheduler.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        info!("Received Ctrl+C signal, initiating graceful shutdown");
        scheduler_for_shutdown.stop();
    });

    // Run the trigger loop until shutdown
    info!(cron = %settings.schedule.cron, "Starting scheduler loop");
    if let Err(e) = scheduler.start().await {
        error!(error = %e, "Scheduler error");
        return Err(anyhow::anyhow!("Scheduler error: {}", e));
    }

    info!("Bot stopped");
    Ok(())
}
