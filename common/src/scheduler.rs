// Recurring post trigger
//
// Drives the publishing pipeline on a cron schedule. Runs are strictly
// sequential: the next fire time is computed only after the current run has
// returned, so nominal ticks that pass while a run is still in flight are
// skipped rather than queued.

use crate::errors::ScheduleError;
use crate::publisher::StatusPublisher;
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Cron-driven trigger for the publishing pipeline
pub struct PostScheduler {
    schedule: Schedule,
    expression: String,
    publisher: Arc<dyn StatusPublisher>,
    shutdown_tx: broadcast::Sender<()>,
}

impl PostScheduler {
    /// Create a scheduler from a cron expression with second precision,
    /// evaluated in UTC.
    pub fn new(
        expression: &str,
        publisher: Arc<dyn StatusPublisher>,
    ) -> Result<Self, ScheduleError> {
        let schedule =
            Schedule::from_str(expression).map_err(|e| ScheduleError::InvalidCronExpression {
                expression: expression.to_string(),
                reason: e.to_string(),
            })?;
        let (shutdown_tx, _shutdown_rx) = broadcast::channel(1);

        Ok(Self {
            schedule,
            expression: expression.to_string(),
            publisher,
            shutdown_tx,
        })
    }

    /// Next nominal fire time strictly after the given instant
    pub fn next_fire_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&after).next()
    }

    /// Run the trigger loop until `stop` is called.
    ///
    /// Errors only on a schedule that yields no further fire time; run
    /// outcomes never propagate here, the publisher folds them into
    /// `PublishOutcome` and logs them at its own boundary.
    #[instrument(skip(self), fields(cron = %self.expression))]
    pub async fn start(&self) -> Result<(), ScheduleError> {
        info!("Starting post scheduler");

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            let now = Utc::now();
            let next = self
                .next_fire_after(now)
                .ok_or_else(|| ScheduleError::NoNextExecution {
                    expression: self.expression.clone(),
                })?;
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            debug!(next_fire = %next, "Waiting for next tick");

            tokio::select! {
                _ = sleep(wait) => {
                    let outcome = self.publisher.publish_next().await;
                    debug!(?outcome, "Run finished");
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown signal received, stopping scheduler");
                    break;
                }
            }
        }

        info!("Post scheduler stopped");
        Ok(())
    }

    /// Signal the trigger loop to exit after any in-flight run returns
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
