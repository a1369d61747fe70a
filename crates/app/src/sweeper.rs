//! Sweeper — periodic auto-rejection of stale pending applications.
//!
//! The sweeper is an owned background task: [`Sweeper::start`] spawns it
//! with the service injected, and [`SweeperHandle::shutdown`] stops it and
//! waits for any sweep in progress to finish.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::{ApplicationRepository, EmployeeRepository, EventRepository, Notifier};
use crate::services::application_service::ApplicationService;

/// Starts the auto-rejection loop.
pub struct Sweeper;

impl Sweeper {
    /// Spawn a task that sweeps once immediately and then once per `period`.
    #[must_use]
    pub fn start<AR, EVR, EMR, N>(
        service: Arc<ApplicationService<AR, EVR, EMR, N>>,
        period: Duration,
    ) -> SweeperHandle
    where
        AR: ApplicationRepository + Send + Sync + 'static,
        EVR: EventRepository + Send + Sync + 'static,
        EMR: EmployeeRepository + Send + Sync + 'static,
        N: Notifier + Send + Sync + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(period_secs = period.as_secs(), "sweeper started");

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        tracing::info!("sweeper received shutdown");
                        break;
                    }
                    _ = ticker.tick() => {
                        match service.reject_old_applications().await {
                            Ok(report) if !report.failed.is_empty() => {
                                tracing::warn!(failed = report.failed.len(), "sweep finished with failures");
                            }
                            Ok(_) => {}
                            Err(err) => tracing::error!(error = %err, "sweep failed"),
                        }
                    }
                }
            }
        });

        SweeperHandle { shutdown_tx, task }
    }
}

/// Handle to a running sweeper.
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(err) = self.task.await {
            tracing::error!(error = %err, "sweeper task ended abnormally");
        }
    }

    /// Whether the background task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
