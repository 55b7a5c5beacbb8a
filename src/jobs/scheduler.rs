// ============================================
// Recompute Scheduler
// ============================================
//
// Owns the three recurring cadences (hourly fast pass, daily bulk,
// weekly deep pass) as explicit interval loops with a start/shutdown
// lifecycle, so tests can call the per-cadence job methods directly
// without a live timer.

use crate::config::JobsConfig;
use crate::jobs::recompute::HotnessRecomputeJob;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
enum Cadence {
    Hourly,
    Daily,
    Weekly,
}

impl Cadence {
    fn as_str(&self) -> &'static str {
        match self {
            Cadence::Hourly => "hourly",
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
        }
    }
}

pub struct RecomputeScheduler {
    job: Arc<HotnessRecomputeJob>,
    config: JobsConfig,
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<(Cadence, JoinHandle<()>)>,
}

impl RecomputeScheduler {
    pub fn new(
        job: Arc<HotnessRecomputeJob>,
        config: JobsConfig,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        Self {
            job,
            config,
            shutdown_tx,
            handles: Vec::new(),
        }
    }

    /// Spawn the three cadence loops.
    pub fn start(&mut self) {
        let cadences = [
            (Cadence::Hourly, self.config.hourly_interval_secs),
            (Cadence::Daily, self.config.daily_interval_secs),
            (Cadence::Weekly, self.config.weekly_interval_secs),
        ];

        for (cadence, period_secs) in cadences {
            let handle = self.spawn_cadence(cadence, Duration::from_secs(period_secs));
            self.handles.push((cadence, handle));
            info!(
                cadence = cadence.as_str(),
                period_secs, "Recompute cadence scheduled"
            );
        }
    }

    fn spawn_cadence(&self, cadence: Cadence, period: Duration) -> JoinHandle<()> {
        let job = self.job.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; a full catalog pass at
            // startup is not wanted.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        run_cadence(&job, cadence).await;
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!(cadence = cadence.as_str(), "Cadence loop stopping");
                            break;
                        }
                    }
                }
            }
        })
    }

    /// Signal shutdown and wait (bounded) for the cadence loops to drain.
    pub async fn shutdown(self) {
        info!("Shutting down recompute scheduler");
        let _ = self.shutdown_tx.send(true);

        for (cadence, handle) in self.handles {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
                Ok(Ok(())) => info!(cadence = cadence.as_str(), "Cadence loop shut down"),
                Ok(Err(e)) => warn!(cadence = cadence.as_str(), error = %e, "Cadence loop panicked"),
                Err(_) => warn!(
                    cadence = cadence.as_str(),
                    "Cadence loop did not shut down within timeout"
                ),
            }
        }
    }
}

async fn run_cadence(job: &HotnessRecomputeJob, cadence: Cadence) {
    match cadence {
        Cadence::Hourly => match job.recompute_hourly().await {
            Ok(stats) => info!(
                total = stats.total_tags,
                updated = stats.updated_tags,
                duration_ms = stats.duration_ms,
                "Hourly fast pass completed"
            ),
            Err(e) => error!(error = %e, "Hourly fast pass failed"),
        },
        Cadence::Daily => match job.recompute_daily().await {
            Ok(updated) => info!(updated, "Daily bulk recompute completed"),
            Err(e) => error!(error = %e, "Daily bulk recompute failed"),
        },
        Cadence::Weekly => match job.recompute_deep_weekly().await {
            Ok(stats) => info!(
                total = stats.total_tags,
                updated = stats.updated_tags,
                duration_ms = stats.duration_ms,
                "Weekly deep pass completed"
            ),
            Err(e) => error!(error = %e, "Weekly deep pass failed"),
        },
    }
}
