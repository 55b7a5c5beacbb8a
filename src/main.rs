use std::sync::Arc;
use tag_hotness_service::{
    Config, CounterSource, HotnessRecomputeJob, HotnessScorer, InMemoryTagStore, RecomputeScheduler,
    ScoreStore,
};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Load config
    let config = Config::from_env().expect("Failed to load config");

    info!("Starting {}", config.service.service_name);

    // In-memory collaborators; a deployment embeds this engine next to the
    // platform's real counter/catalog adapters instead.
    let store = Arc::new(InMemoryTagStore::new());
    let counters: Arc<dyn CounterSource> = store.clone();
    let score_store: Arc<dyn ScoreStore> = store;

    let scorer = Arc::new(HotnessScorer::new(counters, config.scoring.clone()));

    // Shutdown flag shared between the scheduler loops and the per-tag
    // scoring units
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let job = Arc::new(
        HotnessRecomputeJob::new(score_store, scorer, config.jobs.clone())
            .with_shutdown(shutdown_rx),
    );

    let mut scheduler = RecomputeScheduler::new(job, config.jobs.clone(), shutdown_tx);
    scheduler.start();

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    scheduler.shutdown().await;

    Ok(())
}
