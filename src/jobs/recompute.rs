// ============================================
// Hotness Recompute Job
// ============================================
//
// Batch recomputation of tag hotness over the whole active catalog.
//
// Workflow per pass:
// 1. Enumerate active tags from the score store (failure here is fatal to
//    the run)
// 2. Score tags on a bounded worker pool, one independent unit of work per
//    tag (a bad tag is logged and skipped, never aborts the pass)
// 3. Write each score back and aggregate {total, updated} counts
//
// The daily cadence and the bulk manual trigger delegate to the score
// store's own recompute path instead of scoring here.

use crate::config::JobsConfig;
use crate::error::{AppError, Result};
use crate::models::{HotnessResult, RecomputeStats, ScoringMode, StatsSummary, Tag, TagId};
use crate::services::scoring::HotnessScorer;
use crate::services::store::ScoreStore;
use chrono::Utc;
use futures::{stream, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, info, warn};

enum TagOutcome {
    Updated,
    Failed,
    Cancelled,
}

pub struct HotnessRecomputeJob {
    store: Arc<dyn ScoreStore>,
    scorer: Arc<HotnessScorer>,
    config: JobsConfig,
    shutdown: watch::Receiver<bool>,
}

impl HotnessRecomputeJob {
    pub fn new(store: Arc<dyn ScoreStore>, scorer: Arc<HotnessScorer>, config: JobsConfig) -> Self {
        // Default receiver never observes a cancellation.
        let (_tx, shutdown) = watch::channel(false);
        Self {
            store,
            scorer,
            config,
            shutdown,
        }
    }

    /// Attach a cancellation flag; checked at the top of each per-tag unit
    /// of work.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Hourly cadence: fast-mode pass over all active tags.
    pub async fn recompute_hourly(&self) -> Result<RecomputeStats> {
        self.run_pass(ScoringMode::Fast).await
    }

    /// Weekly cadence: deep-mode pass (time decay + social effect).
    pub async fn recompute_deep_weekly(&self) -> Result<RecomputeStats> {
        self.run_pass(ScoringMode::Deep).await
    }

    /// Daily cadence: the score store's own bulk recompute path.
    pub async fn recompute_daily(&self) -> Result<u64> {
        let updated = self.store.recompute_all().await?;
        info!(updated, "Bulk recompute delegated to score store");
        Ok(updated)
    }

    /// Operator-triggered recompute. With a tag id, fast-scores exactly
    /// that tag and returns 1 (or 0 when unknown or failing); without one,
    /// runs the bulk path.
    pub async fn manual_recompute(&self, tag_id: Option<TagId>) -> Result<u64> {
        let Some(tag_id) = tag_id else {
            return self.recompute_daily().await;
        };

        let Some(tag) = self.store_call(self.store.get_tag(tag_id)).await? else {
            warn!(tag_id = %tag_id, "Manual recompute requested for unknown tag");
            return Ok(0);
        };

        match self.score_and_store(&tag, ScoringMode::Fast).await {
            Ok(result) => {
                info!(tag_id = %tag_id, hotness = result.hotness, "Manual recompute completed");
                Ok(1)
            }
            Err(e) => {
                warn!(tag_id = %tag_id, error = %e, "Manual recompute failed");
                Ok(0)
            }
        }
    }

    /// Catalog-level counters for observability.
    pub async fn statistics_summary(&self) -> Result<StatsSummary> {
        let total_active_tags = self.store.active_tag_count().await?;
        let average_hotness = self.store.average_hotness().await?;

        Ok(StatsSummary {
            total_active_tags,
            average_hotness,
        })
    }

    async fn run_pass(&self, mode: ScoringMode) -> Result<RecomputeStats> {
        let start = Instant::now();
        let started_at = Utc::now();

        let tags = self.store.list_active_tags().await?;
        let total_tags = tags.len() as u32;

        info!(
            mode = mode.as_str(),
            tags = total_tags,
            workers = self.config.workers,
            "Starting recompute pass"
        );

        let outcomes: Vec<TagOutcome> = stream::iter(tags)
            .map(|tag| self.recompute_tag(tag, mode))
            .buffer_unordered(self.config.workers.max(1))
            .collect()
            .await;

        let updated_tags = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TagOutcome::Updated))
            .count() as u32;
        let cancelled = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TagOutcome::Cancelled))
            .count() as u32;

        if cancelled > 0 {
            warn!(
                mode = mode.as_str(),
                cancelled, "Recompute pass cancelled before completion"
            );
        }

        let stats = RecomputeStats {
            total_tags,
            updated_tags,
            started_at: Some(started_at),
            completed_at: Some(Utc::now()),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            mode = mode.as_str(),
            total = stats.total_tags,
            updated = stats.updated_tags,
            duration_ms = stats.duration_ms,
            "Recompute pass completed"
        );

        Ok(stats)
    }

    /// One isolated unit of work: read counters, score, persist. Any error
    /// is contained here and the tag is simply counted as not updated.
    async fn recompute_tag(&self, tag: Tag, mode: ScoringMode) -> TagOutcome {
        if *self.shutdown.borrow() {
            debug!(tag_id = %tag.id, "Skipping tag, shutdown in progress");
            return TagOutcome::Cancelled;
        }

        match self.score_and_store(&tag, mode).await {
            Ok(result) => {
                debug!(tag_id = %tag.id, hotness = result.hotness, "Tag hotness updated");
                TagOutcome::Updated
            }
            Err(e) => {
                warn!(tag_id = %tag.id, error = %e, "Failed to recompute tag, skipping");
                TagOutcome::Failed
            }
        }
    }

    async fn score_and_store(&self, tag: &Tag, mode: ScoringMode) -> Result<HotnessResult> {
        let result = self.scorer.score(tag, mode).await?;
        let written = self
            .store_call(self.store.write_hotness(tag.id, result.hotness))
            .await?;

        if !written {
            return Err(AppError::TagNotFound(tag.id));
        }

        Ok(result)
    }

    async fn store_call<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match timeout(Duration::from_millis(self.config.store_timeout_ms), fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(self.config.store_timeout_ms)),
        }
    }
}
