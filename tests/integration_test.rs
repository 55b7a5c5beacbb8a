use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tag_hotness_service::config::JobsConfig;
use tag_hotness_service::models::{ContentId, Tag, TagId, UserId};
use tag_hotness_service::{
    AppError, Config, CounterSource, HotnessRecomputeJob, HotnessScorer, InMemoryTagStore,
    RecomputeScheduler, Result,
};
use tokio::sync::watch;
use uuid::Uuid;

/// Delegating counter source that fails every query for one tag.
struct FlakyCounters {
    inner: Arc<InMemoryTagStore>,
    fail_for: TagId,
}

impl FlakyCounters {
    fn check(&self, tag_id: TagId) -> Result<()> {
        if tag_id == self.fail_for {
            return Err(AppError::CounterSource("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CounterSource for FlakyCounters {
    async fn follower_count(&self, tag_id: TagId) -> Result<i64> {
        self.check(tag_id)?;
        self.inner.follower_count(tag_id).await
    }

    async fn content_count(&self, tag_id: TagId) -> Result<i64> {
        self.check(tag_id)?;
        self.inner.content_count(tag_id).await
    }

    async fn recent_followers(&self, tag_id: TagId, days: u32, limit: usize)
        -> Result<Vec<UserId>> {
        self.check(tag_id)?;
        self.inner.recent_followers(tag_id, days, limit).await
    }

    async fn recent_content(&self, tag_id: TagId, days: u32, limit: usize)
        -> Result<Vec<ContentId>> {
        self.check(tag_id)?;
        self.inner.recent_content(tag_id, days, limit).await
    }

    async fn followers(&self, tag_id: TagId, limit: usize) -> Result<Vec<UserId>> {
        self.check(tag_id)?;
        self.inner.followers(tag_id, limit).await
    }

    async fn followed_tag_count(&self, user_id: UserId) -> Result<i64> {
        self.inner.followed_tag_count(user_id).await
    }
}

fn seed_tag(
    store: &InMemoryTagStore,
    weight: i32,
    age_days: i64,
    followers: usize,
    content: usize,
) -> TagId {
    let id = Uuid::new_v4();
    store.insert_tag(Tag {
        id,
        name: format!("tag-{id}"),
        weight,
        hotness: 0,
        created_at: Utc::now() - Duration::days(age_days),
        active: true,
    });

    // All counters dated outside the recent window so the activity bonus
    // stays at zero unless a test adds fresh events.
    let old = Utc::now() - Duration::days(30);
    for _ in 0..followers {
        store.record_follow(id, Uuid::new_v4(), old);
    }
    for _ in 0..content {
        store.record_content(id, Uuid::new_v4(), old);
    }

    id
}

fn job_over(store: Arc<InMemoryTagStore>, counters: Arc<dyn CounterSource>) -> HotnessRecomputeJob {
    let scorer = Arc::new(HotnessScorer::new(counters, Default::default()));
    HotnessRecomputeJob::new(store, scorer, JobsConfig::default())
}

#[tokio::test]
async fn test_hourly_pass_scores_catalog() {
    let store = Arc::new(InMemoryTagStore::new());
    let tag_id = seed_tag(&store, 50, 3, 100, 50);

    let job = job_over(store.clone(), store.clone());
    let stats = job.recompute_hourly().await.unwrap();

    assert_eq!(stats.total_tags, 1);
    assert_eq!(stats.updated_tags, 1);
    // base 100*0.6 + 50*0.4 = 80, weight bonus 0.5*80*0.2 = 8
    assert_eq!(store.hotness(tag_id), Some(88));
}

#[tokio::test]
async fn test_one_bad_tag_never_aborts_the_run() {
    let store = Arc::new(InMemoryTagStore::new());
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(seed_tag(&store, 50, 10, 10, 10));
    }
    let bad = ids[2];

    let counters = Arc::new(FlakyCounters {
        inner: store.clone(),
        fail_for: bad,
    });
    let job = job_over(store.clone(), counters);

    let stats = job.recompute_hourly().await.unwrap();

    assert_eq!(stats.total_tags, 5);
    assert_eq!(stats.updated_tags, 4);
    // the failing tag kept its old value
    assert_eq!(store.hotness(bad), Some(0));
    for id in ids.iter().filter(|id| **id != bad) {
        assert!(store.hotness(*id).unwrap() > 0);
    }
}

#[tokio::test]
async fn test_weekly_deep_pass_applies_decay() {
    let store = Arc::new(InMemoryTagStore::new());
    // Old tag: 400 days -> 0.7 multiplier. Followers each follow exactly
    // one tag, so every one is low influence: social = 0.5 * 10 = 5.
    let tag_id = seed_tag(&store, 50, 400, 100, 50);

    let job = job_over(store.clone(), store.clone());
    let stats = job.recompute_deep_weekly().await.unwrap();

    assert_eq!(stats.updated_tags, 1);
    // (80 + 8 + 0 + 5) * 0.7 = 65.1
    assert_eq!(store.hotness(tag_id), Some(65));
}

#[tokio::test]
async fn test_manual_recompute_single_tag() {
    let store = Arc::new(InMemoryTagStore::new());
    let tag_id = seed_tag(&store, 50, 3, 100, 50);
    let job = job_over(store.clone(), store.clone());

    assert_eq!(job.manual_recompute(Some(tag_id)).await.unwrap(), 1);
    assert_eq!(store.hotness(tag_id), Some(88));

    // unknown tag updates nothing
    assert_eq!(job.manual_recompute(Some(Uuid::new_v4())).await.unwrap(), 0);
}

#[tokio::test]
async fn test_manual_recompute_without_id_uses_bulk_path() {
    let store = Arc::new(InMemoryTagStore::new());
    let tag_id = seed_tag(&store, 50, 3, 10, 10);
    seed_tag(&store, 20, 3, 5, 5);
    let job = job_over(store.clone(), store.clone());

    assert_eq!(job.manual_recompute(None).await.unwrap(), 2);
    // bulk path applies the store-side base formula only
    assert_eq!(store.hotness(tag_id), Some(10));
}

#[tokio::test]
async fn test_daily_bulk_recompute() {
    let store = Arc::new(InMemoryTagStore::new());
    seed_tag(&store, 50, 3, 10, 10);
    seed_tag(&store, 50, 3, 20, 0);
    let job = job_over(store.clone(), store.clone());

    assert_eq!(job.recompute_daily().await.unwrap(), 2);
}

#[tokio::test]
async fn test_statistics_summary() {
    let store = Arc::new(InMemoryTagStore::new());
    seed_tag(&store, 50, 3, 100, 50);
    seed_tag(&store, 0, 3, 10, 0);
    let job = job_over(store.clone(), store.clone());

    job.recompute_hourly().await.unwrap();
    let summary = job.statistics_summary().await.unwrap();

    assert_eq!(summary.total_active_tags, 2);
    // hotness values: 88 and 6
    assert!((summary.average_hotness - 47.0).abs() < 1e-9);

    // the summary is what monitoring exports, it must serialize cleanly
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_active_tags"], 2);
}

#[tokio::test]
async fn test_cancelled_run_skips_remaining_tags() {
    let store = Arc::new(InMemoryTagStore::new());
    for _ in 0..4 {
        seed_tag(&store, 50, 3, 10, 10);
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scorer = Arc::new(HotnessScorer::new(store.clone(), Default::default()));
    let job = HotnessRecomputeJob::new(store.clone(), scorer, JobsConfig::default())
        .with_shutdown(shutdown_rx);

    // Cancel before the pass starts: every per-tag unit observes the flag
    // and skips, but the run still completes with stats.
    shutdown_tx.send(true).unwrap();
    let stats = job.recompute_hourly().await.unwrap();

    assert_eq!(stats.total_tags, 4);
    assert_eq!(stats.updated_tags, 0);
}

#[tokio::test]
async fn test_scheduler_lifecycle() {
    let store = Arc::new(InMemoryTagStore::new());
    let tag_id = seed_tag(&store, 50, 3, 10, 10);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scorer = Arc::new(HotnessScorer::new(store.clone(), Default::default()));
    let job = Arc::new(
        HotnessRecomputeJob::new(store.clone(), scorer, JobsConfig::default())
            .with_shutdown(shutdown_rx),
    );

    let mut scheduler = RecomputeScheduler::new(job, JobsConfig::default(), shutdown_tx);
    scheduler.start();

    // No cadence fires within this window (hourly is the shortest), the
    // loops must still drain promptly on shutdown.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    scheduler.shutdown().await;

    assert_eq!(store.hotness(tag_id), Some(0));
}

#[test]
fn test_config_loads_with_defaults() {
    let config = Config::from_env().unwrap();
    assert_eq!(config.jobs.hourly_interval_secs, 3600);
    assert_eq!(config.scoring.recent_query_limit, 100);
}
