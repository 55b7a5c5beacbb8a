// ============================================
// Hotness Scorer
// ============================================
//
// Combines the base popularity signals with the weight bonus, activity
// bonus and (deep pass) time decay + social effect into one integer score.
//
// Failure domains:
// - follower/content count reads failing fail the tag (the job's per-tag
//   boundary catches it and counts the tag as not updated)
// - recent-activity and social fetches degrade their term to 0 instead
// Every counter-source call carries an independent timeout.

use crate::config::ScoringConfig;
use crate::error::{AppError, Result};
use crate::models::{CounterSnapshot, HotnessResult, ScoringMode, Tag, TagId};
use crate::services::scoring::{tag_age_days, ActivityBonus, SocialEffect, TimeDecayCurve};
use crate::services::store::CounterSource;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Configurable term weights for the hotness formula.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub follower: f64,
    pub content: f64,
    /// Fraction of the base score granted at weight 100.
    pub weight_bonus_factor: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            follower: 0.6,
            content: 0.4,
            weight_bonus_factor: 0.2,
        }
    }
}

pub struct HotnessScorer {
    counters: Arc<dyn CounterSource>,
    weights: ScoreWeights,
    decay: TimeDecayCurve,
    activity: ActivityBonus,
    social: SocialEffect,
    config: ScoringConfig,
}

impl HotnessScorer {
    pub fn new(counters: Arc<dyn CounterSource>, config: ScoringConfig) -> Self {
        Self {
            counters,
            weights: ScoreWeights::default(),
            decay: TimeDecayCurve::default(),
            activity: ActivityBonus::default(),
            social: SocialEffect::default(),
            config,
        }
    }

    /// Override the term weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Fetch counters and score the tag in the given mode.
    pub async fn score(&self, tag: &Tag, mode: ScoringMode) -> Result<HotnessResult> {
        let snapshot = self.snapshot(tag.id, mode).await?;
        let result = self.compute(tag, &snapshot, mode, Utc::now());

        debug!(
            tag_id = %tag.id,
            mode = mode.as_str(),
            base = result.base,
            weight_bonus = result.weight_bonus,
            activity_bonus = result.activity_bonus,
            time_decay = result.time_decay,
            social_effect = result.social_effect,
            hotness = result.hotness,
            "Hotness computed"
        );

        Ok(result)
    }

    /// Pure scoring over an already-gathered snapshot. Identical inputs
    /// always produce identical output; time only enters through `now`.
    pub fn compute(
        &self,
        tag: &Tag,
        snapshot: &CounterSnapshot,
        mode: ScoringMode,
        now: DateTime<Utc>,
    ) -> HotnessResult {
        let followers = snapshot.follower_count.max(0) as f64;
        let content = snapshot.content_count.max(0) as f64;

        let base = followers * self.weights.follower + content * self.weights.content;
        let weight_bonus =
            f64::from(tag.weight.clamp(0, 100)) / 100.0 * base * self.weights.weight_bonus_factor;
        let activity_bonus = self
            .activity
            .bonus(snapshot.recent_follower_count, snapshot.recent_content_count);

        let (time_decay, social_effect) = match mode {
            ScoringMode::Fast => (1.0, 0.0),
            ScoringMode::Deep => (
                self.decay.multiplier(tag_age_days(tag.created_at, now)),
                self.social.effect(&snapshot.follower_tag_counts),
            ),
        };

        let raw = (base + weight_bonus + activity_bonus + social_effect) * time_decay;
        let hotness = raw.max(0.0).round() as u64;

        HotnessResult {
            hotness,
            base,
            weight_bonus,
            activity_bonus,
            time_decay,
            social_effect,
        }
    }

    /// Gather a fresh snapshot for one tag. Base counts propagate errors;
    /// the activity and social inputs degrade to empty on failure.
    async fn snapshot(&self, tag_id: TagId, mode: ScoringMode) -> Result<CounterSnapshot> {
        let follower_count = self.call(self.counters.follower_count(tag_id)).await?;
        let content_count = self.call(self.counters.content_count(tag_id)).await?;

        let (recent_follower_count, recent_content_count) = self.recent_activity(tag_id).await;

        let follower_tag_counts = match mode {
            ScoringMode::Fast => Vec::new(),
            ScoringMode::Deep => self.follower_tag_counts(tag_id).await,
        };

        Ok(CounterSnapshot {
            follower_count,
            content_count,
            recent_follower_count,
            recent_content_count,
            follower_tag_counts,
        })
    }

    async fn recent_activity(&self, tag_id: TagId) -> (i64, i64) {
        match self.try_recent_activity(tag_id).await {
            Ok(counts) => counts,
            Err(e) => {
                warn!(tag_id = %tag_id, error = %e, "Recent activity query failed, bonus degraded to 0");
                (0, 0)
            }
        }
    }

    async fn try_recent_activity(&self, tag_id: TagId) -> Result<(i64, i64)> {
        let days = self.config.recent_window_days;
        let limit = self.config.recent_query_limit;

        let followers = self
            .call(self.counters.recent_followers(tag_id, days, limit))
            .await?;
        let content = self
            .call(self.counters.recent_content(tag_id, days, limit))
            .await?;

        Ok((followers.len() as i64, content.len() as i64))
    }

    async fn follower_tag_counts(&self, tag_id: TagId) -> Vec<i64> {
        match self.try_follower_tag_counts(tag_id).await {
            Ok(counts) => counts,
            Err(e) => {
                warn!(tag_id = %tag_id, error = %e, "Follower sample query failed, social effect degraded to 0");
                Vec::new()
            }
        }
    }

    async fn try_follower_tag_counts(&self, tag_id: TagId) -> Result<Vec<i64>> {
        let followers = self
            .call(self.counters.followers(tag_id, self.config.follower_query_limit))
            .await?;

        let mut counts = Vec::with_capacity(followers.len());
        for user_id in followers {
            counts.push(self.call(self.counters.followed_tag_count(user_id)).await?);
        }

        Ok(counts)
    }

    async fn call<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match timeout(Duration::from_millis(self.config.call_timeout_ms), fut).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(self.config.call_timeout_ms)),
        }
    }
}
