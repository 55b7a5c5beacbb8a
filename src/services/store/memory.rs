// ============================================
// In-Memory Tag Store
// ============================================
//
// DashMap-backed implementation of both collaborator traits. Stands in for
// the platform's relational store when this service runs standalone, and
// gives tests a deterministic catalog to score against.

use crate::error::Result;
use crate::models::{ContentId, Tag, TagId, UserId};
use crate::services::store::{CounterSource, ScoreStore};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

#[derive(Default)]
pub struct InMemoryTagStore {
    tags: DashMap<TagId, Tag>,
    follow_events: DashMap<TagId, Vec<(UserId, DateTime<Utc>)>>,
    content_events: DashMap<TagId, Vec<(ContentId, DateTime<Utc>)>>,
    followed_tag_counts: DashMap<UserId, i64>,
}

impl InMemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tag(&self, tag: Tag) {
        self.tags.insert(tag.id, tag);
    }

    pub fn record_follow(&self, tag_id: TagId, user_id: UserId, at: DateTime<Utc>) {
        self.follow_events
            .entry(tag_id)
            .or_default()
            .push((user_id, at));
        *self.followed_tag_counts.entry(user_id).or_insert(0) += 1;
    }

    pub fn record_content(&self, tag_id: TagId, content_id: ContentId, at: DateTime<Utc>) {
        self.content_events
            .entry(tag_id)
            .or_default()
            .push((content_id, at));
    }

    pub fn hotness(&self, tag_id: TagId) -> Option<u64> {
        self.tags.get(&tag_id).map(|tag| tag.hotness)
    }
}

#[async_trait]
impl CounterSource for InMemoryTagStore {
    async fn follower_count(&self, tag_id: TagId) -> Result<i64> {
        Ok(self
            .follow_events
            .get(&tag_id)
            .map(|events| events.len() as i64)
            .unwrap_or(0))
    }

    async fn content_count(&self, tag_id: TagId) -> Result<i64> {
        Ok(self
            .content_events
            .get(&tag_id)
            .map(|events| events.len() as i64)
            .unwrap_or(0))
    }

    async fn recent_followers(
        &self,
        tag_id: TagId,
        days: u32,
        limit: usize,
    ) -> Result<Vec<UserId>> {
        let cutoff = Utc::now() - Duration::days(i64::from(days));
        Ok(self
            .follow_events
            .get(&tag_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|(_, at)| *at >= cutoff)
                    .map(|(user_id, _)| *user_id)
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn recent_content(
        &self,
        tag_id: TagId,
        days: u32,
        limit: usize,
    ) -> Result<Vec<ContentId>> {
        let cutoff = Utc::now() - Duration::days(i64::from(days));
        Ok(self
            .content_events
            .get(&tag_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|(_, at)| *at >= cutoff)
                    .map(|(content_id, _)| *content_id)
                    .take(limit)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn followers(&self, tag_id: TagId, limit: usize) -> Result<Vec<UserId>> {
        Ok(self
            .follow_events
            .get(&tag_id)
            .map(|events| events.iter().map(|(user_id, _)| *user_id).take(limit).collect())
            .unwrap_or_default())
    }

    async fn followed_tag_count(&self, user_id: UserId) -> Result<i64> {
        Ok(self
            .followed_tag_counts
            .get(&user_id)
            .map(|count| *count)
            .unwrap_or(0))
    }
}

#[async_trait]
impl ScoreStore for InMemoryTagStore {
    async fn write_hotness(&self, tag_id: TagId, hotness: u64) -> Result<bool> {
        match self.tags.get_mut(&tag_id) {
            Some(mut tag) => {
                tag.hotness = hotness;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_active_tags(&self) -> Result<Vec<Tag>> {
        Ok(self
            .tags
            .iter()
            .filter(|entry| entry.value().active)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn get_tag(&self, tag_id: TagId) -> Result<Option<Tag>> {
        Ok(self.tags.get(&tag_id).map(|tag| tag.value().clone()))
    }

    async fn recompute_all(&self) -> Result<u64> {
        // Store-side bulk path: base formula only, mirroring what the
        // platform's SQL procedure does for the daily cadence.
        let mut updated = 0u64;
        for mut entry in self.tags.iter_mut() {
            if !entry.value().active {
                continue;
            }
            let id = *entry.key();
            let followers = self
                .follow_events
                .get(&id)
                .map(|events| events.len() as f64)
                .unwrap_or(0.0);
            let content = self
                .content_events
                .get(&id)
                .map(|events| events.len() as f64)
                .unwrap_or(0.0);
            entry.value_mut().hotness = (followers * 0.6 + content * 0.4).round() as u64;
            updated += 1;
        }
        Ok(updated)
    }

    async fn average_hotness(&self) -> Result<f64> {
        let (sum, count) = self
            .tags
            .iter()
            .filter(|entry| entry.value().active)
            .fold((0u64, 0u64), |(sum, count), entry| {
                (sum + entry.value().hotness, count + 1)
            });

        if count == 0 {
            Ok(0.0)
        } else {
            Ok(sum as f64 / count as f64)
        }
    }

    async fn active_tag_count(&self) -> Result<u64> {
        Ok(self
            .tags
            .iter()
            .filter(|entry| entry.value().active)
            .count() as u64)
    }
}
