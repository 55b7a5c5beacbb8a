// ============================================
// Collaborator Contracts
// ============================================
//
// The engine owns no storage of its own. Raw counters and the tag catalog
// live in the surrounding platform and are reached through these two narrow
// traits, so tests can substitute deterministic (or failing) doubles.

use crate::error::Result;
use crate::models::{ContentId, Tag, TagId, UserId};
use async_trait::async_trait;

pub mod memory;

pub use memory::InMemoryTagStore;

/// Read-only query interface over the platform's raw counters.
#[async_trait]
pub trait CounterSource: Send + Sync {
    async fn follower_count(&self, tag_id: TagId) -> Result<i64>;

    async fn content_count(&self, tag_id: TagId) -> Result<i64>;

    /// Distinct followers gained within the trailing `days` window, capped
    /// at `limit`.
    async fn recent_followers(&self, tag_id: TagId, days: u32, limit: usize)
        -> Result<Vec<UserId>>;

    /// Content items tagged within the trailing `days` window, capped at
    /// `limit`.
    async fn recent_content(&self, tag_id: TagId, days: u32, limit: usize)
        -> Result<Vec<ContentId>>;

    /// A sample of the tag's followers, capped at `limit`.
    async fn followers(&self, tag_id: TagId, limit: usize) -> Result<Vec<UserId>>;

    /// How many tags the given user follows.
    async fn followed_tag_count(&self, user_id: UserId) -> Result<i64>;
}

/// Tag catalog access and hotness persistence.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Persist a computed hotness value. Returns false when the tag no
    /// longer exists.
    async fn write_hotness(&self, tag_id: TagId, hotness: u64) -> Result<bool>;

    async fn list_active_tags(&self) -> Result<Vec<Tag>>;

    async fn get_tag(&self, tag_id: TagId) -> Result<Option<Tag>>;

    /// The store's own bulk recompute path (opaque to this engine); used by
    /// the daily cadence and the bulk manual trigger. Returns the number of
    /// tags it touched.
    async fn recompute_all(&self) -> Result<u64>;

    async fn average_hotness(&self) -> Result<f64>;

    async fn active_tag_count(&self) -> Result<u64>;
}
