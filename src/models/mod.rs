use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TagId = Uuid;
pub type UserId = Uuid;
pub type ContentId = Uuid;

/// Tag catalog entry. The catalog itself is owned by the surrounding
/// platform; this engine only reads `weight`/`created_at` and writes
/// `hotness`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    /// Operator-set importance multiplier, 0-100.
    pub weight: i32,
    /// Engine output, always >= 0.
    pub hotness: u64,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// Raw counters gathered for one tag, built fresh per run and discarded
/// after scoring. Counts are signed so a misbehaving collaborator returning
/// negatives is observable (and clamped during scoring).
#[derive(Debug, Clone, Default)]
pub struct CounterSnapshot {
    pub follower_count: i64,
    pub content_count: i64,
    /// Distinct followers gained in the trailing window (capped by the
    /// query limit).
    pub recent_follower_count: i64,
    /// Content items tagged in the trailing window (capped by the query
    /// limit).
    pub recent_content_count: i64,
    /// Deep pass only: each sampled follower's own followed-tag count.
    pub follower_tag_counts: Vec<i64>,
}

/// Final score plus the sub-component breakdown, kept for logging and
/// debuggability only.
#[derive(Debug, Clone, Serialize)]
pub struct HotnessResult {
    pub hotness: u64,
    pub base: f64,
    pub weight_bonus: f64,
    pub activity_bonus: f64,
    pub time_decay: f64,
    pub social_effect: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Hourly pass: base + weight bonus + activity bonus.
    Fast,
    /// Weekly pass: additionally applies time decay and social effect.
    Deep,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Fast => "fast",
            ScoringMode::Deep => "deep",
        }
    }
}

/// Aggregate counters for one recompute pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecomputeStats {
    pub total_tags: u32,
    pub updated_tags: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_ms: u64,
}

/// Catalog-level observability snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub total_active_tags: u64,
    pub average_hotness: f64,
}
