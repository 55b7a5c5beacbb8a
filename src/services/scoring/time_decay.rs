/// Time Decay Curve
///
/// Piecewise-constant multiplier over tag age brackets. Fresh tags get a
/// boost, old tags are discounted. Total function: every age maps to a
/// multiplier in [0.7, 1.2].
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeDecayCurve {
    /// 0-7 days
    pub fresh: f64,
    /// 8-30 days
    pub steady: f64,
    /// 31-90 days
    pub cooling: f64,
    /// 91-365 days
    pub mature: f64,
    /// older than a year
    pub archive: f64,
}

impl Default for TimeDecayCurve {
    fn default() -> Self {
        Self {
            fresh: 1.2,
            steady: 1.0,
            cooling: 0.9,
            mature: 0.8,
            archive: 0.7,
        }
    }
}

impl TimeDecayCurve {
    /// Multiplier for a tag of the given age. Negative ages (clock skew,
    /// bad data) are treated as brand new.
    pub fn multiplier(&self, age_days: i64) -> f64 {
        match age_days.max(0) {
            0..=7 => self.fresh,
            8..=30 => self.steady,
            31..=90 => self.cooling,
            91..=365 => self.mature,
            _ => self.archive,
        }
    }
}

/// Tag age in whole days, clamped >= 0.
pub fn tag_age_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).num_days().max(0)
}
