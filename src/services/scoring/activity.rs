/// Activity Bonus
///
/// Score contribution from follower/content growth in the trailing window.
/// Inputs are counts of id-lists fetched with a hard query limit, so very
/// popular tags are deliberately undercounted to bound query cost.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityBonus {
    pub follower_weight: f64,
    pub content_weight: f64,
    pub max_bonus: f64,
}

impl Default for ActivityBonus {
    fn default() -> Self {
        Self {
            follower_weight: 2.0,
            content_weight: 1.5,
            max_bonus: 100.0,
        }
    }
}

impl ActivityBonus {
    /// Bounded bonus from recent counts. Negative counts from a
    /// misbehaving collaborator clamp to zero.
    pub fn bonus(&self, recent_followers: i64, recent_content: i64) -> f64 {
        let followers = recent_followers.max(0) as f64;
        let content = recent_content.max(0) as f64;

        (followers * self.follower_weight + content * self.content_weight).min(self.max_bonus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_activity_no_bonus() {
        let calc = ActivityBonus::default();
        assert_eq!(calc.bonus(0, 0), 0.0);
    }

    #[test]
    fn test_formula() {
        let calc = ActivityBonus::default();
        // 2 followers * 2.0 + 4 items * 1.5
        assert!((calc.bonus(2, 4) - 10.0).abs() < f64::EPSILON);
        assert!((calc.bonus(10, 0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_capped_at_max() {
        let calc = ActivityBonus::default();
        assert_eq!(calc.bonus(100, 100), 100.0);
        assert_eq!(calc.bonus(i64::MAX, i64::MAX), 100.0);
    }

    #[test]
    fn test_negative_counts_clamp() {
        let calc = ActivityBonus::default();
        assert_eq!(calc.bonus(-50, -3), 0.0);
        assert!((calc.bonus(-50, 4) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_always_in_range() {
        let calc = ActivityBonus::default();
        for followers in 0..=100 {
            for content in 0..=100 {
                let bonus = calc.bonus(followers, content);
                assert!((0.0..=100.0).contains(&bonus));
            }
        }
    }
}
