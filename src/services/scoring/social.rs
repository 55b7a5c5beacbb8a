/// Social Effect (deep pass only)
///
/// Score contribution from the "quality" of a tag's follower base: a
/// follower who follows many tags is treated as a stronger signal than one
/// who follows few. Works over a sampled follower set, not the full graph.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialEffect {
    /// Followed-tag count above which a follower is high influence.
    pub high_tier_threshold: i64,
    /// Followed-tag count at or above which a follower is mid influence.
    pub mid_tier_threshold: i64,
    pub high_influence: f64,
    pub mid_influence: f64,
    pub low_influence: f64,
    pub multiplier: f64,
    pub max_effect: f64,
}

impl Default for SocialEffect {
    fn default() -> Self {
        Self {
            high_tier_threshold: 5,
            mid_tier_threshold: 3,
            high_influence: 1.5,
            mid_influence: 1.0,
            low_influence: 0.5,
            multiplier: 10.0,
            max_effect: 50.0,
        }
    }
}

impl SocialEffect {
    /// Bounded effect from the sampled followers' own followed-tag counts.
    /// An empty sample contributes nothing.
    pub fn effect(&self, follower_tag_counts: &[i64]) -> f64 {
        if follower_tag_counts.is_empty() {
            return 0.0;
        }

        let total: f64 = follower_tag_counts
            .iter()
            .map(|&count| self.influence(count))
            .sum();
        let average = total / follower_tag_counts.len() as f64;

        (average * self.multiplier).min(self.max_effect)
    }

    fn influence(&self, followed_tag_count: i64) -> f64 {
        if followed_tag_count > self.high_tier_threshold {
            self.high_influence
        } else if followed_tag_count >= self.mid_tier_threshold {
            self.mid_influence
        } else {
            self.low_influence
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_followers_zero_effect() {
        let calc = SocialEffect::default();
        assert_eq!(calc.effect(&[]), 0.0);
    }

    #[test]
    fn test_influence_tiers() {
        let calc = SocialEffect::default();

        // all high influence: avg 1.5 * 10
        assert!((calc.effect(&[6, 10, 100]) - 15.0).abs() < 1e-9);
        // all mid influence
        assert!((calc.effect(&[3, 4, 5]) - 10.0).abs() < 1e-9);
        // all low influence (negative counts land here too)
        assert!((calc.effect(&[0, 1, 2, -7]) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_tiers_average() {
        let calc = SocialEffect::default();
        // (1.5 + 1.0 + 0.5) / 3 * 10
        assert!((calc.effect(&[8, 4, 0]) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_always_in_range() {
        let calc = SocialEffect::default();

        let samples: Vec<Vec<i64>> = vec![
            vec![],
            vec![0],
            vec![100; 100],
            vec![-5, 3, 7, 2],
            (0..100).collect(),
        ];
        for counts in samples {
            let effect = calc.effect(&counts);
            assert!((0.0..=50.0).contains(&effect));
        }
    }
}
