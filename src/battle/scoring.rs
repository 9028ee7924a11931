use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::gateway::ProfileRecord;

/// Priority constants for score calculators.
/// Lower values run first. Later calculators receive the running score
/// produced by earlier ones.
pub mod calculator_priority {
    /// Base score from activity counters
    pub const BASE_SCORE: u32 = 100;
    /// Adjustments applied on top of the base score
    pub const BONUS: u32 = 200;
}

/// One stage of the scoring pipeline.
///
/// Implementations must be pure and monotonic: raising any counter of the
/// profile, or raising `current_score`, never lowers the returned value.
pub trait ScoreCalculator: Send + Sync {
    fn calculate(&self, profile: &ProfileRecord, current_score: u64) -> u64;

    fn priority(&self) -> u32;
}

/// Per-counter multipliers for the base score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
    pub stargazers: u64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            followers: 1,
            following: 0,
            public_repos: 0,
            stargazers: 1,
        }
    }
}

/// Adds the weighted sum of the profile's counters to the running score
pub struct WeightedCounterCalculator {
    weights: ScoreWeights,
}

impl Default for WeightedCounterCalculator {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

impl WeightedCounterCalculator {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }
}

impl ScoreCalculator for WeightedCounterCalculator {
    fn calculate(&self, profile: &ProfileRecord, current_score: u64) -> u64 {
        let counters = &profile.counters;
        [
            (counters.followers, self.weights.followers),
            (counters.following, self.weights.following),
            (counters.public_repos, self.weights.public_repos),
            (counters.stargazers, self.weights.stargazers),
        ]
        .iter()
        .fold(current_score, |total, (count, weight)| {
            total.saturating_add(count.saturating_mul(*weight))
        })
    }

    fn priority(&self) -> u32 {
        calculator_priority::BASE_SCORE
    }
}

/// Ordered pipeline of score calculators
#[derive(Clone)]
pub struct Scorer {
    calculators: Vec<Arc<dyn ScoreCalculator>>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::with_weights(ScoreWeights::default())
    }
}

impl Scorer {
    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self {
            calculators: vec![Arc::new(WeightedCounterCalculator::new(weights))],
        }
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn ScoreCalculator>) -> Self {
        self.calculators.push(calculator);
        self.calculators.sort_by_key(|c| c.priority());
        self
    }

    pub fn compute_score(&self, profile: &ProfileRecord) -> u64 {
        self.calculators
            .iter()
            .fold(0, |score, calculator| calculator.calculate(profile, score))
    }
}

/// Scores a profile with the default weights
pub fn compute_score(profile: &ProfileRecord) -> u64 {
    Scorer::default().compute_score(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ActivityCounters;
    use rstest::rstest;

    fn profile(counters: ActivityCounters) -> ProfileRecord {
        ProfileRecord::new("player").with_counters(counters)
    }

    struct DoubleCalculator;

    impl ScoreCalculator for DoubleCalculator {
        fn calculate(&self, _profile: &ProfileRecord, current_score: u64) -> u64 {
            current_score.saturating_mul(2)
        }

        fn priority(&self) -> u32 {
            calculator_priority::BONUS
        }
    }

    struct FlatBonusCalculator;

    impl ScoreCalculator for FlatBonusCalculator {
        fn calculate(&self, _profile: &ProfileRecord, current_score: u64) -> u64 {
            current_score + 5
        }

        fn priority(&self) -> u32 {
            calculator_priority::BONUS + 100
        }
    }

    #[test]
    fn followers_only_profile_scores_follower_count() {
        let score = compute_score(&ProfileRecord::new("alice").with_followers(100));
        assert_eq!(score, 100);
    }

    #[test]
    fn empty_profile_scores_zero() {
        assert_eq!(compute_score(&ProfileRecord::new("nobody")), 0);
    }

    #[test]
    fn default_weights_add_followers_and_stars() {
        let score = compute_score(&profile(ActivityCounters {
            followers: 10,
            following: 400,
            public_repos: 30,
            stargazers: 25,
        }));
        assert_eq!(score, 35);
    }

    #[test]
    fn custom_weights_apply_to_each_counter() {
        let scorer = Scorer::with_weights(ScoreWeights {
            followers: 3,
            following: 1,
            public_repos: 2,
            stargazers: 1,
        });
        let score = scorer.compute_score(&profile(ActivityCounters {
            followers: 10,
            following: 4,
            public_repos: 5,
            stargazers: 7,
        }));
        assert_eq!(score, 30 + 4 + 10 + 7);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let score = compute_score(&profile(ActivityCounters {
            followers: u64::MAX,
            stargazers: u64::MAX,
            ..ActivityCounters::default()
        }));
        assert_eq!(score, u64::MAX);
    }

    #[test]
    fn calculators_run_in_priority_order() {
        // Added out of order on purpose: the flat bonus must still run last.
        let scorer = Scorer::default()
            .with_calculator(Arc::new(FlatBonusCalculator))
            .with_calculator(Arc::new(DoubleCalculator));

        let score = scorer.compute_score(&ProfileRecord::new("bob").with_followers(10));
        assert_eq!(score, 25);
    }

    #[rstest]
    #[case::followers(|c: &mut ActivityCounters| c.followers += 1)]
    #[case::following(|c: &mut ActivityCounters| c.following += 1)]
    #[case::public_repos(|c: &mut ActivityCounters| c.public_repos += 1)]
    #[case::stargazers(|c: &mut ActivityCounters| c.stargazers += 1)]
    fn raising_any_counter_never_lowers_score(#[case] bump: fn(&mut ActivityCounters)) {
        let weight_sets = [
            ScoreWeights::default(),
            ScoreWeights {
                followers: 3,
                following: 1,
                public_repos: 2,
                stargazers: 1,
            },
        ];

        for weights in weight_sets {
            let scorer = Scorer::with_weights(weights).with_calculator(Arc::new(DoubleCalculator));
            for base in [0u64, 1, 17, 1_000] {
                let before = ActivityCounters {
                    followers: base,
                    following: base / 2,
                    public_repos: base / 3,
                    stargazers: base * 2,
                };
                let mut after = before;
                bump(&mut after);

                assert!(
                    scorer.compute_score(&profile(after)) >= scorer.compute_score(&profile(before)),
                    "score decreased for weights {:?} at base {}",
                    weights,
                    base
                );
            }
        }
    }
}
