//! End-of-round result classification

use serde::Serialize;

use crate::consts::{HIGH_TIER_SCORE, MEDIUM_TIER_SCORE};
use crate::sim::Outcome;

/// Message bucket for the result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultTier {
    /// Reached the target
    Top,
    High,
    Medium,
    Low,
}

impl ResultTier {
    pub fn classify(outcome: Outcome, score: u32) -> Self {
        match outcome {
            Outcome::Won => ResultTier::Top,
            Outcome::TimedOut if score >= HIGH_TIER_SCORE => ResultTier::High,
            Outcome::TimedOut if score >= MEDIUM_TIER_SCORE => ResultTier::Medium,
            Outcome::TimedOut => ResultTier::Low,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResultTier::Top => "Amazing! You caught all my hearts!",
            ResultTier::High => "💖 Great job! 💖",
            ResultTier::Medium => "💕 Nice try! 💕",
            ResultTier::Low => "💗 You tried! 💗",
        }
    }

    pub fn detail(&self, score: u32) -> String {
        match self {
            ResultTier::Top => format!(
                "You collected {} hearts! You're clearly a pro at catching hearts!",
                score
            ),
            ResultTier::High => {
                format!("You caught {} hearts! You're pretty good at this! 😊", score)
            }
            ResultTier::Medium => format!(
                "You caught {} hearts. Not bad for a first attempt! 😄",
                score
            ),
            ResultTier::Low => format!(
                "You caught {} hearts. But hey, what matters is you tried! 🥰",
                score
            ),
        }
    }
}

/// What the result sink receives when a round ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub score: u32,
    pub tier: ResultTier,
    pub title: &'static str,
    pub detail: String,
}

impl GameResult {
    pub fn new(outcome: Outcome, score: u32) -> Self {
        let tier = ResultTier::classify(outcome, score);
        Self {
            outcome,
            score,
            tier,
            title: tier.title(),
            detail: tier.detail(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(ResultTier::classify(Outcome::Won, 15), ResultTier::Top);
        assert_eq!(ResultTier::classify(Outcome::TimedOut, 12), ResultTier::High);
        assert_eq!(ResultTier::classify(Outcome::TimedOut, 10), ResultTier::High);
        assert_eq!(ResultTier::classify(Outcome::TimedOut, 7), ResultTier::Medium);
        assert_eq!(ResultTier::classify(Outcome::TimedOut, 5), ResultTier::Medium);
        assert_eq!(ResultTier::classify(Outcome::TimedOut, 2), ResultTier::Low);
        assert_eq!(ResultTier::classify(Outcome::TimedOut, 0), ResultTier::Low);
    }

    #[test]
    fn test_detail_interpolates_score() {
        let result = GameResult::new(Outcome::TimedOut, 7);
        assert_eq!(result.tier, ResultTier::Medium);
        assert_eq!(result.title, "💕 Nice try! 💕");
        assert!(result.detail.contains("7 hearts"));

        let result = GameResult::new(Outcome::Won, 15);
        assert_eq!(result.title, "Amazing! You caught all my hearts!");
        assert!(result.detail.contains("15 hearts"));
    }
}
