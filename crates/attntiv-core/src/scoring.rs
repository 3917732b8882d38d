//! Round scoring.
//!
//! `score = trunc(base(kind) × multiplier(tier) × accuracy) + trunc(time_bonus_secs × 10)`
//!
//! Callers pass `accuracy` in `[0, 1]` and a non-negative time bonus. Values
//! outside that contract produce out-of-range scores; nothing here clamps.

use serde::{Deserialize, Serialize};

use crate::model::{DifficultyTier, ExerciseKind};

/// Points credited per second of time bonus.
pub const TIME_BONUS_POINTS_PER_SEC: f64 = 10.0;

/// A score split into its two components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Accuracy-weighted base score.
    pub base: i64,
    /// Points from the time bonus.
    pub time_bonus: i64,
    /// `base + time_bonus`.
    pub total: i64,
}

/// Compute a score and keep its components.
pub fn score_breakdown(
    kind: ExerciseKind,
    tier: DifficultyTier,
    accuracy: f64,
    time_bonus_secs: f64,
) -> ScoreBreakdown {
    // `as` truncates toward zero and saturates, so NaN or huge inputs cannot panic.
    let base = (kind.base_score() as f64 * tier.multiplier() * accuracy) as i64;
    let time_bonus = (time_bonus_secs * TIME_BONUS_POINTS_PER_SEC) as i64;
    ScoreBreakdown {
        base,
        time_bonus,
        total: base.saturating_add(time_bonus),
    }
}

/// Score for one round.
pub fn calculate_score(
    kind: ExerciseKind,
    tier: DifficultyTier,
    accuracy: f64,
    time_bonus_secs: f64,
) -> i64 {
    score_breakdown(kind, tier, accuracy, time_bonus_secs).total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_memory_beginner() {
        assert_eq!(
            calculate_score(ExerciseKind::Memory, DifficultyTier::Beginner, 1.0, 0.0),
            100
        );
    }

    #[test]
    fn perfect_problem_solving_advanced() {
        assert_eq!(
            calculate_score(ExerciseKind::ProblemSolving, DifficultyTier::Advanced, 1.0, 0.0),
            400
        );
    }

    #[test]
    fn half_focus_intermediate_with_bonus() {
        // 150 × 1.5 × 0.5 = 112.5 → 112, plus 2.5s × 10 = 25.
        let b = score_breakdown(ExerciseKind::Focus, DifficultyTier::Intermediate, 0.5, 2.5);
        assert_eq!(b.base, 112);
        assert_eq!(b.time_bonus, 25);
        assert_eq!(b.total, 137);
    }

    #[test]
    fn fractional_bonus_truncates() {
        assert_eq!(
            calculate_score(ExerciseKind::SpeedProcessing, DifficultyTier::Beginner, 0.0, 1.99),
            19
        );
    }

    #[test]
    fn zero_accuracy_scores_only_bonus() {
        for kind in ExerciseKind::ALL {
            for tier in DifficultyTier::ALL {
                assert_eq!(calculate_score(kind, tier, 0.0, 0.0), 0);
                assert_eq!(calculate_score(kind, tier, 0.0, 3.0), 30);
            }
        }
    }

    #[test]
    fn full_table_at_perfect_accuracy() {
        for kind in ExerciseKind::ALL {
            for tier in DifficultyTier::ALL {
                let expected = (kind.base_score() as f64 * tier.multiplier()) as i64;
                assert_eq!(calculate_score(kind, tier, 1.0, 0.0), expected);
            }
        }
        assert_eq!(
            calculate_score(ExerciseKind::PatternRecognition, DifficultyTier::Intermediate, 1.0, 0.0),
            262
        );
    }

    #[test]
    fn out_of_range_accuracy_does_not_panic() {
        let over = calculate_score(ExerciseKind::Memory, DifficultyTier::Beginner, 1.5, 0.0);
        assert_eq!(over, 150);
        let nan = calculate_score(ExerciseKind::Memory, DifficultyTier::Beginner, f64::NAN, 0.0);
        assert_eq!(nan, 0);
    }
}
