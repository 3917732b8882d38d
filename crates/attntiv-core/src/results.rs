//! Completed-round records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{DifficultyTier, ExerciseKind};

/// One completed round, as handed to a persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: Uuid,
    pub kind: ExerciseKind,
    /// Tier the round was played at.
    pub tier: DifficultyTier,
    pub score: i64,
    /// Correct answers in the round.
    pub correct: u32,
    /// Answers given in the round.
    pub total: u32,
    pub accuracy: f64,
    pub completed_at: DateTime<Utc>,
}

impl ExerciseRecord {
    /// Build a record stamped with a fresh id and the current time.
    pub fn new(
        kind: ExerciseKind,
        tier: DifficultyTier,
        score: i64,
        correct: u32,
        total: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            tier,
            score,
            correct,
            total,
            accuracy: accuracy(correct, total),
            completed_at: Utc::now(),
        }
    }

    /// Same record with a different completion time.
    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.completed_at = at;
        self
    }
}

/// `correct / total`, or 0 when nothing was answered.
pub fn accuracy(correct: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_handles_empty_rounds() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(3, 4), 0.75);
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = ExerciseRecord::new(ExerciseKind::Focus, DifficultyTier::Intermediate, 137, 9, 18);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"focus\""));
        let back: ExerciseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.accuracy, 0.5);
    }
}
