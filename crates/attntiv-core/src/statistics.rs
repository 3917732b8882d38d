//! Progress statistics across completed rounds.
//!
//! Feeds the points/streak board: lifetime points, per-mode breakdowns, the
//! run of consecutive active days, and which achievements are unlocked.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::achievements::{Achievement, Rank};
use crate::model::{DifficultyTier, ExerciseKind};
use crate::results::ExerciseRecord;

/// Aggregate progress for a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_points: i64,
    pub rounds: usize,
    pub per_kind: BTreeMap<ExerciseKind, KindStats>,
    /// Consecutive active days ending at the most recent one.
    pub day_streak: u32,
    pub achievements: Vec<Achievement>,
}

impl ProgressStats {
    pub fn rank(&self) -> Rank {
        Rank::for_points(self.total_points)
    }

    /// Points still needed for the next rank, or `None` at the top.
    pub fn points_to_next_rank(&self) -> Option<i64> {
        self.rank()
            .next()
            .map(|next| next.min_points() - self.total_points)
    }
}

/// Statistics for one game mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindStats {
    pub rounds: usize,
    pub points: i64,
    pub avg_accuracy: f64,
    /// Hardest tier a round was played at.
    pub best_tier: DifficultyTier,
}

/// Compute progress from every completed round.
pub fn compute_progress(records: &[ExerciseRecord]) -> ProgressStats {
    let mut grouped: BTreeMap<ExerciseKind, Vec<&ExerciseRecord>> = BTreeMap::new();
    for r in records {
        grouped.entry(r.kind).or_default().push(r);
    }

    let per_kind = grouped
        .into_iter()
        .map(|(kind, group)| {
            let rounds = group.len();
            let points = group.iter().map(|r| r.score).sum();
            let avg_accuracy =
                group.iter().map(|r| r.accuracy).sum::<f64>() / rounds.max(1) as f64;
            let best_tier = group
                .iter()
                .map(|r| r.tier)
                .max()
                .unwrap_or(DifficultyTier::Beginner);
            (
                kind,
                KindStats {
                    rounds,
                    points,
                    avg_accuracy,
                    best_tier,
                },
            )
        })
        .collect();

    let active_days: Vec<NaiveDate> = records
        .iter()
        .map(|r| r.completed_at.date_naive())
        .collect();

    let mut stats = ProgressStats {
        total_points: records.iter().map(|r| r.score).sum(),
        rounds: records.len(),
        per_kind,
        day_streak: day_streak(&active_days),
        achievements: Vec::new(),
    };
    stats.achievements = Achievement::ALL
        .into_iter()
        .filter(|a| a.unlocked(&stats))
        .collect();
    stats
}

/// Length of the run of consecutive days ending at the latest day in `days`.
pub fn day_streak(days: &[NaiveDate]) -> u32 {
    let mut days = days.to_vec();
    days.sort_unstable();
    days.dedup();

    let Some(&latest) = days.last() else {
        return 0;
    };

    let mut streak = 1;
    let mut expected = latest - Duration::days(1);
    for &day in days.iter().rev().skip(1) {
        if day != expected {
            break;
        }
        streak += 1;
        expected = day - Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(kind: ExerciseKind, tier: DifficultyTier, score: i64, day: u32) -> ExerciseRecord {
        ExerciseRecord::new(kind, tier, score, 1, 1)
            .completed_at(Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap())
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn empty_progress() {
        let stats = compute_progress(&[]);
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.rounds, 0);
        assert_eq!(stats.day_streak, 0);
        assert!(stats.per_kind.is_empty());
        assert!(stats.achievements.is_empty());
    }

    #[test]
    fn per_kind_breakdown() {
        let records = vec![
            record(ExerciseKind::Memory, DifficultyTier::Beginner, 100, 1),
            record(ExerciseKind::Memory, DifficultyTier::Intermediate, 150, 1),
            record(ExerciseKind::Focus, DifficultyTier::Beginner, 75, 2),
        ];
        let stats = compute_progress(&records);
        assert_eq!(stats.total_points, 325);
        assert_eq!(stats.rounds, 3);

        let memory = &stats.per_kind[&ExerciseKind::Memory];
        assert_eq!(memory.rounds, 2);
        assert_eq!(memory.points, 250);
        assert_eq!(memory.best_tier, DifficultyTier::Intermediate);
        assert!((memory.avg_accuracy - 1.0).abs() < f64::EPSILON);

        assert_eq!(stats.per_kind[&ExerciseKind::Focus].points, 75);
        assert_eq!(stats.achievements, vec![Achievement::FirstSteps]);
        assert_eq!(stats.rank(), Rank::Bronze);
        assert_eq!(stats.points_to_next_rank(), Some(175));
    }

    #[test]
    fn day_streak_counts_back_from_latest() {
        assert_eq!(day_streak(&[date(1), date(2), date(3)]), 3);
        assert_eq!(day_streak(&[date(1), date(3), date(4)]), 2);
        assert_eq!(day_streak(&[date(5), date(5), date(4)]), 2);
        assert_eq!(day_streak(&[date(9)]), 1);
    }

    #[test]
    fn week_of_play_unlocks_week_warrior() {
        let records: Vec<_> = (1..=7)
            .map(|d| record(ExerciseKind::ProblemSolving, DifficultyTier::Advanced, 400, d))
            .collect();
        let stats = compute_progress(&records);
        assert_eq!(stats.day_streak, 7);
        assert_eq!(stats.total_points, 2800);
        assert_eq!(stats.rank(), Rank::Gold);
        assert_eq!(stats.points_to_next_rank(), Some(2200));
        assert_eq!(
            stats.achievements,
            vec![
                Achievement::FirstSteps,
                Achievement::WeekWarrior,
                Achievement::MindMaster
            ]
        );
    }
}
