//! Daily challenges evaluated over one calendar day of completed rounds.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ExerciseKind;
use crate::results::ExerciseRecord;

/// Accuracy a focus round needs to count toward [`DailyChallenge::FocusChampion`].
pub const FOCUS_CHAMPION_ACCURACY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DailyChallenge {
    MemoryMaster,
    FocusChampion,
    KnowledgeSeeker,
}

impl DailyChallenge {
    pub const ALL: [DailyChallenge; 3] = [
        DailyChallenge::MemoryMaster,
        DailyChallenge::FocusChampion,
        DailyChallenge::KnowledgeSeeker,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DailyChallenge::MemoryMaster => "Memory Master",
            DailyChallenge::FocusChampion => "Focus Champion",
            DailyChallenge::KnowledgeSeeker => "Knowledge Seeker",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DailyChallenge::MemoryMaster => "Complete 3 memory exercises",
            DailyChallenge::FocusChampion => "Finish 2 focus rounds at 80% accuracy or better",
            DailyChallenge::KnowledgeSeeker => "Play 3 different exercise types",
        }
    }

    /// Bonus points for completing the challenge.
    pub fn points(self) -> i64 {
        match self {
            DailyChallenge::MemoryMaster => 100,
            DailyChallenge::FocusChampion => 150,
            DailyChallenge::KnowledgeSeeker => 120,
        }
    }

    pub fn target(self) -> u32 {
        match self {
            DailyChallenge::MemoryMaster => 3,
            DailyChallenge::FocusChampion => 2,
            DailyChallenge::KnowledgeSeeker => 3,
        }
    }

    /// Progress toward the target from one day's rounds. Not capped.
    fn progress(self, today: &[&ExerciseRecord]) -> u32 {
        match self {
            DailyChallenge::MemoryMaster => today
                .iter()
                .filter(|r| r.kind == ExerciseKind::Memory)
                .count() as u32,
            DailyChallenge::FocusChampion => today
                .iter()
                .filter(|r| r.kind == ExerciseKind::Focus && r.accuracy >= FOCUS_CHAMPION_ACCURACY)
                .count() as u32,
            DailyChallenge::KnowledgeSeeker => {
                today.iter().map(|r| r.kind).collect::<BTreeSet<_>>().len() as u32
            }
        }
    }
}

/// Where one challenge stands for the day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChallengeStatus {
    pub challenge: DailyChallenge,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
}

impl ChallengeStatus {
    /// Share of the target reached, capped at 1.
    pub fn fraction(&self) -> f64 {
        (f64::from(self.progress) / f64::from(self.target.max(1))).min(1.0)
    }
}

/// Every daily challenge for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBoard {
    pub day: NaiveDate,
    pub challenges: Vec<ChallengeStatus>,
}

impl DailyBoard {
    /// Mean completion over all challenges, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.challenges.is_empty() {
            return 0.0;
        }
        self.challenges.iter().map(ChallengeStatus::fraction).sum::<f64>()
            / self.challenges.len() as f64
    }

    /// Bonus points from completed challenges.
    pub fn earned_points(&self) -> i64 {
        self.challenges
            .iter()
            .filter(|s| s.completed)
            .map(|s| s.challenge.points())
            .sum()
    }
}

/// Evaluate the daily challenges against rounds completed on `day` (UTC).
pub fn daily_board(records: &[ExerciseRecord], day: NaiveDate) -> DailyBoard {
    let today: Vec<&ExerciseRecord> = records
        .iter()
        .filter(|r| r.completed_at.date_naive() == day)
        .collect();

    let challenges = DailyChallenge::ALL
        .into_iter()
        .map(|challenge| {
            let progress = challenge.progress(&today);
            let target = challenge.target();
            ChallengeStatus {
                challenge,
                progress,
                target,
                completed: progress >= target,
            }
        })
        .collect();
    DailyBoard { day, challenges }
}
