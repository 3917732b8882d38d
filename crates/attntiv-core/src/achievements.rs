//! Achievements unlocked from progress statistics.

use serde::{Deserialize, Serialize};

use crate::statistics::ProgressStats;

/// Points needed for [`Achievement::MindMaster`].
pub const MIND_MASTER_POINTS: i64 = 1000;

/// Consecutive active days needed for [`Achievement::WeekWarrior`].
pub const WEEK_WARRIOR_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Achievement {
    FirstSteps,
    WeekWarrior,
    MindMaster,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::FirstSteps,
        Achievement::WeekWarrior,
        Achievement::MindMaster,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstSteps => "First Steps",
            Achievement::WeekWarrior => "Week Warrior",
            Achievement::MindMaster => "Mind Master",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstSteps => "Complete your first challenge",
            Achievement::WeekWarrior => "Maintain a 7-day streak",
            Achievement::MindMaster => "Score 1000 points",
        }
    }

    pub fn unlocked(self, stats: &ProgressStats) -> bool {
        match self {
            Achievement::FirstSteps => stats.rounds > 0,
            Achievement::WeekWarrior => stats.day_streak >= WEEK_WARRIOR_DAYS,
            Achievement::MindMaster => stats.total_points >= MIND_MASTER_POINTS,
        }
    }
}

/// Standing on the points board, from lifetime points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Rank {
    pub const ALL: [Rank; 4] = [Rank::Bronze, Rank::Silver, Rank::Gold, Rank::Platinum];

    /// Lifetime points needed to reach this rank.
    pub fn min_points(self) -> i64 {
        match self {
            Rank::Bronze => 0,
            Rank::Silver => 500,
            Rank::Gold => 1000,
            Rank::Platinum => 5000,
        }
    }

    pub fn for_points(points: i64) -> Rank {
        Rank::ALL
            .into_iter()
            .rev()
            .find(|r| points >= r.min_points())
            .unwrap_or(Rank::Bronze)
    }

    /// Rank after this one, if any.
    pub fn next(self) -> Option<Rank> {
        match self {
            Rank::Bronze => Some(Rank::Silver),
            Rank::Silver => Some(Rank::Gold),
            Rank::Gold => Some(Rank::Platinum),
            Rank::Platinum => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Rank::Bronze => "Bronze",
            Rank::Silver => "Silver",
            Rank::Gold => "Gold",
            Rank::Platinum => "Platinum",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stats(rounds: usize, total_points: i64, day_streak: u32) -> ProgressStats {
        ProgressStats {
            total_points,
            rounds,
            per_kind: BTreeMap::new(),
            day_streak,
            achievements: vec![],
        }
    }

    #[test]
    fn thresholds() {
        assert!(!Achievement::FirstSteps.unlocked(&stats(0, 0, 0)));
        assert!(Achievement::FirstSteps.unlocked(&stats(1, 0, 1)));
        assert!(!Achievement::MindMaster.unlocked(&stats(9, 999, 1)));
        assert!(Achievement::MindMaster.unlocked(&stats(9, 1000, 1)));
        assert!(!Achievement::WeekWarrior.unlocked(&stats(6, 0, 6)));
        assert!(Achievement::WeekWarrior.unlocked(&stats(7, 0, 7)));
    }

    #[test]
    fn titles() {
        assert_eq!(Achievement::MindMaster.title(), "Mind Master");
        assert_eq!(Achievement::WeekWarrior.description(), "Maintain a 7-day streak");
    }

    #[test]
    fn rank_ladder() {
        assert_eq!(Rank::for_points(0), Rank::Bronze);
        assert_eq!(Rank::for_points(-40), Rank::Bronze);
        assert_eq!(Rank::for_points(499), Rank::Bronze);
        assert_eq!(Rank::for_points(500), Rank::Silver);
        assert_eq!(Rank::for_points(1250), Rank::Gold);
        assert_eq!(Rank::for_points(5000), Rank::Platinum);
        assert_eq!(Rank::Gold.next(), Some(Rank::Platinum));
        assert_eq!(Rank::Platinum.next(), None);
        assert_eq!(Rank::Gold.to_string(), "Gold");
    }

    #[test]
    fn rank_follows_total_points() {
        assert_eq!(stats(12, 1250, 5).rank(), Rank::Gold);
        assert_eq!(stats(1, 100, 1).rank(), Rank::Bronze);
    }
}
