//! Adaptive difficulty transitions.
//!
//! The generators never change tier on their own. Session controllers call
//! [`AdaptationPolicy::next`] after every scored answer or round, so all game
//! modes share one set of thresholds.

use serde::{Deserialize, Serialize};

use crate::model::DifficultyTier;

/// Thresholds driving tier changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptationPolicy {
    /// Minimum accuracy that can trigger an escalation.
    #[serde(default = "default_escalate_accuracy")]
    pub escalate_accuracy: f64,
    /// Minimum streak that can trigger an escalation.
    #[serde(default = "default_escalate_streak")]
    pub escalate_streak: u32,
    /// Accuracy at or below which the tier drops.
    #[serde(default = "default_deescalate_accuracy")]
    pub deescalate_accuracy: f64,
}

fn default_escalate_accuracy() -> f64 {
    0.8
}
fn default_escalate_streak() -> u32 {
    3
}
fn default_deescalate_accuracy() -> f64 {
    0.4
}

impl Default for AdaptationPolicy {
    fn default() -> Self {
        Self {
            escalate_accuracy: default_escalate_accuracy(),
            escalate_streak: default_escalate_streak(),
            deescalate_accuracy: default_deescalate_accuracy(),
        }
    }
}

/// Which way a scored outcome pushes difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Hold,
    Down,
}

/// Tier and streak after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub tier: DifficultyTier,
    pub streak: u32,
}

impl Transition {
    /// Whether the tier moved relative to `from`.
    pub fn changed_from(&self, from: DifficultyTier) -> bool {
        self.tier != from
    }
}

impl AdaptationPolicy {
    /// Check the thresholds are usable.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.escalate_accuracy) {
            return Err(format!(
                "escalate_accuracy must be within [0, 1], got {}",
                self.escalate_accuracy
            ));
        }
        if !(0.0..=1.0).contains(&self.deescalate_accuracy) {
            return Err(format!(
                "deescalate_accuracy must be within [0, 1], got {}",
                self.deescalate_accuracy
            ));
        }
        if self.deescalate_accuracy >= self.escalate_accuracy {
            return Err("deescalate_accuracy must be below escalate_accuracy".into());
        }
        Ok(())
    }

    /// Direction an outcome points, independent of the current tier.
    ///
    /// Game modes with their own difficulty knobs (the N-back distance) move
    /// them with this, so they stay in step with the tier.
    pub fn direction(&self, accuracy: f64, streak: u32) -> Direction {
        if accuracy >= self.escalate_accuracy && streak >= self.escalate_streak {
            Direction::Up
        } else if accuracy <= self.deescalate_accuracy {
            Direction::Down
        } else {
            Direction::Hold
        }
    }

    /// Tier and streak to carry into the next round.
    ///
    /// `streak` is the caller's streak after the round it just scored.
    /// Escalation moves one tier up and resets the streak; at `Advanced`
    /// nothing changes. De-escalation moves one tier down and leaves the
    /// streak as given.
    pub fn next(&self, current: DifficultyTier, accuracy: f64, streak: u32) -> Transition {
        match self.direction(accuracy, streak) {
            Direction::Up if current != DifficultyTier::Advanced => Transition {
                tier: current.harder(),
                streak: 0,
            },
            Direction::Down => Transition {
                tier: current.easier(),
                streak,
            },
            Direction::Up | Direction::Hold => Transition {
                tier: current,
                streak,
            },
        }
    }
}

/// [`AdaptationPolicy::next`] with the default thresholds.
pub fn next_difficulty(current: DifficultyTier, accuracy: f64, streak: u32) -> Transition {
    AdaptationPolicy::default().next(current, accuracy, streak)
}
