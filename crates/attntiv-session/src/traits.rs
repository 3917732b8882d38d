//! Collaborators a session is wired to.
//!
//! Persistence and notifications live outside this crate. Controllers only
//! see these two traits, handed in through [`crate::SessionDeps`].

use attntiv_core::results::ExerciseRecord;
use attntiv_core::{DifficultyTier, ExerciseKind};

use crate::state::{AnswerFeedback, RoundSummary};

/// Where completed rounds go (a local cache, a sync queue, ...).
///
/// Stores are fire-and-forget: a failing sink is logged and the session
/// keeps going.
pub trait RecordSink: Send + Sync {
    fn store(&self, record: &ExerciseRecord) -> anyhow::Result<()>;
}

/// Sink that drops every record.
pub struct NoopSink;

impl RecordSink for NoopSink {
    fn store(&self, _: &ExerciseRecord) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Progress callbacks, e.g. for driving UI updates or notifications.
pub trait SessionObserver: Send + Sync {
    fn on_answer(&self, kind: ExerciseKind, feedback: &AnswerFeedback);
    fn on_round_complete(&self, summary: &RoundSummary);
    fn on_tier_change(&self, kind: ExerciseKind, from: DifficultyTier, to: DifficultyTier);
}

/// No-op observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_answer(&self, _: ExerciseKind, _: &AnswerFeedback) {}
    fn on_round_complete(&self, _: &RoundSummary) {}
    fn on_tier_change(&self, _: ExerciseKind, _: DifficultyTier, _: DifficultyTier) {}
}
