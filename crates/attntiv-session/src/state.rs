//! State and bookkeeping shared by every game mode.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use attntiv_core::results::{accuracy, ExerciseRecord};
use attntiv_core::{calculate_score, AdaptationPolicy, DifficultyTier, ExerciseEngine, ExerciseKind};

use crate::traits::{NoopObserver, NoopSink, RecordSink, SessionObserver};

/// Everything a controller needs from outside, passed in at construction.
#[derive(Clone)]
pub struct SessionDeps {
    pub engine: Arc<ExerciseEngine>,
    pub policy: AdaptationPolicy,
    pub sink: Arc<dyn RecordSink>,
    pub observer: Arc<dyn SessionObserver>,
    pub initial_tier: DifficultyTier,
}

impl SessionDeps {
    /// Default policy, starting at `Beginner`, with records and callbacks discarded.
    pub fn new(engine: Arc<ExerciseEngine>) -> Self {
        Self {
            engine,
            policy: AdaptationPolicy::default(),
            sink: Arc::new(NoopSink),
            observer: Arc::new(NoopObserver),
            initial_tier: DifficultyTier::Beginner,
        }
    }

    pub fn with_policy(mut self, policy: AdaptationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn RecordSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_initial_tier(mut self, tier: DifficultyTier) -> Self {
        self.initial_tier = tier;
        self
    }
}

/// Build the session rng: seeded when a seed is given, from entropy otherwise.
pub fn session_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Running state of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Tier the next question is generated at.
    pub tier: DifficultyTier,
    /// Consecutive correct answers.
    pub streak: u32,
    pub total_score: i64,
    pub rounds_played: u32,
}

/// Outcome of a completed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub kind: ExerciseKind,
    /// Tier the round started at.
    pub tier: DifficultyTier,
    /// Tier the next round starts at.
    pub next_tier: DifficultyTier,
    pub score: i64,
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
    /// Id of the record handed to the sink.
    pub record_id: Uuid,
}

/// Outcome of one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub points: i64,
    /// Tier after adapting to this answer.
    pub tier: DifficultyTier,
    pub streak: u32,
    /// Set when this answer finished the round.
    pub round: Option<RoundSummary>,
}

/// Scoring, streak, adaptation and record bookkeeping for one game mode.
pub(crate) struct Scorekeeper {
    kind: ExerciseKind,
    deps: SessionDeps,
    state: SessionState,
}

impl Scorekeeper {
    pub(crate) fn new(kind: ExerciseKind, deps: SessionDeps) -> Self {
        let state = SessionState {
            tier: deps.initial_tier,
            streak: 0,
            total_score: 0,
            rounds_played: 0,
        };
        Self { kind, deps, state }
    }

    pub(crate) fn engine(&self) -> &ExerciseEngine {
        &self.deps.engine
    }

    pub(crate) fn policy(&self) -> &AdaptationPolicy {
        &self.deps.policy
    }

    pub(crate) fn state(&self) -> &SessionState {
        &self.state
    }

    pub(crate) fn tier(&self) -> DifficultyTier {
        self.state.tier
    }

    /// Count a correct answer into the streak, or break it.
    pub(crate) fn mark(&mut self, correct: bool) {
        if correct {
            self.state.streak += 1;
        } else {
            self.state.streak = 0;
        }
    }

    /// Score at the current tier and add it to the session total.
    pub(crate) fn award(&mut self, accuracy: f64, time_bonus_secs: f64) -> i64 {
        let points = calculate_score(self.kind, self.state.tier, accuracy, time_bonus_secs);
        self.state.total_score += points;
        points
    }

    /// Apply the policy to an outcome and report any tier change.
    pub(crate) fn adapt(&mut self, accuracy: f64) {
        let from = self.state.tier;
        let transition = self.deps.policy.next(from, accuracy, self.state.streak);
        self.state.tier = transition.tier;
        self.state.streak = transition.streak;

        if transition.changed_from(from) {
            tracing::info!(kind = %self.kind, %from, to = %transition.tier, "difficulty changed");
            self.deps
                .observer
                .on_tier_change(self.kind, from, transition.tier);
        }
    }

    /// Score, streak and adaptation for a single right-or-wrong answer.
    ///
    /// Wrong answers score nothing, time bonus included.
    pub(crate) fn score_answer(&mut self, correct: bool, time_bonus_secs: f64) -> i64 {
        self.mark(correct);
        let (accuracy, bonus) = if correct {
            (1.0, time_bonus_secs)
        } else {
            (0.0, 0.0)
        };
        let points = self.award(accuracy, bonus);
        self.adapt(accuracy);
        points
    }

    /// Close a round: emit its record and notify the observer.
    pub(crate) fn complete_round(
        &mut self,
        tier: DifficultyTier,
        score: i64,
        correct: u32,
        total: u32,
    ) -> RoundSummary {
        self.state.rounds_played += 1;

        let record = ExerciseRecord::new(self.kind, tier, score, correct, total);
        if let Err(e) = self.deps.sink.store(&record) {
            tracing::warn!(kind = %self.kind, "failed to store round record: {e:#}");
        }

        let summary = RoundSummary {
            kind: self.kind,
            tier,
            next_tier: self.state.tier,
            score,
            correct,
            total,
            accuracy: accuracy(correct, total),
            record_id: record.id,
        };
        tracing::debug!(kind = %self.kind, score, correct, total, "round complete");
        self.deps.observer.on_round_complete(&summary);
        summary
    }

    /// Package an answer's outcome and notify the observer.
    pub(crate) fn feedback(
        &self,
        correct: bool,
        points: i64,
        round: Option<RoundSummary>,
    ) -> AnswerFeedback {
        let feedback = AnswerFeedback {
            correct,
            points,
            tier: self.state.tier,
            streak: self.state.streak,
            round,
        };
        self.deps.observer.on_answer(self.kind, &feedback);
        feedback
    }
}
