//! Timed arithmetic rounds.

use std::time::Duration;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use attntiv_core::{DifficultyTier, ExerciseKind, MathProblem};

use crate::config::ProblemSolvingConfig;
use crate::error::SessionError;
use crate::state::{AnswerFeedback, RoundSummary, Scorekeeper, SessionDeps, SessionState};

struct ProblemRound {
    tier: DifficultyTier,
    problem: Option<MathProblem>,
    answered: u32,
    correct: u32,
    score: i64,
}

pub struct ProblemSolvingSession<R: Rng = ChaCha8Rng> {
    keeper: Scorekeeper,
    rng: R,
    config: ProblemSolvingConfig,
    round: Option<ProblemRound>,
}

impl<R: Rng> ProblemSolvingSession<R> {
    pub fn new(deps: SessionDeps, config: ProblemSolvingConfig, rng: R) -> Self {
        Self {
            keeper: Scorekeeper::new(ExerciseKind::ProblemSolving, deps),
            rng,
            config,
            round: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.keeper.state()
    }

    /// Begin a round and return its first problem.
    pub fn start_round(&mut self) -> Result<&MathProblem, SessionError> {
        let problem = self.next_problem()?;
        let round = self.round.insert(ProblemRound {
            tier: self.keeper.tier(),
            problem: None,
            answered: 0,
            correct: 0,
            score: 0,
        });
        Ok(&*round.problem.insert(problem))
    }

    /// Problem awaiting an answer.
    pub fn current_problem(&self) -> Option<&MathProblem> {
        self.round.as_ref().and_then(|r| r.problem.as_ref())
    }

    /// Answer the current problem. `None` means the player ran out of time.
    ///
    /// Correct answers given within the time limit score the remaining
    /// seconds as a bonus. The next problem is generated at the tier the
    /// answer left the session at.
    pub fn submit(
        &mut self,
        answer: Option<i64>,
        elapsed: Duration,
    ) -> Result<AnswerFeedback, SessionError> {
        let problem = self
            .round
            .as_mut()
            .and_then(|r| r.problem.take())
            .ok_or(SessionError::NoActiveRound)?;

        let limit = self.config.seconds_per_problem;
        let elapsed = elapsed.as_secs_f64();
        let correct = answer == Some(problem.answer) && elapsed <= limit;
        let remaining = (limit - elapsed).max(0.0);
        let points = self.keeper.score_answer(correct, remaining);

        let Some(round) = self.round.as_mut() else {
            return Err(SessionError::NoActiveRound);
        };
        round.answered += 1;
        round.correct += u32::from(correct);
        round.score += points;

        if round.answered >= self.config.problems_per_round {
            let summary = self.close_round();
            return Ok(self.keeper.feedback(correct, points, summary));
        }

        match self.next_problem() {
            Ok(next) => {
                if let Some(round) = self.round.as_mut() {
                    round.problem = Some(next);
                }
                Ok(self.keeper.feedback(correct, points, None))
            }
            Err(e) => {
                // The answer already counted; close the round short so its
                // record still goes out.
                tracing::warn!("ending round early: {e}");
                self.close_round();
                Err(e)
            }
        }
    }

    /// Emit the record for the round in progress and clear it.
    fn close_round(&mut self) -> Option<RoundSummary> {
        let round = self.round.take()?;
        Some(
            self.keeper
                .complete_round(round.tier, round.score, round.correct, round.answered),
        )
    }

    fn next_problem(&mut self) -> Result<MathProblem, SessionError> {
        Ok(self
            .keeper
            .engine()
            .generate_math_problem(self.keeper.tier(), &mut self.rng)?)
    }
}
