//! Pattern completion: pick the number that continues the sequence.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use attntiv_core::{ExerciseKind, NumberPattern};

use crate::error::SessionError;
use crate::state::{AnswerFeedback, Scorekeeper, SessionDeps, SessionState};

pub struct PatternSession<R: Rng = ChaCha8Rng> {
    keeper: Scorekeeper,
    rng: R,
    pattern: Option<NumberPattern>,
}

impl<R: Rng> PatternSession<R> {
    pub fn new(deps: SessionDeps, rng: R) -> Self {
        Self {
            keeper: Scorekeeper::new(ExerciseKind::PatternRecognition, deps),
            rng,
            pattern: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.keeper.state()
    }

    pub fn start_round(&mut self) -> Result<&NumberPattern, SessionError> {
        let pattern = self
            .keeper
            .engine()
            .generate_pattern(self.keeper.tier(), &mut self.rng)?;
        Ok(&*self.pattern.insert(pattern))
    }

    pub fn current(&self) -> Option<&NumberPattern> {
        self.pattern.as_ref()
    }

    pub fn submit(&mut self, choice: i64) -> Result<AnswerFeedback, SessionError> {
        let pattern = self.pattern.take().ok_or(SessionError::NoActiveRound)?;
        let tier = self.keeper.tier();
        let correct = choice == pattern.next_number;

        let points = self.keeper.score_answer(correct, 0.0);
        let round = self
            .keeper
            .complete_round(tier, points, u32::from(correct), 1);
        Ok(self.keeper.feedback(correct, points, Some(round)))
    }
}
