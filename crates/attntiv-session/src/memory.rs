//! Memory recall: show a digit sequence, then ask for it back.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use attntiv_core::ExerciseKind;

use crate::error::SessionError;
use crate::state::{AnswerFeedback, Scorekeeper, SessionDeps, SessionState};

pub struct MemorySession<R: Rng = ChaCha8Rng> {
    keeper: Scorekeeper,
    rng: R,
    sequence: Option<Vec<u8>>,
}

impl<R: Rng> MemorySession<R> {
    pub fn new(deps: SessionDeps, rng: R) -> Self {
        Self {
            keeper: Scorekeeper::new(ExerciseKind::Memory, deps),
            rng,
            sequence: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.keeper.state()
    }

    /// Generate the sequence to memorize. Replaces any unanswered one.
    pub fn start_round(&mut self) -> &[u8] {
        let sequence = self
            .keeper
            .engine()
            .generate_memory_sequence(self.keeper.tier(), &mut self.rng);
        self.sequence.insert(sequence)
    }

    /// The sequence awaiting an answer, if any.
    pub fn current(&self) -> Option<&[u8]> {
        self.sequence.as_deref()
    }

    /// Submit the recalled digits. Every submission completes a round.
    pub fn submit(&mut self, recalled: &[u8]) -> Result<AnswerFeedback, SessionError> {
        let sequence = self.sequence.take().ok_or(SessionError::NoActiveRound)?;
        let tier = self.keeper.tier();
        let correct = recalled == sequence.as_slice();

        let points = self.keeper.score_answer(correct, 0.0);
        let round = self
            .keeper
            .complete_round(tier, points, u32::from(correct), 1);
        Ok(self.keeper.feedback(correct, points, Some(round)))
    }
}
