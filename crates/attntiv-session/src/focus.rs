//! N-back focus training.
//!
//! A round shows a digit stream; for every position from `n` on, the player
//! says whether it matches the digit `n` places earlier. The round is scored
//! on accuracy over the positions actually answered, and the N-back distance
//! moves with the difficulty tier.

use std::collections::BTreeSet;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use attntiv_core::{Direction, ExerciseKind};

use crate::config::FocusConfig;
use crate::error::SessionError;
use crate::state::{RoundSummary, Scorekeeper, SessionDeps, SessionState};

struct FocusRound {
    n: usize,
    sequence: Vec<u8>,
    answered: BTreeSet<usize>,
    correct: u32,
}

impl FocusRound {
    fn is_match(&self, position: usize) -> bool {
        self.sequence[position] == self.sequence[position - self.n]
    }
}

pub struct FocusSession<R: Rng = ChaCha8Rng> {
    keeper: Scorekeeper,
    rng: R,
    config: FocusConfig,
    n: usize,
    round: Option<FocusRound>,
}

impl<R: Rng> FocusSession<R> {
    /// Fails with [`SessionError::InvalidConfig`] when the N-back bounds
    /// are inconsistent (see [`FocusConfig::check`]).
    pub fn new(deps: SessionDeps, config: FocusConfig, rng: R) -> Result<Self, SessionError> {
        config.check()?;
        Ok(Self {
            keeper: Scorekeeper::new(ExerciseKind::Focus, deps),
            rng,
            n: config.initial_n,
            config,
            round: None,
        })
    }

    pub fn state(&self) -> &SessionState {
        self.keeper.state()
    }

    /// N-back distance the next round is played at.
    pub fn n_level(&self) -> usize {
        self.n
    }

    pub fn start_round(&mut self) -> Result<&[u8], SessionError> {
        let sequence = self.keeper.engine().generate_n_back_sequence(
            self.n,
            self.config.sequence_length,
            &mut self.rng,
        )?;
        let round = self.round.insert(FocusRound {
            n: self.n,
            sequence,
            answered: BTreeSet::new(),
            correct: 0,
        });
        Ok(round.sequence.as_slice())
    }

    /// Stream of the round in progress.
    pub fn current(&self) -> Option<&[u8]> {
        self.round.as_ref().map(|r| r.sequence.as_slice())
    }

    /// Judge the player's call on one position. Returns whether it was right.
    pub fn answer(&mut self, position: usize, says_match: bool) -> Result<bool, SessionError> {
        let round = self.round.as_mut().ok_or(SessionError::NoActiveRound)?;
        if position >= round.sequence.len() {
            return Err(SessionError::PositionOutOfRange {
                position,
                len: round.sequence.len(),
            });
        }
        if position < round.n {
            return Err(SessionError::PositionNotScorable { position, n: round.n });
        }
        if !round.answered.insert(position) {
            return Err(SessionError::AlreadyAnswered(position));
        }

        let correct = says_match == round.is_match(position);
        if correct {
            round.correct += 1;
        }
        self.keeper.mark(correct);
        Ok(correct)
    }

    /// Score the round, adapt tier and N-back distance, and emit its record.
    pub fn finish_round(&mut self) -> Result<RoundSummary, SessionError> {
        let round = self.round.take().ok_or(SessionError::NoActiveRound)?;
        let total = round.answered.len() as u32;
        let accuracy = attntiv_core::results::accuracy(round.correct, total);
        let tier = self.keeper.tier();

        let score = self.keeper.award(accuracy, 0.0);
        let direction = self
            .keeper
            .policy()
            .direction(accuracy, self.keeper.state().streak);
        self.keeper.adapt(accuracy);

        let previous = self.n;
        self.n = match direction {
            Direction::Up => (self.n + 1).min(self.config.max_n),
            Direction::Down => self.n.saturating_sub(1).max(self.config.min_n),
            Direction::Hold => self.n,
        };
        if self.n != previous {
            tracing::info!(from = previous, to = self.n, "n-back distance changed");
        }

        Ok(self.keeper.complete_round(tier, score, round.correct, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session_rng;
    use crate::state::test_support::wired;
    use attntiv_core::DifficultyTier;

    fn session(config: FocusConfig) -> FocusSession {
        let (deps, _, _) = wired();
        FocusSession::new(deps, config, session_rng(Some(11))).unwrap()
    }

    fn play_perfectly(session: &mut FocusSession) {
        let sequence = session.start_round().unwrap().to_vec();
        let n = session.n_level();
        for position in n..sequence.len() {
            let says_match = sequence[position] == sequence[position - n];
            assert!(session.answer(position, says_match).unwrap());
        }
    }

    #[test]
    fn perfect_round_raises_tier_and_n() {
        let mut session = session(FocusConfig::default());
        play_perfectly(&mut session);

        let summary = session.finish_round().unwrap();
        assert_eq!(summary.correct, 18);
        assert_eq!(summary.total, 18);
        assert_eq!(summary.accuracy, 1.0);
        assert_eq!(summary.score, 150);
        assert_eq!(summary.tier, DifficultyTier::Beginner);
        assert_eq!(summary.next_tier, DifficultyTier::Intermediate);
        assert_eq!(session.n_level(), 3);
    }

    #[test]
    fn n_is_capped_at_max() {
        let config = FocusConfig {
            initial_n: 4,
            ..FocusConfig::default()
        };
        let mut session = session(config);
        play_perfectly(&mut session);
        session.finish_round().unwrap();
        assert_eq!(session.n_level(), 4);
    }

    #[test]
    fn empty_round_scores_zero_and_eases_off() {
        let mut session = session(FocusConfig::default());
        session.start_round().unwrap();
        let summary = session.finish_round().unwrap();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.score, 0);
        assert_eq!(session.n_level(), 1);

        // Already at the floor.
        session.start_round().unwrap();
        session.finish_round().unwrap();
        assert_eq!(session.n_level(), 1);
    }

    #[test]
    fn partial_accuracy_scores_proportionally() {
        let mut session = session(FocusConfig::default());
        let sequence = session.start_round().unwrap().to_vec();
        let n = session.n_level();
        // Three right, one wrong.
        for position in n..n + 4 {
            let truth = sequence[position] == sequence[position - n];
            let says_match = if position == n { !truth } else { truth };
            session.answer(position, says_match).unwrap();
        }
        let summary = session.finish_round().unwrap();
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.total, 4);
        // 150 × 1.0 × 0.75
        assert_eq!(summary.score, 112);
        assert_eq!(session.n_level(), 2);
    }

    #[test]
    fn rejects_bad_positions() {
        let mut session = session(FocusConfig::default());
        assert!(matches!(
            session.answer(3, true),
            Err(SessionError::NoActiveRound)
        ));

        session.start_round().unwrap();
        assert!(matches!(
            session.answer(1, true),
            Err(SessionError::PositionNotScorable { position: 1, n: 2 })
        ));
        assert!(matches!(
            session.answer(20, true),
            Err(SessionError::PositionOutOfRange { position: 20, len: 20 })
        ));

        session.answer(5, false).unwrap();
        assert!(matches!(
            session.answer(5, true),
            Err(SessionError::AlreadyAnswered(5))
        ));
    }

    #[test]
    fn finish_without_round_fails() {
        let mut session = session(FocusConfig::default());
        assert!(matches!(
            session.finish_round(),
            Err(SessionError::NoActiveRound)
        ));
    }

    #[test]
    fn inverted_n_bounds_are_rejected() {
        let (deps, _, _) = wired();
        let config = FocusConfig {
            min_n: 5,
            max_n: 2,
            ..FocusConfig::default()
        };
        let err = FocusSession::new(deps, config, session_rng(Some(11))).err().unwrap();
        assert!(matches!(err, SessionError::InvalidConfig(_)));
        assert!(err.to_string().contains("focus.min_n (5)"));
    }

    #[test]
    fn initial_n_outside_bounds_is_rejected() {
        let (deps, _, _) = wired();
        let config = FocusConfig {
            initial_n: 9,
            ..FocusConfig::default()
        };
        assert!(matches!(
            FocusSession::new(deps, config, session_rng(Some(11))),
            Err(SessionError::InvalidConfig(_))
        ));
    }
}
