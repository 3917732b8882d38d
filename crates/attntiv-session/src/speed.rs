//! Visual search rounds: find every copy of the target symbol against the clock.

use std::collections::BTreeSet;
use std::time::Duration;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use attntiv_core::{DifficultyTier, ExerciseKind, SpeedChallenge};

use crate::config::SpeedConfig;
use crate::error::SessionError;
use crate::state::{AnswerFeedback, RoundSummary, Scorekeeper, SessionDeps, SessionState};

struct SpeedRound {
    tier: DifficultyTier,
    challenge: Option<SpeedChallenge>,
    answered: u32,
    correct: u32,
    score: i64,
}

pub struct SpeedSession<R: Rng = ChaCha8Rng> {
    keeper: Scorekeeper,
    rng: R,
    config: SpeedConfig,
    round: Option<SpeedRound>,
}

impl<R: Rng> SpeedSession<R> {
    pub fn new(deps: SessionDeps, config: SpeedConfig, rng: R) -> Self {
        Self {
            keeper: Scorekeeper::new(ExerciseKind::SpeedProcessing, deps),
            rng,
            config,
            round: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.keeper.state()
    }

    pub fn start_round(&mut self) -> Result<&SpeedChallenge, SessionError> {
        let challenge = self.next_challenge()?;
        let round = self.round.insert(SpeedRound {
            tier: self.keeper.tier(),
            challenge: None,
            answered: 0,
            correct: 0,
            score: 0,
        });
        Ok(&*round.challenge.insert(challenge))
    }

    pub fn current_challenge(&self) -> Option<&SpeedChallenge> {
        self.round.as_ref().and_then(|r| r.challenge.as_ref())
    }

    /// Submit the grid positions the player tapped.
    ///
    /// Correct only when the selection is exactly the set of target
    /// positions and it came in under the challenge's time limit.
    pub fn submit(
        &mut self,
        selected: &[usize],
        elapsed: Duration,
    ) -> Result<AnswerFeedback, SessionError> {
        let round = self.round.as_mut().ok_or(SessionError::NoActiveRound)?;
        let challenge = round.challenge.as_ref().ok_or(SessionError::NoActiveRound)?;

        let len = challenge.symbols.len();
        if let Some(&position) = selected.iter().find(|&&p| p >= len) {
            return Err(SessionError::PositionOutOfRange { position, len });
        }

        let selected: BTreeSet<usize> = selected.iter().copied().collect();
        let targets: BTreeSet<usize> = challenge.target_positions().into_iter().collect();
        let limit = challenge.time_limit_secs;
        let elapsed = elapsed.as_secs_f64();
        let correct = selected == targets && elapsed <= limit;
        round.challenge = None;

        let points = self.keeper.score_answer(correct, (limit - elapsed).max(0.0));
        round.answered += 1;
        round.correct += u32::from(correct);
        round.score += points;

        if round.answered >= self.config.challenges_per_round {
            let summary = self.close_round();
            return Ok(self.keeper.feedback(correct, points, summary));
        }

        match self.next_challenge() {
            Ok(next) => {
                if let Some(round) = self.round.as_mut() {
                    round.challenge = Some(next);
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

    fn next_challenge(&mut self) -> Result<SpeedChallenge, SessionError> {
        Ok(self
            .keeper
            .engine()
            .generate_speed_challenge(self.keeper.tier(), &mut self.rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session_rng;
    use crate::state::test_support::{wired, StallingRng};
    use attntiv_core::EngineError;

    fn session() -> SpeedSession {
        let (deps, _, _) = wired();
        SpeedSession::new(deps, SpeedConfig::default(), session_rng(Some(8)))
    }

    #[test]
    fn exact_selection_in_time_scores_bonus() {
        let mut session = session();
        let challenge = session.start_round().unwrap();
        assert_eq!(challenge.symbols.len(), 12);
        let targets = challenge.target_positions();

        let feedback = session
            .submit(&targets, Duration::from_millis(2500))
            .unwrap();
        assert!(feedback.correct);
        // 125 base + 2.5 s left × 10
        assert_eq!(feedback.points, 150);
    }

    #[test]
    fn selection_order_and_repeats_do_not_matter() {
        let mut session = session();
        let mut targets = session.start_round().unwrap().target_positions();
        targets.reverse();
        targets.push(targets[0]);
        let feedback = session.submit(&targets, Duration::from_secs(5)).unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.points, 125);
    }

    #[test]
    fn missing_a_target_is_wrong() {
        let mut session = session();
        let targets = session.start_round().unwrap().target_positions();
        let feedback = session
            .submit(&targets[1..], Duration::from_secs(1))
            .unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.points, 0);
    }

    #[test]
    fn too_slow_is_wrong() {
        let mut session = session();
        let targets = session.start_round().unwrap().target_positions();
        let feedback = session
            .submit(&targets, Duration::from_millis(5001))
            .unwrap();
        assert!(!feedback.correct);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut session = session();
        session.start_round().unwrap();
        assert!(matches!(
            session.submit(&[0, 12], Duration::ZERO),
            Err(SessionError::PositionOutOfRange { position: 12, len: 12 })
        ));
        // The challenge is still open.
        assert!(session.current_challenge().is_some());
    }

    #[test]
    fn round_ends_after_configured_challenges() {
        let mut session = session();
        session.start_round().unwrap();
        for i in 0..5 {
            let feedback = session.submit(&[], Duration::from_secs(1)).unwrap();
            assert!(!feedback.correct);
            assert_eq!(feedback.round.is_some(), i == 4);
        }
        assert_eq!(session.state().rounds_played, 1);
        assert!(session.current_challenge().is_none());
    }

    #[test]
    fn failed_generation_closes_the_round_with_its_record() {
        let (deps, sink, _) = wired();
        let (rng, stalled) = StallingRng::new(8);
        let mut session = SpeedSession::new(deps, SpeedConfig::default(), rng);
        let targets = session.start_round().unwrap().target_positions();

        stalled.set(true);
        let err = session.submit(&targets, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Engine(EngineError::RetryLimitExceeded { .. })
        ));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].correct, 1);
        assert_eq!(records[0].total, 1);
        assert!(session.current_challenge().is_none());
        assert_eq!(session.state().rounds_played, 1);

        stalled.set(false);
        assert!(session.start_round().is_ok());
    }
}
