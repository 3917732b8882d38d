//! Procedural exercise content generators.
//!
//! [`ExerciseEngine`] holds configuration only. Every generator takes the
//! random source as an argument, so the engine can be shared freely across
//! sessions and threads while each caller keeps its own (optionally seeded)
//! rng.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{
    DifficultyTier, MathProblem, NumberPattern, Operator, PatternRule, SpeedChallenge,
};
use crate::options::distractor_options;

/// Smallest and largest value in numeric sequences.
pub const DIGIT_MIN: u8 = 1;
pub const DIGIT_MAX: u8 = 9;

/// Share of pattern-matrix cells that are switched on.
pub const MATRIX_FILL_NUMERATOR: usize = 2;
pub const MATRIX_FILL_DENOMINATOR: usize = 5;

/// Chance that an N-back position deliberately repeats the value `n` back.
pub const N_BACK_MATCH_PROBABILITY: f64 = 0.3;

/// Range the pattern start value is drawn from.
pub const PATTERN_START_MIN: i64 = 1;
pub const PATTERN_START_MAX: i64 = 10;

/// How many times the target appears in a speed challenge.
pub const SPEED_TARGET_MIN: usize = 3;
pub const SPEED_TARGET_MAX: usize = 6;

/// Symbol universe for speed challenges.
pub const SPEED_SYMBOLS: [&str; 10] = [
    "⭐️", "🌟", "💫", "✨", "⚡️", "🌙", "☀️", "🌎", "🌍", "🌏",
];

/// Configuration for the exercise engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rejected draws allowed per generator call before giving up.
    pub max_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_retries: 10_000,
        }
    }
}

/// The exercise content engine.
#[derive(Debug, Clone, Default)]
pub struct ExerciseEngine {
    config: EngineConfig,
}

impl ExerciseEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Digits to memorize: 4/6/8 long by tier, each uniform in 1..=9.
    pub fn generate_memory_sequence<R: Rng + ?Sized>(
        &self,
        tier: DifficultyTier,
        rng: &mut R,
    ) -> Vec<u8> {
        (0..tier.sequence_length()).map(|_| random_digit(rng)).collect()
    }

    /// A `size` × `size` grid with `floor(size² × 0.4)` cells switched on.
    ///
    /// Cells are a uniform random subset drawn without replacement.
    pub fn generate_pattern_matrix<R: Rng + ?Sized>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Result<Vec<Vec<bool>>, EngineError> {
        if size == 0 {
            return Err(EngineError::InvalidArgument(
                "matrix size must be at least 1".into(),
            ));
        }
        let cells = size
            .checked_mul(size)
            .ok_or_else(|| EngineError::InvalidArgument(format!("matrix size {size} too large")))?;
        let active = cells * MATRIX_FILL_NUMERATOR / MATRIX_FILL_DENOMINATOR;

        let mut matrix = vec![vec![false; size]; size];
        for cell in index::sample(rng, cells, active).iter() {
            matrix[cell / size][cell % size] = true;
        }

        tracing::debug!(size, active, "generated pattern matrix");
        Ok(matrix)
    }

    /// A working-memory stream for an `n`-back round.
    ///
    /// From position `n` on, each value repeats the one `n` back with
    /// probability 0.3; otherwise it is a fresh uniform digit, which may
    /// still match by chance.
    pub fn generate_n_back_sequence<R: Rng + ?Sized>(
        &self,
        n: usize,
        length: usize,
        rng: &mut R,
    ) -> Result<Vec<u8>, EngineError> {
        if n == 0 {
            return Err(EngineError::InvalidArgument(
                "n-back distance must be at least 1".into(),
            ));
        }
        if n >= length {
            return Err(EngineError::InvalidArgument(format!(
                "n-back distance {n} must be shorter than the sequence length {length}"
            )));
        }

        let mut sequence: Vec<u8> = Vec::with_capacity(length);
        for position in 0..length {
            let value = if position >= n && rng.gen_bool(N_BACK_MATCH_PROBABILITY) {
                sequence[position - n]
            } else {
                random_digit(rng)
            };
            sequence.push(value);
        }
        Ok(sequence)
    }

    /// A random `+`, `-` or `×` question with four choices.
    pub fn generate_math_problem<R: Rng + ?Sized>(
        &self,
        tier: DifficultyTier,
        rng: &mut R,
    ) -> Result<MathProblem, EngineError> {
        let operator = Operator::ALL[rng.gen_range(0..Operator::ALL.len())];
        let lhs = rng.gen_range(tier.operand_range());
        let rhs = rng.gen_range(tier.operand_range());
        let answer = operator.apply(lhs, rhs);
        let options = distractor_options(answer, rng, self.config.max_retries)?;

        Ok(MathProblem {
            question: format!("{lhs} {} {rhs}", operator.symbol()),
            operator,
            operands: (lhs, rhs),
            answer,
            options,
        })
    }

    /// A number sequence built from one recurrence, plus what comes next.
    ///
    /// The rule is drawn once. Start values whose sequence would overflow
    /// `i64` (squaring grows fast) are rejected and redrawn; a start of 1
    /// fits every rule.
    pub fn generate_pattern<R: Rng + ?Sized>(
        &self,
        tier: DifficultyTier,
        rng: &mut R,
    ) -> Result<NumberPattern, EngineError> {
        let length = tier.sequence_length();
        let rule = PatternRule::ALL[rng.gen_range(0..PatternRule::ALL.len())];
        let mut rejected = 0u32;

        let (sequence, next_number) = loop {
            let start = rng.gen_range(PATTERN_START_MIN..=PATTERN_START_MAX);
            if let Some(unfolded) = unfold_pattern(rule, start, length) {
                break unfolded;
            }
            rejected += 1;
            if rejected > self.config.max_retries {
                return Err(EngineError::RetryLimitExceeded {
                    what: "number pattern",
                    attempts: rejected,
                });
            }
        };
        if rejected > 0 {
            tracing::debug!(rejected, ?rule, "redrew overflowing pattern start");
        }

        let options = distractor_options(next_number, rng, self.config.max_retries)?;
        Ok(NumberPattern {
            rule,
            sequence,
            next_number,
            options,
        })
    }

    /// A shuffled symbol grid containing the target 3 to 6 times.
    pub fn generate_speed_challenge<R: Rng + ?Sized>(
        &self,
        tier: DifficultyTier,
        rng: &mut R,
    ) -> Result<SpeedChallenge, EngineError> {
        let count = tier.speed_symbol_count();
        let target = SPEED_SYMBOLS[rng.gen_range(0..SPEED_SYMBOLS.len())];
        let target_count = rng.gen_range(SPEED_TARGET_MIN..=SPEED_TARGET_MAX);

        let mut symbols: Vec<String> = Vec::with_capacity(count);
        symbols.extend((0..target_count).map(|_| target.to_string()));

        let mut rejected = 0u32;
        while symbols.len() < count {
            let symbol = SPEED_SYMBOLS[rng.gen_range(0..SPEED_SYMBOLS.len())];
            if symbol == target {
                rejected += 1;
                if rejected > self.config.max_retries {
                    return Err(EngineError::RetryLimitExceeded {
                        what: "speed challenge symbols",
                        attempts: rejected,
                    });
                }
                continue;
            }
            symbols.push(symbol.to_string());
        }

        symbols.shuffle(rng);
        Ok(SpeedChallenge {
            symbols,
            target: target.to_string(),
            time_limit_secs: tier.speed_time_limit_secs(),
        })
    }
}

fn random_digit<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(DIGIT_MIN..=DIGIT_MAX)
}

/// Sequence of `length` values starting at `start`, and the value after it.
fn unfold_pattern(rule: PatternRule, start: i64, length: usize) -> Option<(Vec<i64>, i64)> {
    let mut sequence = Vec::with_capacity(length);
    sequence.push(start);
    let mut current = start;
    for _ in 1..length {
        current = rule.apply(current)?;
        sequence.push(current);
    }
    let next = rule.apply(current)?;
    Some((sequence, next))
}
