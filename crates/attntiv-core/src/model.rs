//! Core data model types for the exercise engine.
//!
//! Tiers and exercise kinds gate every generator and the scoring formula.
//! The content types are plain values: once a generator returns one, nothing
//! in the engine touches it again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Difficulty level gating generation parameters and the score multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    /// All tiers, easiest first.
    pub const ALL: [DifficultyTier; 3] = [
        DifficultyTier::Beginner,
        DifficultyTier::Intermediate,
        DifficultyTier::Advanced,
    ];

    /// Score multiplier applied by [`crate::scoring::calculate_score`].
    pub fn multiplier(self) -> f64 {
        match self {
            DifficultyTier::Beginner => 1.0,
            DifficultyTier::Intermediate => 1.5,
            DifficultyTier::Advanced => 2.0,
        }
    }

    /// One tier harder, saturating at `Advanced`.
    pub fn harder(self) -> Self {
        match self {
            DifficultyTier::Beginner => DifficultyTier::Intermediate,
            DifficultyTier::Intermediate | DifficultyTier::Advanced => DifficultyTier::Advanced,
        }
    }

    /// One tier easier, saturating at `Beginner`.
    pub fn easier(self) -> Self {
        match self {
            DifficultyTier::Advanced => DifficultyTier::Intermediate,
            DifficultyTier::Intermediate | DifficultyTier::Beginner => DifficultyTier::Beginner,
        }
    }

    /// Length of memory sequences and number patterns.
    pub fn sequence_length(self) -> usize {
        match self {
            DifficultyTier::Beginner => 4,
            DifficultyTier::Intermediate => 6,
            DifficultyTier::Advanced => 8,
        }
    }

    /// Range both math operands are drawn from.
    pub fn operand_range(self) -> RangeInclusive<i64> {
        match self {
            DifficultyTier::Beginner => 1..=10,
            DifficultyTier::Intermediate => 1..=20,
            DifficultyTier::Advanced => 1..=50,
        }
    }

    /// Number of symbols shown in a speed challenge.
    pub fn speed_symbol_count(self) -> usize {
        match self {
            DifficultyTier::Beginner => 12,
            DifficultyTier::Intermediate => 20,
            DifficultyTier::Advanced => 30,
        }
    }

    /// Time allowed for a speed challenge, in seconds.
    pub fn speed_time_limit_secs(self) -> f64 {
        match self {
            DifficultyTier::Beginner => 5.0,
            DifficultyTier::Intermediate => 4.0,
            DifficultyTier::Advanced => 3.0,
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyTier::Beginner => write!(f, "beginner"),
            DifficultyTier::Intermediate => write!(f, "intermediate"),
            DifficultyTier::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" | "easy" => Ok(DifficultyTier::Beginner),
            "intermediate" | "medium" => Ok(DifficultyTier::Intermediate),
            "advanced" | "hard" => Ok(DifficultyTier::Advanced),
            other => Err(format!("unknown difficulty tier: {other}")),
        }
    }
}

/// The five game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    Memory,
    Focus,
    ProblemSolving,
    PatternRecognition,
    SpeedProcessing,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 5] = [
        ExerciseKind::Memory,
        ExerciseKind::Focus,
        ExerciseKind::ProblemSolving,
        ExerciseKind::PatternRecognition,
        ExerciseKind::SpeedProcessing,
    ];

    /// Points for a perfect round at `Beginner`, before any time bonus.
    pub fn base_score(self) -> i64 {
        match self {
            ExerciseKind::Memory => 100,
            ExerciseKind::Focus => 150,
            ExerciseKind::ProblemSolving => 200,
            ExerciseKind::PatternRecognition => 175,
            ExerciseKind::SpeedProcessing => 125,
        }
    }

    /// Human-readable name.
    pub fn title(self) -> &'static str {
        match self {
            ExerciseKind::Memory => "Memory",
            ExerciseKind::Focus => "Focus",
            ExerciseKind::ProblemSolving => "Problem Solving",
            ExerciseKind::PatternRecognition => "Pattern Recognition",
            ExerciseKind::SpeedProcessing => "Speed Processing",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseKind::Memory => write!(f, "memory"),
            ExerciseKind::Focus => write!(f, "focus"),
            ExerciseKind::ProblemSolving => write!(f, "problem-solving"),
            ExerciseKind::PatternRecognition => write!(f, "pattern-recognition"),
            ExerciseKind::SpeedProcessing => write!(f, "speed-processing"),
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "memory" => Ok(ExerciseKind::Memory),
            "focus" | "n-back" | "nback" => Ok(ExerciseKind::Focus),
            "problem-solving" | "math" => Ok(ExerciseKind::ProblemSolving),
            "pattern-recognition" | "pattern" => Ok(ExerciseKind::PatternRecognition),
            "speed-processing" | "speed" => Ok(ExerciseKind::SpeedProcessing),
            other => Err(format!("unknown exercise kind: {other}")),
        }
    }
}

/// Binary operator of a math problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    /// Symbol used when rendering the question.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
        }
    }

    pub fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
        }
    }
}

/// A multiple-choice arithmetic question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    /// Rendered as `"<lhs> <symbol> <rhs>"`.
    pub question: String,
    pub operator: Operator,
    pub operands: (i64, i64),
    pub answer: i64,
    /// Exactly four distinct values, one of them `answer`, in random order.
    pub options: Vec<i64>,
}

/// Recurrence used to build a number pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternRule {
    /// `x -> x + 2`
    AddTwo,
    /// `x -> x * 2`
    Double,
    /// `x -> x + x`
    SelfSum,
    /// `x -> x * x`
    Square,
}

impl PatternRule {
    pub const ALL: [PatternRule; 4] = [
        PatternRule::AddTwo,
        PatternRule::Double,
        PatternRule::SelfSum,
        PatternRule::Square,
    ];

    /// Applies the rule once, or `None` on `i64` overflow.
    pub fn apply(self, x: i64) -> Option<i64> {
        match self {
            PatternRule::AddTwo => x.checked_add(2),
            PatternRule::Double => x.checked_mul(2),
            PatternRule::SelfSum => x.checked_add(x),
            PatternRule::Square => x.checked_mul(x),
        }
    }
}

/// A "what comes next" number sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPattern {
    pub rule: PatternRule,
    pub sequence: Vec<i64>,
    /// One more application of `rule` to the last element of `sequence`.
    pub next_number: i64,
    /// Exactly four distinct values, one of them `next_number`, in random order.
    pub options: Vec<i64>,
}

/// A visual search grid: find every occurrence of `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedChallenge {
    pub symbols: Vec<String>,
    pub target: String,
    pub time_limit_secs: f64,
}

impl SpeedChallenge {
    /// How many times the target appears.
    pub fn target_count(&self) -> usize {
        self.symbols.iter().filter(|s| **s == self.target).count()
    }

    /// Indices of every target occurrence, ascending.
    pub fn target_positions(&self) -> Vec<usize> {
        self.symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == self.target)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_display_and_parse() {
        assert_eq!(DifficultyTier::Beginner.to_string(), "beginner");
        assert_eq!(
            "Advanced".parse::<DifficultyTier>().unwrap(),
            DifficultyTier::Advanced
        );
        assert_eq!(
            "medium".parse::<DifficultyTier>().unwrap(),
            DifficultyTier::Intermediate
        );
        assert!("expert".parse::<DifficultyTier>().is_err());
    }

    #[test]
    fn tier_tables() {
        let multipliers: Vec<f64> = DifficultyTier::ALL.iter().map(|t| t.multiplier()).collect();
        assert_eq!(multipliers, vec![1.0, 1.5, 2.0]);
        let lengths: Vec<usize> = DifficultyTier::ALL
            .iter()
            .map(|t| t.sequence_length())
            .collect();
        assert_eq!(lengths, vec![4, 6, 8]);
        assert_eq!(DifficultyTier::Advanced.operand_range(), 1..=50);
        assert_eq!(DifficultyTier::Intermediate.speed_symbol_count(), 20);
        assert_eq!(DifficultyTier::Advanced.speed_time_limit_secs(), 3.0);
    }

    #[test]
    fn tier_steps_saturate() {
        assert_eq!(DifficultyTier::Beginner.easier(), DifficultyTier::Beginner);
        assert_eq!(DifficultyTier::Beginner.harder(), DifficultyTier::Intermediate);
        assert_eq!(DifficultyTier::Advanced.harder(), DifficultyTier::Advanced);
        assert_eq!(DifficultyTier::Advanced.easier(), DifficultyTier::Intermediate);
    }

    #[test]
    fn kind_base_scores() {
        let scores: Vec<i64> = ExerciseKind::ALL.iter().map(|k| k.base_score()).collect();
        assert_eq!(scores, vec![100, 150, 200, 175, 125]);
    }

    #[test]
    fn kind_display_parse_roundtrip() {
        for kind in ExerciseKind::ALL {
            assert_eq!(kind.to_string().parse::<ExerciseKind>().unwrap(), kind);
        }
        assert_eq!(
            "problem_solving".parse::<ExerciseKind>().unwrap(),
            ExerciseKind::ProblemSolving
        );
        assert_eq!("speed".parse::<ExerciseKind>().unwrap(), ExerciseKind::SpeedProcessing);
        assert!("reading".parse::<ExerciseKind>().is_err());
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ExerciseKind::PatternRecognition).unwrap();
        assert_eq!(json, "\"pattern-recognition\"");
    }

    #[test]
    fn operator_symbols_and_apply() {
        assert_eq!(Operator::Multiply.symbol(), "×");
        assert_eq!(Operator::Subtract.apply(3, 10), -7);
        assert_eq!(Operator::Multiply.apply(50, 50), 2500);
    }

    #[test]
    fn pattern_rule_overflow_is_none() {
        assert_eq!(PatternRule::Square.apply(9), Some(81));
        assert_eq!(PatternRule::Square.apply(i64::MAX), None);
        assert_eq!(PatternRule::AddTwo.apply(i64::MAX - 1), None);
        assert_eq!(PatternRule::SelfSum.apply(21), Some(42));
    }

    #[test]
    fn speed_challenge_positions() {
        let challenge = SpeedChallenge {
            symbols: vec!["a".into(), "b".into(), "a".into(), "c".into()],
            target: "a".into(),
            time_limit_secs: 5.0,
        };
        assert_eq!(challenge.target_count(), 2);
        assert_eq!(challenge.target_positions(), vec![0, 2]);
    }
}
