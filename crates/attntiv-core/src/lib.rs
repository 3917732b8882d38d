//! attntiv-core — exercise content generation and scoring.
//!
//! This crate defines the tiers, exercise kinds and content types, the
//! procedural generators, the scoring formula, and the shared difficulty
//! policy that every game mode builds on. It performs no I/O apart from
//! report persistence and never adapts difficulty by itself.

pub mod achievements;
pub mod challenges;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod feed;
pub mod model;
pub mod options;
pub mod report;
pub mod results;
pub mod scoring;
pub mod statistics;

pub use difficulty::{next_difficulty, AdaptationPolicy, Direction, Transition};
pub use engine::{EngineConfig, ExerciseEngine};
pub use error::EngineError;
pub use model::{
    DifficultyTier, ExerciseKind, MathProblem, NumberPattern, Operator, PatternRule,
    SpeedChallenge,
};
pub use scoring::{calculate_score, score_breakdown, ScoreBreakdown};
