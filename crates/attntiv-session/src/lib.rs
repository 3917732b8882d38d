//! attntiv-session — adaptive game-mode controllers.
//!
//! One controller per exercise kind. Each owns its rng and session state,
//! asks the shared [`attntiv_core::ExerciseEngine`] for content, scores
//! answers, and moves difficulty with the configured
//! [`attntiv_core::AdaptationPolicy`]. Everything a controller talks to is
//! injected through [`SessionDeps`].

pub mod config;
pub mod error;
pub mod focus;
pub mod memory;
pub mod pattern;
pub mod problem_solving;
pub mod sink;
pub mod speed;
pub mod state;
pub mod traits;

pub use config::{load_config, load_config_from, AttntivConfig};
pub use error::SessionError;
pub use focus::FocusSession;
pub use memory::MemorySession;
pub use pattern::PatternSession;
pub use problem_solving::ProblemSolvingSession;
pub use sink::MemorySink;
pub use speed::SpeedSession;
pub use state::{session_rng, AnswerFeedback, RoundSummary, SessionDeps, SessionState};
pub use traits::{NoopObserver, NoopSink, RecordSink, SessionObserver};
