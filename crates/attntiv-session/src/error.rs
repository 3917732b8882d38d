//! Session error types.

use thiserror::Error;

use attntiv_core::EngineError;

/// Errors a game-mode controller can return.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An answer arrived with no round started.
    #[error("no round in progress")]
    NoActiveRound,

    /// A position or selection index past the end of the round.
    #[error("position {position} is outside the {len}-item round")]
    PositionOutOfRange { position: usize, len: usize },

    /// An N-back answer for a position with nothing `n` steps behind it.
    #[error("position {position} has no item {n} steps back")]
    PositionNotScorable { position: usize, n: usize },

    /// An N-back position that was already answered this round.
    #[error("position {0} was already answered")]
    AlreadyAnswered(usize),

    /// Controller settings that cannot be played.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Content generation failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
