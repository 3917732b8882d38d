//! Engine error types.
//!
//! Every generator is total over valid input. These errors cover the two ways
//! a call can still fail: arguments outside the documented contract, and a
//! bounded rejection loop that ran out of attempts.

use thiserror::Error;

/// Errors returned by the exercise engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An argument is outside the range the generator accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A rejection-sampling loop hit its retry bound.
    #[error("gave up generating {what} after {attempts} rejected draws")]
    RetryLimitExceeded { what: &'static str, attempts: u32 },
}

impl EngineError {
    /// Returns `true` if the caller passed something it should not have.
    ///
    /// Retry exhaustion is not a caller mistake; a fresh call with the same
    /// arguments may succeed.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, EngineError::InvalidArgument(_))
    }
}
