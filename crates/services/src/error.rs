//! Shared error types for the services crate.

use thiserror::Error;

use interview_core::model::{SessionError, SessionId};
use storage::StorageError;

/// Errors emitted by `InterviewEngine`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(SessionError),
    #[error("session not found: {0}")]
    NotFound(SessionId),
    #[error("question index {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("session {0} is already completed")]
    InvalidState(SessionId),
    #[error("session storage failed; continuing in memory only: {0}")]
    Persistence(#[from] StorageError),
    #[error("no user is signed in")]
    UserAbsent,
}

impl EngineError {
    /// Map a domain error raised while operating on session `id`.
    pub(crate) fn from_session(id: &SessionId, err: SessionError) -> Self {
        match err {
            SessionError::AnswerIndexOutOfRange { index, len } => {
                Self::IndexOutOfRange { index, len }
            }
            SessionError::AlreadyCompleted => Self::InvalidState(id.clone()),
            other => Self::Validation(other),
        }
    }
}

/// Errors emitted while reading `EngineConfig` from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {raw:?}")]
    InvalidNumber { var: &'static str, raw: String },
    #[error("{var} cannot be empty")]
    Empty { var: &'static str },
}
