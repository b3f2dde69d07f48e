//! Domain errors for the Taskwright planner.

use thiserror::Error;

/// Domain-level errors that can occur while planning a turn.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No schedule was provided for a recurring task")]
    MissingSchedule,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Cannot derive a task title from an empty query")]
    TitleTooLong,

    #[error("Planning invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Intent classifier failed: {0}")]
    ClassifierFailed(String),

    #[error("Intent classifier timed out after {0}ms")]
    ClassifierTimeout(u64),

    #[error("Agent directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Conversation store failed: {0}")]
    StoreFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Whether this error indicates a defect rather than a user-facing
    /// condition.
    pub const fn is_defect(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
