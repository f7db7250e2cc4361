//! Domain error types

use crate::interaction::phase::Phase;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Answer pool is empty")]
    EmptyAnswerPool,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Cannot {action} while {from}")]
    InvalidTransition { from: Phase, action: &'static str },
}

impl DomainError {
    /// Check if this error is a misconfiguration that cannot be recovered at runtime
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::EmptyAnswerPool)
    }
}
