//! Phase state machine for the ask / respond cycle

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Current step in the ask / respond cycle
///
/// ```text
/// Asking --submit(ai)--> Contemplating --resolve--> Answered --ask_again--> Asking
/// Asking --submit(no ai)------------------------->  Answered
/// Contemplating --ask_again--> Asking
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Asking,
    Contemplating,
    Answered,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Asking => "asking",
            Phase::Contemplating => "contemplating",
            Phase::Answered => "answered",
        }
    }

    /// Phase entered when a question is submitted.
    ///
    /// Independent of the current phase: a new submission supersedes a
    /// pending one. With AI enabled the oracle starts contemplating;
    /// without it the answer is immediate.
    pub fn on_submit(ai_enabled: bool) -> Phase {
        if ai_enabled {
            Phase::Contemplating
        } else {
            Phase::Answered
        }
    }

    /// Transition taken when the in-flight request settles.
    pub fn resolve(self) -> Result<Phase, DomainError> {
        match self {
            Phase::Contemplating => Ok(Phase::Answered),
            from => Err(DomainError::InvalidTransition {
                from,
                action: "resolve",
            }),
        }
    }

    /// Transition taken when the user wants to ask another question.
    pub fn ask_again(self) -> Result<Phase, DomainError> {
        match self {
            Phase::Contemplating | Phase::Answered => Ok(Phase::Asking),
            from => Err(DomainError::InvalidTransition {
                from,
                action: "ask again",
            }),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
