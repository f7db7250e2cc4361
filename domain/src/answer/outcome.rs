//! Resolution outcome value objects

use serde::{Deserialize, Serialize};

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Generated by the configured provider
    Oracle,
    /// Drawn from the answer pool
    Pool,
}

/// The result of one answer request, held for the current cycle only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub answer: String,
    pub error_message: Option<String>,
    pub source: AnswerSource,
}

impl ResolutionOutcome {
    /// An answer produced by the provider
    pub fn oracle(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            error_message: None,
            source: AnswerSource::Oracle,
        }
    }

    /// A pool answer with no message (AI disabled)
    pub fn pool(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            error_message: None,
            source: AnswerSource::Pool,
        }
    }

    /// A pool answer substituted for a failed or slow provider call
    pub fn fallback(answer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            error_message: Some(message.into()),
            source: AnswerSource::Pool,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == AnswerSource::Pool && self.error_message.is_some()
    }
}
