//! Oracle configuration from TOML (`[oracle]` section)

use boa_application::OracleParams;
use boa_domain::{AnswerPool, DomainError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw oracle configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    /// Provider timeout in milliseconds (default: 15000)
    pub timeout_ms: u64,
    /// How long error messages stay visible, in milliseconds (default: 4000)
    pub error_display_ms: u64,
    /// Replacement answer pool. Empty means the built-in answers.
    pub answers: Vec<String>,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            error_display_ms: 4_000,
            answers: Vec::new(),
        }
    }
}

impl FileOracleConfig {
    pub fn to_params(&self) -> OracleParams {
        OracleParams::default()
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_error_display(Duration::from_millis(self.error_display_ms))
    }

    /// Build the answer pool, ignoring blank and repeated entries.
    ///
    /// Fails only if answers were configured and every one of them is blank.
    pub fn answer_pool(&self) -> Result<AnswerPool, DomainError> {
        if self.answers.is_empty() {
            return Ok(AnswerPool::default());
        }
        AnswerPool::new(
            self.answers
                .iter()
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .map(str::to_string),
        )
    }
}
