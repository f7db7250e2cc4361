//! Provider value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Key prefix used by Anthropic API keys
pub const ANTHROPIC_KEY_PREFIX: &str = "sk-ant-";

/// Chat-completion provider backing the oracle (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
}

impl Provider {
    /// Stable identifier used in storage and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }

    /// Guess the provider from the shape of an API key.
    ///
    /// A heuristic only; the key is never checked against the provider.
    pub fn detect_from_key(key: &str) -> Self {
        if key.trim().starts_with(ANTHROPIC_KEY_PREFIX) {
            Provider::Anthropic
        } else {
            Provider::OpenAi
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}
