//! Settings entities

use super::provider::Provider;
use serde::{Deserialize, Serialize};

/// User settings: which provider to call and with which key (Entity)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub provider: Provider,
    pub api_key: String,
}

impl Settings {
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
        }
    }

    /// AI is enabled whenever a non-blank key is present
    pub fn is_ai_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Snapshot handed to the oracle client, or `None` when AI is disabled
    pub fn ai_config(&self) -> Option<AiConfig> {
        if !self.is_ai_enabled() {
            return None;
        }
        Some(AiConfig::new(self.provider, self.api_key.trim()))
    }
}

/// Immutable provider + key snapshot for a single request
#[derive(Clone, PartialEq, Eq)]
pub struct AiConfig {
    provider: Provider,
    api_key: String,
}

impl AiConfig {
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// Keep keys out of logs
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
