//! Oracle client port
//!
//! Defines the interface for asking a chat-completion provider for an answer.

use async_trait::async_trait;
use boa_domain::{AiConfig, Provider};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that can occur during an oracle request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The provider answered with a non-success status
    #[error("{message}")]
    Provider {
        provider: Provider,
        status: u16,
        message: String,
    },

    /// The request never produced an HTTP response
    #[error("{provider} request failed: {message}")]
    Transport { provider: Provider, message: String },

    /// The caller cancelled the request through its token
    #[error("Request cancelled")]
    Cancelled,
}

impl OracleError {
    /// HTTP status code, when the provider returned one
    pub fn status(&self) -> Option<u16> {
        match self {
            OracleError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn provider(&self) -> Option<Provider> {
        match self {
            OracleError::Provider { provider, .. } | OracleError::Transport { provider, .. } => {
                Some(*provider)
            }
            OracleError::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OracleError::Cancelled)
    }
}

/// Client for a single oracle request
///
/// Implementations issue exactly one request per call and never retry;
/// retry and fallback policy belongs to the caller. The token must be
/// observed cooperatively: once it fires, the call should return
/// [`OracleError::Cancelled`] as soon as it can.
#[async_trait]
pub trait OracleClient: Send + Sync {
    /// Ask the configured provider and return the trimmed answer text.
    ///
    /// An unexpected response shape yields an empty string, not an error.
    async fn fetch_answer(
        &self,
        config: &AiConfig,
        question: &str,
        cancellation: CancellationToken,
    ) -> Result<String, OracleError>;
}
