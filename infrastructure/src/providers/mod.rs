//! HTTP adapters for the [`OracleClient`] port.
//!
//! One module per provider. [`HttpOracleClient`] routes each request to the
//! provider named in its [`AiConfig`].

pub mod anthropic;
pub mod openai;

use crate::config::FileProvidersConfig;
use anthropic::AnthropicClient;
use async_trait::async_trait;
use boa_application::ports::oracle_client::{OracleClient, OracleError};
use boa_domain::{AiConfig, Provider};
use openai::OpenAiClient;
use serde_json::Value;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const USER_AGENT: &str = concat!("book-of-answers/", env!("CARGO_PKG_VERSION"));

/// Oracle client backed by the providers' HTTP APIs
pub struct HttpOracleClient {
    openai: OpenAiClient,
    anthropic: AnthropicClient,
}

impl HttpOracleClient {
    pub fn new(openai: OpenAiClient, anthropic: AnthropicClient) -> Self {
        Self { openai, anthropic }
    }

    /// Build both provider clients sharing one connection pool
    pub fn from_config(config: &FileProvidersConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::new(
            OpenAiClient::new(http.clone(), config.openai.clone()),
            AnthropicClient::new(http, config.anthropic.clone()),
        ))
    }
}

#[async_trait]
impl OracleClient for HttpOracleClient {
    async fn fetch_answer(
        &self,
        config: &AiConfig,
        question: &str,
        cancellation: CancellationToken,
    ) -> Result<String, OracleError> {
        match config.provider() {
            Provider::OpenAi => {
                self.openai
                    .ask(config.api_key(), question, &cancellation)
                    .await
            }
            Provider::Anthropic => {
                self.anthropic
                    .ask(config.api_key(), question, &cancellation)
                    .await
            }
        }
    }
}

/// Run a request future unless, or until, the token fires.
pub(crate) async fn cancellable<T>(
    cancellation: &CancellationToken,
    request: impl Future<Output = Result<T, OracleError>>,
) -> Result<T, OracleError> {
    if cancellation.is_cancelled() {
        return Err(OracleError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancellation.cancelled() => {
            debug!("Oracle request cancelled");
            Err(OracleError::Cancelled)
        }
        result = request => result,
    }
}

/// Turn a provider response into its JSON body or a classified error.
///
/// Non-success statuses carry `error.message` from the body when there is
/// one, otherwise a generic `<Provider> API error: <status>`.
pub(crate) async fn read_json(
    provider: Provider,
    response: reqwest::Response,
) -> Result<Value, OracleError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.json::<Value>().await.ok();
        let message = body
            .as_ref()
            .and_then(|b| b.pointer("/error/message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} API error: {}", provider, status.as_u16()));
        return Err(OracleError::Provider {
            provider,
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| transport_error(provider, e))
}

/// Trimmed string at `pointer`, or empty when the shape is unexpected.
pub(crate) fn extract_text(body: &Value, pointer: &str) -> String {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

pub(crate) fn transport_error(provider: Provider, error: reqwest::Error) -> OracleError {
    OracleError::Transport {
        provider,
        message: error.to_string(),
    }
}

/// Join a configured base URL and an API path
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
