//! Anthropic messages client

use super::{cancellable, endpoint, extract_text, read_json, transport_error};
use crate::config::FileAnthropicConfig;
use boa_application::ports::oracle_client::OracleError;
use boa_domain::{PromptTemplate, Provider};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const MESSAGES_PATH: &str = "/v1/messages";
const ANSWER_POINTER: &str = "/content/0/text";

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

pub struct AnthropicClient {
    http: reqwest::Client,
    config: FileAnthropicConfig,
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, config: FileAnthropicConfig) -> Self {
        Self { http, config }
    }

    /// Ask once; returns `content[0].text` trimmed
    pub async fn ask(
        &self,
        api_key: &str,
        question: &str,
        cancellation: &CancellationToken,
    ) -> Result<String, OracleError> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: PromptTemplate::oracle_system(),
            messages: vec![Message {
                role: "user",
                content: question,
            }],
            temperature: self.config.temperature,
        };
        let url = endpoint(&self.config.base_url, MESSAGES_PATH);
        debug!("POST {} (model {})", url, self.config.model);

        cancellable(cancellation, async {
            let response = self
                .http
                .post(&url)
                .header("x-api-key", api_key)
                .header("anthropic-version", &self.config.api_version)
                .json(&body)
                .send()
                .await
                .map_err(|e| transport_error(Provider::Anthropic, e))?;
            let json = read_json(Provider::Anthropic, response).await?;
            Ok(extract_text(&json, ANSWER_POINTER))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: String) -> AnthropicClient {
        AnthropicClient::new(
            reqwest::Client::new(),
            FileAnthropicConfig {
                base_url,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_request_shape_and_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 60,
                "system": PromptTemplate::oracle_system(),
                "messages": [{"role": "user", "content": "Should I move?"}],
                "temperature": 0.9
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "The road is open.\n"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = client(server.uri())
            .ask("sk-ant-test", "Should I move?", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(answer, "The road is open.");
    }

    #[tokio::test]
    async fn test_rate_limit_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "type": "error",
                "error": {"type": "rate_limit_error", "message": "Number of requests has exceeded your rate limit"}
            })))
            .mount(&server)
            .await;

        let error = client(server.uri())
            .ask("sk-ant-test", "Again?", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(429));
        assert_eq!(error.provider(), Some(Provider::Anthropic));
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let answer = client(server.uri())
            .ask("sk-ant-test", "Silence?", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(answer, "");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Dropping the server closes its port
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };
        let error = client(uri)
            .ask("sk-ant-test", "Anyone?", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            OracleError::Transport {
                provider: Provider::Anthropic,
                ..
            }
        ));
        assert_eq!(error.status(), None);
    }
}
