//! OpenAI chat-completions client

use super::{cancellable, endpoint, extract_text, read_json, transport_error};
use crate::config::FileOpenAiConfig;
use boa_application::ports::oracle_client::OracleError;
use boa_domain::{PromptTemplate, Provider};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const ANSWER_POINTER: &str = "/choices/0/message/content";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

pub struct OpenAiClient {
    http: reqwest::Client,
    config: FileOpenAiConfig,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, config: FileOpenAiConfig) -> Self {
        Self { http, config }
    }

    /// Ask once; returns `choices[0].message.content` trimmed
    pub async fn ask(
        &self,
        api_key: &str,
        question: &str,
        cancellation: &CancellationToken,
    ) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: PromptTemplate::oracle_system(),
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let url = endpoint(&self.config.base_url, CHAT_COMPLETIONS_PATH);
        debug!("POST {} (model {})", url, self.config.model);

        cancellable(cancellation, async {
            let response = self
                .http
                .post(&url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| transport_error(Provider::OpenAi, e))?;
            let json = read_json(Provider::OpenAi, response).await?;
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

    fn client(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(
            reqwest::Client::new(),
            FileOpenAiConfig {
                base_url: server.uri(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_request_shape_and_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 60,
                "temperature": 0.9,
                "messages": [
                    {"role": "system", "content": PromptTemplate::oracle_system()},
                    {"role": "user", "content": "Will it rain?"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  Bring an umbrella. "}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let answer = client(&server)
            .ask("sk-test", "Will it rain?", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(answer, "Bring an umbrella.");
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_empty_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let answer = client(&server)
            .ask("sk-test", "Hm?", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(answer, "");
    }

    #[tokio::test]
    async fn test_error_status_carries_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let error = client(&server)
            .ask("sk-bad", "Hm?", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            error,
            OracleError::Provider {
                provider: Provider::OpenAi,
                status: 401,
                message: "Incorrect API key provided".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_error_status_without_body_gets_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let error = client(&server)
            .ask("sk-test", "Hm?", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(503));
        assert_eq!(error.to_string(), "OpenAI API error: 503");
    }

    #[tokio::test]
    async fn test_cancellation_aborts_slow_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(std::time::Duration::from_secs(10))
                    .set_body_json(json!({"choices": [{"message": {"content": "Late."}}]})),
            )
            .mount(&server)
            .await;

        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let result = client(&server).ask("sk-test", "Hm?", &token).await;
        assert_eq!(result, Err(OracleError::Cancelled));
    }
}
