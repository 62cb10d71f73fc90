//! Model gateway -- the boundary to the hosted text-generation service.
//!
//! The gateway forwards an assembled system prompt plus the user prompt to
//! an OpenAI-compatible `/chat/completions` endpoint and returns the raw
//! generated text. One attempt per call: no retry, no backoff. Failures
//! surface to the caller as [`GatewayError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// Boundary trait so the hosted model can be replaced in tests.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generate a reply for `user_prompt` under `system_prompt`.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, GatewayError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug)]
pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGateway {
    /// Build a gateway from configuration.
    ///
    /// Resolves the API key from the configured environment variable and
    /// validates the base URL up front so a misconfiguration fails before
    /// the first turn rather than inside it.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let api_key =
            std::env::var(&config.api_key_env).map_err(|_| GatewayError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;

        url::Url::parse(&config.base_url).map_err(|e| GatewayError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "sending generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "generation request rejected");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(GatewayError::EmptyCompletion)?;

        tracing::debug!(chars = content.len(), "received completion");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> GatewayConfig {
        GatewayConfig {
            base_url: base_url.to_string(),
            api_key_env: "ROUTINELY_TEST_KEY".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn generate_returns_completion_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "A fine routine."}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        std::env::set_var("ROUTINELY_TEST_KEY", "test-key");
        let gateway =
            OpenAiGateway::from_config(&test_config(&format!("{}/v1", server.url()))).unwrap();
        let text = gateway.generate("be brief", "plan my day").await.unwrap();

        assert_eq!(text, "A fine routine.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("overloaded")
            .create_async()
            .await;

        std::env::set_var("ROUTINELY_TEST_KEY", "test-key");
        let gateway =
            OpenAiGateway::from_config(&test_config(&format!("{}/v1", server.url()))).unwrap();
        let err = gateway.generate("sys", "user").await.unwrap_err();

        match err {
            GatewayError::Upstream { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(serde_json::json!({ "choices": [] }).to_string())
            .create_async()
            .await;

        std::env::set_var("ROUTINELY_TEST_KEY", "test-key");
        let gateway =
            OpenAiGateway::from_config(&test_config(&format!("{}/v1", server.url()))).unwrap();
        let err = gateway.generate("sys", "user").await.unwrap_err();
        assert!(matches!(err, GatewayError::EmptyCompletion));
    }

    #[test]
    fn missing_api_key_env_is_reported() {
        std::env::remove_var("ROUTINELY_ABSENT_KEY");
        let mut config = test_config("https://api.openai.com/v1");
        config.api_key_env = "ROUTINELY_ABSENT_KEY".to_string();
        let err = OpenAiGateway::from_config(&config).unwrap_err();
        assert!(matches!(err, GatewayError::MissingApiKey { .. }));
    }

    #[test]
    fn invalid_base_url_is_reported() {
        std::env::set_var("ROUTINELY_TEST_KEY", "test-key");
        let config = test_config("not a url");
        let err = OpenAiGateway::from_config(&config).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidBaseUrl { .. }));
    }
}
