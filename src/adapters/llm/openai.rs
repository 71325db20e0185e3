//! OpenAI Chat Completions provider

use super::provider::{build_http_client, check_status, map_send_error, OracleProvider};
use crate::config::{LlmConfig, SecretString};
use crate::domain::{OracleError, RedactorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// OpenAI `/v1/chat/completions` client
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    api_key: SecretString,
}

impl OpenAiProvider {
    /// Create a provider from the `[llm]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is configured.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            RedactorError::Configuration(
                "llm.api_key (or OPENAI_API_KEY) is required for the openai provider".to_string(),
            )
        })?;

        Ok(Self {
            client: build_http_client(config.timeout_seconds)?,
            base_url: config.endpoint(),
            model: config.model_name(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            api_key,
        })
    }
}

#[async_trait]
impl OracleProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, OracleError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(
            provider = "openai",
            model = %self.model,
            prompt_length = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret().as_str())
            .json(&serde_json::json!({
                "model": &self.model,
                "temperature": self.temperature,
                "max_tokens": self.max_tokens,
                "messages": [{"role": "user", "content": prompt}]
            }))
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| OracleError::InvalidResponse("No choices in OpenAI response".to_string()))
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use mockito::Server;

    fn config_for(url: &str) -> LlmConfig {
        LlmConfig {
            provider: "openai".to_string(),
            base_url: Some(url.to_string()),
            api_key: Some(secret_string("sk-openai".to_string())),
            ..LlmConfig::default()
        }
    }

    #[tokio::test]
    async fn test_generate_first_choice() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-openai")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"{\"passed\":true}"}}]}"#)
            .create_async()
            .await;

        let provider = OpenAiProvider::new(&config_for(&server.url())).unwrap();
        assert_eq!(provider.generate("p").await.unwrap(), r#"{"passed":true}"#);
        assert_eq!(provider.model_name(), "gpt-4");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let provider = OpenAiProvider::new(&config_for(&server.url())).unwrap();
        assert!(matches!(
            provider.generate("p").await,
            Err(OracleError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_bad_request_is_client_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_body("context length exceeded")
            .create_async()
            .await;

        let provider = OpenAiProvider::new(&config_for(&server.url())).unwrap();
        let err = provider.generate("p").await.unwrap_err();
        assert_eq!(
            err,
            OracleError::ClientError {
                status: 400,
                message: "context length exceeded".to_string()
            }
        );
    }
}
