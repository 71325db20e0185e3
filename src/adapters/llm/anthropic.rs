//! Anthropic Messages API provider

use super::provider::{build_http_client, check_status, map_send_error, OracleProvider};
use crate::config::{LlmConfig, SecretString};
use crate::domain::{OracleError, RedactorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;

/// API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Anthropic `/v1/messages` client
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    api_key: SecretString,
}

impl AnthropicProvider {
    /// Create a provider from the `[llm]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is configured.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            RedactorError::Configuration(
                "llm.api_key (or ANTHROPIC_API_KEY) is required for the anthropic provider"
                    .to_string(),
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
impl OracleProvider for AnthropicProvider {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, OracleError> {
        let url = format!("{}/v1/messages", self.base_url);

        tracing::debug!(
            provider = "anthropic",
            model = %self.model,
            prompt_length = prompt.len(),
            "Sending messages request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret().as_str())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&serde_json::json!({
                "model": &self.model,
                "max_tokens": self.max_tokens,
                "temperature": self.temperature,
                "messages": [{"role": "user", "content": prompt}]
            }))
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;
        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();

        if text.is_empty() {
            return Err(OracleError::InvalidResponse(
                "Empty response from Anthropic".to_string(),
            ));
        }
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
