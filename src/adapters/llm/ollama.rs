//! Ollama provider
//!
//! Talks to `POST {base_url}/api/generate` with streaming disabled. A bearer
//! token is sent when one is configured, for Ollama instances behind an
//! authenticating proxy.

use super::provider::{build_http_client, check_status, map_send_error, OracleProvider};
use crate::config::{LlmConfig, SecretString};
use crate::domain::{OracleError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama `/api/generate` client
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    auth_token: Option<SecretString>,
}

impl OllamaProvider {
    /// Create a provider from the `[llm]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.timeout_seconds)?,
            base_url: config.endpoint(),
            model: config.model_name(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            auth_token: config.api_key.clone(),
        })
    }

    /// Endpoint this provider posts to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl OracleProvider for OllamaProvider {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, OracleError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token.expose_secret().as_str());
        }

        tracing::debug!(
            provider = "ollama",
            model = %self.model,
            prompt_length = prompt.len(),
            "Sending generate request"
        );

        let response = request.send().await.map_err(map_send_error)?;
        let response = check_status(response).await?;
        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(e.to_string()))?;

        Ok(parsed.response)
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
