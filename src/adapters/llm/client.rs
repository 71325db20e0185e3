//! Provider factory
//!
//! Selects the concrete [`OracleProvider`] named by `llm.provider`.

use super::anthropic::AnthropicProvider;
use super::ollama::OllamaProvider;
use super::openai::OpenAiProvider;
use super::provider::OracleProvider;
use super::retry::RetryingOracle;
use crate::config::LlmConfig;
use crate::domain::{RedactorError, Result};
use std::sync::Arc;

/// Create the configured oracle
///
/// When `llm.retry.max_retries > 0` the provider is wrapped in a
/// [`RetryingOracle`].
///
/// # Errors
///
/// Returns a configuration error for an unknown provider name or a provider
/// that is missing required credentials.
///
/// # Example
///
/// ```no_run
/// use redactor::adapters::llm::create_oracle;
/// use redactor::config::LlmConfig;
///
/// let oracle = create_oracle(&LlmConfig::default())?;
/// assert_eq!(oracle.provider_name(), "ollama");
/// # Ok::<(), redactor::domain::RedactorError>(())
/// ```
pub fn create_oracle(config: &LlmConfig) -> Result<Arc<dyn OracleProvider>> {
    let provider_kind = config.provider_kind();

    let provider: Arc<dyn OracleProvider> = match provider_kind.as_str() {
        "ollama" => Arc::new(OllamaProvider::new(config)?),
        "anthropic" => Arc::new(AnthropicProvider::new(config)?),
        "openai" => Arc::new(OpenAiProvider::new(config)?),
        _ => {
            return Err(RedactorError::Configuration(format!(
                "Unsupported LLM provider: {}. Supported providers: ollama, anthropic, claude, openai",
                config.provider
            )))
        }
    };

    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        endpoint = %config.endpoint(),
        retries = config.retry.max_retries,
        "LLM provider configured"
    );

    if config.retry.max_retries > 0 {
        Ok(Arc::new(RetryingOracle::new(provider, config.retry.clone())))
    } else {
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_create_ollama_by_default() {
        let oracle = create_oracle(&LlmConfig::default()).unwrap();
        assert_eq!(oracle.provider_name(), "ollama");
        assert_eq!(oracle.model_name(), "gemma-custom");
    }

    #[test]
    fn test_claude_alias() {
        let config = LlmConfig {
            provider: "claude".to_string(),
            api_key: Some(secret_string("k".to_string())),
            ..LlmConfig::default()
        };
        let oracle = create_oracle(&config).unwrap();
        assert_eq!(oracle.provider_name(), "anthropic");
    }

    #[test]
    fn test_unknown_provider() {
        let config = LlmConfig {
            provider: "palm".to_string(),
            ..LlmConfig::default()
        };
        let err = create_oracle(&config).err().unwrap();
        assert!(matches!(err, RedactorError::Configuration(_)));
    }

    #[test]
    fn test_openai_without_key() {
        let config = LlmConfig {
            provider: "openai".to_string(),
            ..LlmConfig::default()
        };
        assert!(create_oracle(&config).is_err());
    }

    #[test]
    fn test_retry_wrapper_keeps_identity() {
        let mut config = LlmConfig::default();
        config.retry.max_retries = 2;
        let oracle = create_oracle(&config).unwrap();
        assert_eq!(oracle.provider_name(), "ollama");
    }
}
