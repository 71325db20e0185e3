//! Configuration schema types
//!
//! Every section has defaults, so an empty file is a valid configuration
//! that talks to a local Ollama server.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Provider names accepted by `llm.provider`
pub const SUPPORTED_PROVIDERS: [&str; 4] = ["ollama", "anthropic", "claude", "openai"];

/// Risk policies accepted by `risk.policy`
pub const SUPPORTED_RISK_POLICIES: [&str; 1] = ["negligible"];

/// Main Redactor configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Language model provider
    #[serde(default)]
    pub llm: LlmConfig,

    /// Detection/verification loop bounds
    #[serde(default)]
    pub orchestration: OrchestrationConfig,

    /// Risk policy selection
    #[serde(default)]
    pub risk: RiskConfig,

    /// REST server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Hashed audit trail
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RedactorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.llm.validate()?;
        self.orchestration.validate()?;
        self.risk.validate()?;
        self.server.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Transport retry configuration for the language model client
///
/// Retries are off by default: the pipeline reports oracle failures to its
/// caller unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    #[serde(default)]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err("llm.retry.max_retries must be <= 10".to_string());
        }
        if self.backoff_multiplier < 1.0 {
            return Err("llm.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err("llm.retry.initial_delay_ms must be <= max_delay_ms".to_string());
        }
        Ok(())
    }
}

/// Language model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name: ollama, anthropic (alias claude) or openai
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Sampling temperature (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Provider endpoint; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// API key or bearer token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_llm_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Transport retry policy
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: None,
            api_key: None,
            timeout_seconds: default_llm_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

impl LlmConfig {
    /// Lower-cased provider name with `claude` folded into `anthropic`
    pub fn provider_kind(&self) -> String {
        match self.provider.to_lowercase().as_str() {
            "claude" => "anthropic".to_string(),
            other => other.to_string(),
        }
    }

    /// Configured model, or the provider's default
    pub fn model_name(&self) -> String {
        if let Some(model) = self.model.as_deref().filter(|m| !m.trim().is_empty()) {
            return model.to_string();
        }
        match self.provider_kind().as_str() {
            "anthropic" => "claude-3-5-sonnet-20241022".to_string(),
            "openai" => "gpt-4".to_string(),
            _ => "gemma-custom".to_string(),
        }
    }

    /// Configured endpoint, or the provider's default
    pub fn endpoint(&self) -> String {
        if let Some(url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return url.trim_end_matches('/').to_string();
        }
        match self.provider_kind().as_str() {
            "anthropic" => "https://api.anthropic.com".to_string(),
            "openai" => "https://api.openai.com".to_string(),
            _ => "http://localhost:11434".to_string(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        let provider = self.provider.to_lowercase();
        if !SUPPORTED_PROVIDERS.contains(&provider.as_str()) {
            return Err(format!(
                "Invalid llm.provider '{}'. Must be one of: {}",
                self.provider,
                SUPPORTED_PROVIDERS.join(", ")
            ));
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err("llm.temperature must be between 0.0 and 1.0".to_string());
        }

        if self.max_tokens == 0 {
            return Err("llm.max_tokens must be > 0".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("llm.timeout_seconds must be > 0".to_string());
        }

        if let Some(ref base_url) = self.base_url {
            let parsed = url::Url::parse(base_url)
                .map_err(|e| format!("Invalid llm.base_url '{base_url}': {e}"))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(format!(
                    "llm.base_url must use http or https, got '{}'",
                    parsed.scheme()
                ));
            }
        }

        self.retry.validate()
    }
}

/// Detection/verification loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    /// Maximum detection/verification pairs per document (1 - 10)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Documents processed concurrently in a batch (1 - 64)
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

impl OrchestrationConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=10).contains(&self.max_iterations) {
            return Err("orchestration.max_iterations must be between 1 and 10".to_string());
        }
        if !(1..=64).contains(&self.batch_concurrency) {
            return Err("orchestration.batch_concurrency must be between 1 and 64".to_string());
        }
        Ok(())
    }
}

/// Risk policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Policy name
    #[serde(default = "default_risk_policy")]
    pub policy: String,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            policy: default_risk_policy(),
        }
    }
}

impl RiskConfig {
    fn validate(&self) -> Result<(), String> {
        if !SUPPORTED_RISK_POLICIES.contains(&self.policy.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid risk.policy '{}'. Must be one of: {}",
                self.policy,
                SUPPORTED_RISK_POLICIES.join(", ")
            ));
        }
        Ok(())
    }
}

/// REST server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.bind_address.parse::<SocketAddr>().map_err(|e| {
            format!(
                "Invalid server.bind_address '{}': {}",
                self.bind_address, e
            )
        })?;
        Ok(())
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Write one audit line per processed document
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: String,

    /// Write JSON lines instead of plain text
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.trim().is_empty() {
            return Err("audit.log_path must be set when audit.enabled = true".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_llm_timeout_seconds() -> u64 {
    120
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_max_iterations() -> u32 {
    3
}

fn default_batch_concurrency() -> usize {
    4
}

fn default_risk_policy() -> String {
    "negligible".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_audit_log_path() -> String {
    "./audit/redactor-audit.log".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
