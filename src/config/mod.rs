//! Configuration management for Redactor.
//!
//! Redactor reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `REDACTOR_<SECTION>_<KEY>` overrides
//! - Validation on load
//!
//! Configuration is resolved once at start-up and handed to the components
//! that need it; nothing in the pipeline reads the environment.
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`LlmConfig`] / [`RetryConfig`] - provider, model, sampling, credentials
//! - [`OrchestrationConfig`] - iteration bound and batch concurrency
//! - [`RiskConfig`] - risk policy name
//! - [`ServerConfig`] - REST bind address
//! - [`AuditConfig`] - hashed audit trail
//! - [`LoggingConfig`] - rolling file logs
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [llm]
//! provider = "anthropic"
//! model = "claude-3-5-sonnet-20241022"
//! api_key = "${ANTHROPIC_API_KEY}"
//! temperature = 0.1
//! max_tokens = 4096
//!
//! [orchestration]
//! max_iterations = 3
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_from_env, parse_config};
pub use schema::{
    ApplicationConfig, AuditConfig, LlmConfig, LoggingConfig, OrchestrationConfig,
    RedactorConfig, RetryConfig, RiskConfig, ServerConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
