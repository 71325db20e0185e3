//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RedactorConfig;
use super::secret::secret_string_opt;
use crate::domain::errors::RedactorError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into [`RedactorConfig`]
/// 4. Applies environment variable overrides (REDACTOR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`RedactorError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use redactor::config::load_config;
///
/// let config = load_config("redactor.toml")?;
/// println!("provider: {}", config.llm.provider);
/// # Ok::<(), redactor::domain::RedactorError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RedactorConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RedactorError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RedactorError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Builds a configuration from defaults plus `REDACTOR_*` overrides
///
/// Used when no configuration file is given.
///
/// # Errors
///
/// Returns [`RedactorError::Configuration`] if the resulting configuration
/// does not validate.
pub fn load_from_env() -> Result<RedactorConfig> {
    let mut config = RedactorConfig::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file handling.
pub fn parse_config(contents: &str) -> Result<RedactorConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RedactorConfig = toml::from_str(&contents)
        .map_err(|e| RedactorError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

fn validate(config: &RedactorConfig) -> Result<()> {
    config.validate().map_err(|e| {
        RedactorError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment variable pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Every missing variable is reported in
/// a single error.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RedactorError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the REDACTOR_* prefix
///
/// Variables follow the pattern `REDACTOR_<SECTION>_<KEY>`, for example
/// `REDACTOR_LLM_PROVIDER` or `REDACTOR_ORCHESTRATION_MAX_ITERATIONS`.
/// Unparseable numeric values are ignored. When no API key is configured,
/// the provider's conventional variable (`ANTHROPIC_API_KEY`,
/// `OPENAI_API_KEY`, `OLLAMA_AUTH_TOKEN`) is used.
fn apply_env_overrides(config: &mut RedactorConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("REDACTOR_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // LLM overrides
    if let Ok(val) = std::env::var("REDACTOR_LLM_PROVIDER") {
        config.llm.provider = val;
    }
    if let Ok(val) = std::env::var("REDACTOR_LLM_MODEL") {
        config.llm.model = Some(val);
    }
    if let Ok(val) = std::env::var("REDACTOR_LLM_BASE_URL") {
        config.llm.base_url = Some(val);
    }
    if let Ok(val) = std::env::var("REDACTOR_LLM_TEMPERATURE") {
        if let Ok(temperature) = val.parse() {
            config.llm.temperature = temperature;
        }
    }
    if let Ok(val) = std::env::var("REDACTOR_LLM_MAX_TOKENS") {
        if let Ok(max_tokens) = val.parse() {
            config.llm.max_tokens = max_tokens;
        }
    }
    if let Ok(val) = std::env::var("REDACTOR_LLM_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.llm.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("REDACTOR_LLM_RETRY_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.llm.retry.max_retries = retries;
        }
    }
    if let Some(key) = secret_string_opt(std::env::var("REDACTOR_LLM_API_KEY").ok()) {
        config.llm.api_key = Some(key);
    }
    if config.llm.api_key.is_none() {
        let fallback = match config.llm.provider_kind().as_str() {
            "anthropic" => "ANTHROPIC_API_KEY",
            "openai" => "OPENAI_API_KEY",
            _ => "OLLAMA_AUTH_TOKEN",
        };
        config.llm.api_key = secret_string_opt(std::env::var(fallback).ok());
    }

    // Orchestration overrides
    if let Ok(val) = std::env::var("REDACTOR_ORCHESTRATION_MAX_ITERATIONS") {
        if let Ok(iterations) = val.parse() {
            config.orchestration.max_iterations = iterations;
        }
    }
    if let Ok(val) = std::env::var("REDACTOR_ORCHESTRATION_BATCH_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.orchestration.batch_concurrency = concurrency;
        }
    }

    // Risk overrides
    if let Ok(val) = std::env::var("REDACTOR_RISK_POLICY") {
        config.risk.policy = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("REDACTOR_SERVER_BIND_ADDRESS") {
        config.server.bind_address = val;
    }

    // Audit overrides
    if let Ok(val) = std::env::var("REDACTOR_AUDIT_ENABLED") {
        config.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("REDACTOR_AUDIT_LOG_PATH") {
        config.audit.log_path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("REDACTOR_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("REDACTOR_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("REDACTOR_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
