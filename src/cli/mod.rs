//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Redactor using clap.

pub mod commands;

use crate::config::{load_config, load_from_env, RedactorConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Configuration file used when `--config` is not given and the file exists
pub const DEFAULT_CONFIG_PATH: &str = "redactor.toml";

/// Process exit codes
pub mod exit_code {
    /// Completed and verified
    pub const SUCCESS: i32 = 0;
    /// Completed, but verification still reports residual identifiers
    pub const UNVERIFIED: i32 = 1;
    /// Configuration missing or invalid
    pub const CONFIG_ERROR: i32 = 2;
    /// The pipeline raised an error
    pub const PIPELINE_ERROR: i32 = 3;
    /// Anything else
    pub const FATAL: i32 = 5;
}

/// Redactor - LLM-assisted PII anonymization
#[derive(Parser, Debug)]
#[command(name = "redactor")]
#[command(version, about, long_about = None)]
#[command(author = "Redactor Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "REDACTOR_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "REDACTOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize a single document
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Anonymize many documents from a JSON or JSON-lines file
    Batch(commands::batch::BatchArgs),

    /// Run the REST API server
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Resolve configuration from `path`, the default file, or the environment
///
/// An explicit path must exist. Without one, `redactor.toml` is read when
/// present; otherwise defaults plus `REDACTOR_*` overrides are used.
pub fn resolve_config(path: Option<&str>) -> Result<RedactorConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => load_from_env(),
    }
}
