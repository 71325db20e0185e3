//! External system integrations for Redactor.
//!
//! - [`llm`] - language model providers behind the [`llm::OracleProvider`] port
//!
//! Adapters isolate external dependencies so the pipeline can be exercised
//! with [`llm::ScriptedOracle`] instead of a live model.
//!
//! ```rust,no_run
//! use redactor::adapters::llm::create_oracle;
//! use redactor::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("redactor.toml")?;
//! let oracle = create_oracle(&config.llm)?;
//! println!("using {} / {}", oracle.provider_name(), oracle.model_name());
//! # Ok(())
//! # }
//! ```

pub mod llm;
