//! Serve command implementation

use crate::adapters::llm::create_oracle;
use crate::cli::{exit_code, resolve_config};
use crate::core::orchestrator::AnonymizationOrchestrator;
use crate::server::{self, AppState};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the configured bind address, e.g. 0.0.0.0:8000
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    /// Execute the serve command
    ///
    /// Returns once `shutdown_signal` flips to `true` and in-flight requests
    /// have finished.
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(exit_code::CONFIG_ERROR);
            }
        };

        if let Some(bind) = &self.bind {
            tracing::info!(bind = %bind, "Overriding bind address from CLI");
            config.server.bind_address = bind.clone();
        }

        let state = match build_state(&config) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("Failed to initialize pipeline: {e}");
                return Ok(super::exit_code_for(&e));
            }
        };

        eprintln!("Listening on http://{}", config.server.bind_address);

        let shutdown = async move {
            loop {
                let requested = *shutdown_signal.borrow();
                if requested || shutdown_signal.changed().await.is_err() {
                    break;
                }
            }
        };

        server::serve(state, &config.server.bind_address, shutdown).await?;
        Ok(exit_code::SUCCESS)
    }
}

fn build_state(config: &crate::config::RedactorConfig) -> crate::domain::Result<AppState> {
    let oracle = create_oracle(&config.llm)?;
    let orchestrator = AnonymizationOrchestrator::from_config(config, oracle.clone())?;
    Ok(AppState::new(
        orchestrator,
        oracle.as_ref(),
        config.orchestration.batch_concurrency,
    ))
}
