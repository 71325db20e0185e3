//! REST API
//!
//! | Method | Path                     | Purpose                         |
//! |--------|--------------------------|---------------------------------|
//! | POST   | `/api/v1/anonymize`       | Anonymize one document          |
//! | POST   | `/api/v1/anonymize/batch` | Anonymize a list of documents   |
//! | GET    | `/health`                 | Liveness                        |
//! | GET    | `/ready`                  | Resolved provider and pipeline  |
//!
//! Status codes: 200 for completed runs and for unparseable oracle output
//! (with `success = false`), 422 for empty text, 502 when the language model
//! cannot be reached, 500 otherwise.

pub mod error;
pub mod handlers;
pub mod schemas;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use crate::domain::Result;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/anonymize", post(handlers::anonymize))
        .route("/api/v1/anonymize/batch", post(handlers::anonymize_batch))
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the API on `bind_address` until `shutdown` completes
///
/// In-flight requests are allowed to finish after `shutdown` resolves.
///
/// # Errors
///
/// Returns [`crate::domain::RedactorError::Io`] when the address cannot be
/// bound or the server fails.
pub async fn serve<F>(state: AppState, bind_address: &str, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!(address = %bind_address, "Starting HTTP server");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
