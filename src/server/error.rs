//! Mapping of pipeline errors to HTTP responses

use super::schemas::ErrorResponse;
use crate::domain::RedactorError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// A pipeline error on its way to the client
#[derive(Debug)]
pub struct ApiError(pub RedactorError);

impl ApiError {
    /// HTTP status for the wrapped error
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RedactorError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RedactorError::Oracle(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RedactorError> for ApiError {
    fn from(err: RedactorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            crate::log_error_with_context!(&self.0, "Request failed");
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
            kind: self.0.kind().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
