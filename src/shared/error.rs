//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::services::ExecutionError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Execution(e) => {
                tracing::error!(error = %e, "Code execution failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.public_message().to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
