//! Error types for the proxy
//!
//! Every failure the handler can hit is an `AppError`, and every `AppError`
//! renders as a JSON object with a status code that reflects its category.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("API key not configured")]
    MissingCredential,

    #[error("{0}")]
    BadRequest(String),

    #[error("Upstream returned {status}")]
    Upstream { status: StatusCode, body: String },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Raw upstream body, only for upstream failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            details: None,
            message: None,
        }
    }
}

impl AppError {
    /// Status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => *status,
            AppError::MissingCredential
            | AppError::Json(_)
            | AppError::Http(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is an unexpected failure rather than a refusal
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Json(_) | AppError::Http(_) | AppError::Internal(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::MethodNotAllowed => ErrorResponse::new("Method not allowed"),
            AppError::MissingCredential => ErrorResponse::new("API key not configured"),
            AppError::BadRequest(message) => ErrorResponse {
                message: Some(message),
                ..ErrorResponse::new("Invalid request")
            },
            AppError::Upstream { body, .. } => ErrorResponse {
                details: Some(body),
                ..ErrorResponse::new("API request failed")
            },
            err @ (AppError::Json(_) | AppError::Http(_) | AppError::Internal(_)) => {
                ErrorResponse {
                    message: Some(err.to_string()),
                    ..ErrorResponse::new("Internal server error")
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
