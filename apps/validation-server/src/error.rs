//! Error types for the validation server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared_pdf::ExtractError;
use shared_types::ResponseType;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("You are missing some parameter: {0}")]
    MissingParameters(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] ExtractError),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Validation timeout after {0}ms")]
    Timeout(u64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    #[serde(rename = "type")]
    response_type: ResponseType,
    data: Vec<serde_json::Value>,
    message: String,
    code: &'static str,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::MissingParameters(_) => {
                (StatusCode::BAD_REQUEST, "MISSING_PARAMETERS", self.to_string())
            }
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::InvalidDocument(err) => match err {
                ExtractError::PasswordProtected => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PASSWORD_PROTECTED",
                    err.to_string(),
                ),
                ExtractError::Extraction(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    err.to_string(),
                ),
                _ => (StatusCode::BAD_REQUEST, "INVALID_DOCUMENT", err.to_string()),
            },
            ServerError::DocumentNotFound(id) => (
                StatusCode::NOT_FOUND,
                "DOCUMENT_NOT_FOUND",
                format!("Document '{}' not found", id),
            ),
            ServerError::Timeout(ms) => (
                StatusCode::REQUEST_TIMEOUT,
                "TIMEOUT",
                format!("Validation timeout after {}ms", ms),
            ),
            ServerError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    msg.clone(),
                )
            }
        };

        let body = ErrorResponse {
            response_type: ResponseType::Error,
            data: Vec::new(),
            message,
            code,
        };

        (status, Json(body)).into_response()
    }
}
