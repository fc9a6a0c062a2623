//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::batch::BatchError;
use crate::llm::CompletionError;
use crate::render::RenderError;

/// Flat error body: `{"error": CODE, "message": ..., "details": [...]}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required input: {0}")]
    MissingInput(String),
    #[error("Batch contains no records")]
    EmptyBatch,
    #[error("Report generation failed: {0}")]
    Generation(String),
    #[error("Generated report failed validation")]
    Validation(Vec<String>),
    #[error("Document rendering failed: {0}")]
    Render(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::MissingInput(detail) => (
                StatusCode::BAD_REQUEST,
                "MISSING_INPUT",
                detail,
                None,
            ),
            ApiError::EmptyBatch => (
                StatusCode::BAD_REQUEST,
                "EMPTY_BATCH",
                "Batch contains no records".to_string(),
                None,
            ),
            ApiError::Generation(detail) => {
                tracing::error!(detail, "report generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_FAILED",
                    detail,
                    None,
                )
            }
            ApiError::Validation(violations) => {
                tracing::error!(?violations, "generated report failed validation");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "VALIDATION_FAILED",
                    "Generated report failed validation".to_string(),
                    Some(violations),
                )
            }
            ApiError::Render(detail) => {
                tracing::error!(detail, "document rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
                    detail,
                    None,
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: code,
            message,
            details,
        };
        (status, Json(body)).into_response()
    }
}

impl From<CompletionError> for ApiError {
    fn from(err: CompletionError) -> Self {
        ApiError::Generation(err.to_string())
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::Render(err.to_string())
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::Completion(e) => e.into(),
            BatchError::Validation(violations) => {
                ApiError::Validation(violations.iter().map(|v| v.to_string()).collect())
            }
            BatchError::Render(e) => e.into(),
            BatchError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}
