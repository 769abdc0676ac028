//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`; the `IntoResponse` impl maps
//! each error to its HTTP status and JSON body, capturing delivery failures
//! to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::preorder::ValidationErrors;
use crate::services::email::EmailError;

/// Generic message returned to callers when delivery fails. The underlying
/// cause is logged for the operator, never surfaced to the client.
pub const GENERIC_DELIVERY_ERROR: &str = "Failed to process pre-order";

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Submission failed field validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Outbound email delivery failed.
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture delivery failures to Sentry
        if matches!(self, Self::Email(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match self {
            Self::Validation(errors) => {
                tracing::debug!(
                    fields = errors.fields().len(),
                    "Submission failed validation"
                );
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({
                        "error": "Please correct the highlighted fields",
                        "fields": errors.fields(),
                    })),
                )
                    .into_response()
            }
            // Don't expose the delivery failure cause to clients
            Self::Email(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": GENERIC_DELIVERY_ERROR })),
            )
                .into_response(),
            Self::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Not found" })),
            )
                .into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
