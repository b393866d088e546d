use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use cadenza_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{ "error": ... }` JSON
/// bodies the booking client expects. User-visible messages are short and
/// non-technical; internal detail goes to the logs only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cadenza_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx outside the submission pipeline.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The caller exceeded its rate-limit window.
    #[error("Rate limited")]
    RateLimited,

    /// The booking row could not be persisted. Distinct from validation:
    /// the input was fine, storage was not. Detail is logged at the call
    /// site before this variant is constructed.
    #[error("Booking persistence failed")]
    Persistence,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Something went wrong. Please try again.".to_string(),
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please try again later.".to_string(),
            ),

            AppError::Persistence => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save booking. Please try again.".to_string(),
            ),
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and a sanitized message.
///
/// `RowNotFound` maps to 404; everything else maps to 500 with a generic
/// message, logged in full server-side.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again.".to_string(),
            )
        }
    }
}
