//! Error types for the roster web server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use scheduler::SchedulerError;
use thiserror::Error;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum WebError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Engine error.
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Missing or wrong cron bearer token.
    #[error("Unauthorized")]
    Unauthorized,
}

fn database_status(err: &DatabaseError) -> StatusCode {
    match err {
        DatabaseError::Validation(_) => StatusCode::BAD_REQUEST,
        DatabaseError::NotFound { .. } => StatusCode::NOT_FOUND,
        DatabaseError::AlreadyExists { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::Database(err) | WebError::Scheduler(SchedulerError::Database(err)) => {
                database_status(err)
            }
            WebError::Scheduler(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, WebError>;
