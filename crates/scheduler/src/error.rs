//! Error types for scheduling operations.

use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur while running an engine operation.
///
/// Only persistence and configuration problems are errors. Unknown senders,
/// missing pending requests and an exhausted queue are normal outcomes.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Store read or write failed.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Message sending failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for scheduling operations.
pub type Result<T> = std::result::Result<T, SchedulerError>;
