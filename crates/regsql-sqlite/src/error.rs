//! Error types for query execution.

use thiserror::Error;

/// Errors returned by [`SqliteExecutor`](crate::SqliteExecutor).
#[derive(Debug, Error)]
pub enum ExecError {
    /// Database error from sqlx, including SQL the engine rejected.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A query expected to return a row returned none.
    #[error("no row returned")]
    NotFound,

    /// The executor configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for execution operations.
pub type Result<T> = std::result::Result<T, ExecError>;
