use thiserror::Error;

use crate::db::StorageError;

/// Startup and serve-loop errors
///
/// Request handlers use [`crate::utils::AppError`] instead.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open database: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type of server lifecycle functions
pub type Result<T> = std::result::Result<T, ServerError>;
