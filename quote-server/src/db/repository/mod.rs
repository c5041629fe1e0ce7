//! Repository Module
//!
//! CRUD operations over [`CatalogStorage`](super::CatalogStorage), one
//! module of free functions per record type.

pub mod brand;
pub mod product;
pub mod quote;
pub mod weight_profile;

use thiserror::Error;

use super::StorageError;
use crate::utils::{AppError, ErrorCode};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{1}")]
    NotFound(ErrorCode, String),

    #[error("{1}")]
    Duplicate(ErrorCode, String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(code, msg) | RepoError::Duplicate(code, msg) => {
                AppError::with_message(code, msg)
            }
            RepoError::Storage(e) => e.into(),
        }
    }
}
