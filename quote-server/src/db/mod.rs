//! Persistence (redb)

pub mod repository;
mod storage;

pub use repository::{RepoError, RepoResult};
pub use storage::{CatalogStorage, JsonTable, StorageError, StorageResult, StoredRecord};
