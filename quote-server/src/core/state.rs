use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;

use crate::core::{Config, Result};
use crate::db::CatalogStorage;

/// Server state shared by every handler
///
/// Cheap to clone: the storage handle is reference counted.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | storage | CatalogStorage | redb catalog and quotes |
/// | started_at | Instant | uptime for health checks |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub storage: CatalogStorage,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, storage: CatalogStorage) -> Self {
        Self {
            config,
            storage,
            started_at: Instant::now(),
        }
    }

    /// Initialize server state
    ///
    /// 1. Ensure the work directory exists
    /// 2. Open (or create) `work_dir/quotes.redb`
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .with_context(|| format!("Failed to create work dir {}", config.work_dir))?;

        let db_path = config.database_path();
        let storage = CatalogStorage::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "Database opened");

        Ok(Self::new(config.clone(), storage))
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
