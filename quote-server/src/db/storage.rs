//! redb-based storage for catalog data and saved quotes
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `brands` | `brand_id` | `Brand` | Pricing configuration |
//! | `weight_profiles` | `profile_id` | `WeightProfile` | Shared weight tables |
//! | `products` | `product_id` | `Product` | Generic inventory catalog |
//! | `quotes` | `quote_id` | `Quote` | Saved quotation snapshots |
//! | `counters` | `"quote_count"` / `"quote_date"` | `u64` | Daily quote numbering |
//!
//! Records are stored as JSON. Brands reference weight profiles by id only;
//! deleting a profile never touches the brands pointing at it.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Brand, Product, Quote, WeightProfile};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::utils::AppError;

/// JSON record table: key = record id, value = JSON bytes
pub type JsonTable = TableDefinition<'static, &'static str, &'static [u8]>;

const BRANDS_TABLE: JsonTable = TableDefinition::new("brands");
const WEIGHT_PROFILES_TABLE: JsonTable = TableDefinition::new("weight_profiles");
const PRODUCTS_TABLE: JsonTable = TableDefinition::new("products");
const QUOTES_TABLE: JsonTable = TableDefinition::new("quotes");

/// Table for counters: key = "quote_count" or "quote_date", value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const QUOTE_COUNT_KEY: &str = "quote_count";
const QUOTE_DATE_KEY: &str = "quote_date";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::database(err.to_string())
    }
}

/// A record type living in its own JSON table
pub trait StoredRecord: Serialize + DeserializeOwned {
    const TABLE: JsonTable;
}

impl StoredRecord for Brand {
    const TABLE: JsonTable = BRANDS_TABLE;
}

impl StoredRecord for WeightProfile {
    const TABLE: JsonTable = WEIGHT_PROFILES_TABLE;
}

impl StoredRecord for Product {
    const TABLE: JsonTable = PRODUCTS_TABLE;
}

impl StoredRecord for Quote {
    const TABLE: JsonTable = QUOTES_TABLE;
}

/// Catalog and quote storage backed by redb
#[derive(Clone)]
pub struct CatalogStorage {
    db: Arc<Database>,
}

impl CatalogStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(BRANDS_TABLE)?;
            let _ = write_txn.open_table(WEIGHT_PROFILES_TABLE)?;
            let _ = write_txn.open_table(PRODUCTS_TABLE)?;
            let _ = write_txn.open_table(QUOTES_TABLE)?;
            let _ = write_txn.open_table(COUNTERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Cheap liveness check: open a read transaction and one table
    pub fn ping(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(COUNTERS_TABLE)?;
        Ok(())
    }

    // ========== Records ==========

    /// Insert or replace a record
    pub fn put<T: StoredRecord>(&self, id: &str, record: &T) -> StorageResult<()> {
        let value = serde_json::to_vec(record)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(T::TABLE)?;
            table.insert(id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Insert or replace a record unless another record conflicts with it
    ///
    /// The scan and the insert share one write transaction, so concurrent
    /// writers cannot both pass the check. Returns `false` (nothing written)
    /// when a record under a different id satisfies `conflicts`.
    pub fn put_unless<T, F>(&self, id: &str, record: &T, conflicts: F) -> StorageResult<bool>
    where
        T: StoredRecord,
        F: Fn(&T) -> bool,
    {
        let value = serde_json::to_vec(record)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(T::TABLE)?;
            let mut clash = false;
            for result in table.iter()? {
                let (key, existing) = result?;
                if key.value() == id {
                    continue;
                }
                let existing: T = serde_json::from_slice(existing.value())?;
                if conflicts(&existing) {
                    clash = true;
                    break;
                }
            }
            if clash {
                drop(table);
                txn.abort()?;
                return Ok(false);
            }
            table.insert(id, value.as_slice())?;
        }
        txn.commit()?;
        Ok(true)
    }

    /// Get a record by id
    pub fn get<T: StoredRecord>(&self, id: &str) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(T::TABLE)?;

        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get all records of a table (key order)
    pub fn list<T: StoredRecord>(&self) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(T::TABLE)?;

        let mut records = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    /// Remove a record, returning whether it existed
    pub fn remove<T: StoredRecord>(&self, id: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let existed = {
            let mut table = txn.open_table(T::TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(existed)
    }

    /// Remove several records in one transaction, returning how many existed
    pub fn remove_many<T: StoredRecord>(&self, ids: &[String]) -> StorageResult<usize> {
        let txn = self.db.begin_write()?;
        let mut removed = 0;
        {
            let mut table = txn.open_table(T::TABLE)?;
            for id in ids {
                if table.remove(id.as_str())?.is_some() {
                    removed += 1;
                }
            }
        }
        txn.commit()?;
        Ok(removed)
    }

    // ========== Counters ==========

    /// Next quote sequence number for the given day (YYYYMMDD)
    ///
    /// The counter restarts at 1 when the day changes.
    pub fn next_quote_count(&self, day: u64) -> StorageResult<u64> {
        let txn = self.db.begin_write()?;
        let next = {
            let mut table = txn.open_table(COUNTERS_TABLE)?;
            let stored_day = table.get(QUOTE_DATE_KEY)?.map(|g| g.value());
            let current = if stored_day == Some(day) {
                table.get(QUOTE_COUNT_KEY)?.map(|g| g.value()).unwrap_or(0)
            } else {
                table.insert(QUOTE_DATE_KEY, day)?;
                0
            };
            let next = current + 1;
            table.insert(QUOTE_COUNT_KEY, next)?;
            next
        };
        txn.commit()?;
        Ok(next)
    }
}
