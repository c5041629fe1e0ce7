//! Quote Repository

use shared::models::Quote;

use super::{RepoError, RepoResult};
use crate::db::CatalogStorage;
use crate::quotes::{QuoteFilter, filter_quotes, format_quote_no};
use crate::utils::ErrorCode;
use crate::utils::time::date_stamp;

/// Quotes matching the filter, newest first
pub fn find_all(storage: &CatalogStorage, filter: &QuoteFilter) -> RepoResult<Vec<Quote>> {
    Ok(filter_quotes(storage.list()?, filter))
}

pub fn get(storage: &CatalogStorage, id: &str) -> RepoResult<Quote> {
    storage.get(id)?.ok_or_else(|| not_found(id))
}

/// Insert or replace a quote snapshot
pub fn save(storage: &CatalogStorage, quote: &Quote) -> RepoResult<()> {
    let id = quote.id.as_deref().unwrap_or_default();
    storage.put(id, quote)?;
    Ok(())
}

pub fn delete(storage: &CatalogStorage, id: &str) -> RepoResult<()> {
    if !storage.remove::<Quote>(id)? {
        return Err(not_found(id));
    }
    Ok(())
}

/// Delete several quotes, returning how many existed
pub fn delete_many(storage: &CatalogStorage, ids: &[String]) -> RepoResult<usize> {
    Ok(storage.remove_many::<Quote>(ids)?)
}

/// Allocate the next quote number for the day of `now`
pub fn next_quote_no(storage: &CatalogStorage, prefix: &str, now: i64) -> RepoResult<String> {
    let stamp = date_stamp(now);
    let day = stamp.parse::<u64>().unwrap_or_default();
    let sequence = storage.next_quote_count(day)?;
    Ok(format_quote_no(prefix, &stamp, sequence))
}

fn not_found(id: &str) -> RepoError {
    RepoError::NotFound(ErrorCode::QuoteNotFound, format!("Quote {id} not found"))
}
