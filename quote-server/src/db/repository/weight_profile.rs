//! Weight Profile Repository

use shared::models::{WeightProfile, WeightProfileCreate, WeightProfileUpdate};
use shared::util::new_id;

use super::{RepoError, RepoResult};
use crate::db::CatalogStorage;
use crate::utils::ErrorCode;

pub fn find_all(storage: &CatalogStorage) -> RepoResult<Vec<WeightProfile>> {
    let mut profiles: Vec<WeightProfile> = storage.list()?;
    profiles.sort_by_key(|p| p.name.to_lowercase());
    Ok(profiles)
}

pub fn find_by_id(storage: &CatalogStorage, id: &str) -> RepoResult<Option<WeightProfile>> {
    Ok(storage.get(id)?)
}

pub fn get(storage: &CatalogStorage, id: &str) -> RepoResult<WeightProfile> {
    find_by_id(storage, id)?.ok_or_else(|| not_found(id))
}

pub fn create(storage: &CatalogStorage, data: WeightProfileCreate) -> RepoResult<WeightProfile> {
    let id = new_id();
    let profile = WeightProfile {
        id: Some(id.clone()),
        name: data.name.trim().to_string(),
        rod_weight_kg: data.rod_weight_kg,
        rods_per_bundle: data.rods_per_bundle,
    };
    storage.put(&id, &profile)?;
    Ok(profile)
}

/// Absent fields stay untouched; map fields replace the whole map
pub fn update(storage: &CatalogStorage, id: &str, data: WeightProfileUpdate) -> RepoResult<WeightProfile> {
    let mut profile = get(storage, id)?;
    if let Some(name) = data.name {
        profile.name = name.trim().to_string();
    }
    if let Some(weights) = data.rod_weight_kg {
        profile.rod_weight_kg = weights;
    }
    if let Some(counts) = data.rods_per_bundle {
        profile.rods_per_bundle = counts;
    }
    storage.put(id, &profile)?;
    Ok(profile)
}

/// Brands still referencing the profile are left as they are
pub fn delete(storage: &CatalogStorage, id: &str) -> RepoResult<()> {
    if !storage.remove::<WeightProfile>(id)? {
        return Err(not_found(id));
    }
    Ok(())
}

fn not_found(id: &str) -> RepoError {
    RepoError::NotFound(
        ErrorCode::WeightProfileNotFound,
        format!("Weight profile {id} not found"),
    )
}
