//! Weight Profile API Handlers
//!
//! Deleting a profile leaves referencing brands untouched; their sizes
//! simply resolve without profile weights afterwards.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{SizeMap, WeightProfile, WeightProfileCreate, WeightProfileUpdate};

use crate::core::ServerState;
use crate::db::repository::weight_profile;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text, validate_size_map,
};

/// GET /api/weight-profiles
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<WeightProfile>>> {
    Ok(Json(weight_profile::find_all(&state.storage)?))
}

/// GET /api/weight-profiles/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<WeightProfile>> {
    Ok(Json(weight_profile::get(&state.storage, &id)?))
}

/// POST /api/weight-profiles
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<WeightProfileCreate>,
) -> AppResult<Json<WeightProfile>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_size_map(&payload.rod_weight_kg, "rodWeightKg")?;
    validate_count_keys(&payload.rods_per_bundle)?;

    let profile = weight_profile::create(&state.storage, payload)?;
    tracing::info!(
        profile_id = profile.id.as_deref().unwrap_or_default(),
        name = %profile.name,
        sizes = profile.rod_weight_kg.len(),
        "Weight profile created"
    );
    Ok(Json(profile))
}

/// PUT /api/weight-profiles/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<WeightProfileUpdate>,
) -> AppResult<Json<WeightProfile>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(weights) = &payload.rod_weight_kg {
        validate_size_map(weights, "rodWeightKg")?;
    }
    if let Some(counts) = &payload.rods_per_bundle {
        validate_count_keys(counts)?;
    }

    let profile = weight_profile::update(&state.storage, &id, payload)?;
    tracing::info!(profile_id = %id, name = %profile.name, "Weight profile updated");
    Ok(Json(profile))
}

/// DELETE /api/weight-profiles/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    weight_profile::delete(&state.storage, &id)?;
    tracing::info!(profile_id = %id, "Weight profile deleted");
    Ok(Json(true))
}

// Counts are u32 already; only the size keys need checking
fn validate_count_keys(counts: &SizeMap<u32>) -> AppResult<()> {
    for size in counts.keys() {
        validate_required_text(size, "rodsPerBundle", MAX_SHORT_TEXT_LEN)?;
    }
    Ok(())
}
