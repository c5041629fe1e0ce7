//! Brand API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Brand, BrandCreate, BrandUpdate, SizeFormula, SizeMap};

use crate::core::ServerState;
use crate::db::repository::brand;
use crate::pricing::{PricingContext, WeightRow};
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_modifier, validate_non_negative,
    validate_required_text, validate_size_map,
};

/// GET /api/brands - all brands, by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Brand>>> {
    let brands = brand::find_all(&state.storage)?;
    Ok(Json(brands))
}

/// GET /api/brands/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Brand>> {
    Ok(Json(brand::get(&state.storage, &id)?))
}

/// GET /api/brands/:id/weights - resolved weight table
pub async fn weights(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<WeightRow>>> {
    let (brand, profile) = brand::load_pricing(&state.storage, &id)?;
    let ctx = PricingContext::new(&brand, profile.as_ref());
    Ok(Json(ctx.weight_table()))
}

/// POST /api/brands
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BrandCreate>,
) -> AppResult<Json<Brand>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_non_negative(payload.base_price, "basePrice")?;
    validate_formulas(&payload.size_price_formula)?;
    validate_size_map(&payload.fixed_price_per_piece, "fixedPricePerPiece")?;
    validate_size_map(&payload.rod_weight_override, "rodWeightOverride")?;
    validate_size_map(&payload.bundle_weight_override, "bundleWeightOverride")?;

    let created = brand::create(&state.storage, payload)?;
    tracing::info!(
        brand_id = created.id.as_deref().unwrap_or_default(),
        name = %created.name,
        "Brand created"
    );
    Ok(Json(created))
}

/// PUT /api/brands/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BrandUpdate>,
) -> AppResult<Json<Brand>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.base_price {
        validate_non_negative(price, "basePrice")?;
    }
    if let Some(formulas) = &payload.size_price_formula {
        validate_formulas(formulas)?;
    }
    if let Some(prices) = &payload.fixed_price_per_piece {
        validate_size_map(prices, "fixedPricePerPiece")?;
    }
    if let Some(weights) = &payload.rod_weight_override {
        validate_size_map(weights, "rodWeightOverride")?;
    }
    if let Some(weights) = &payload.bundle_weight_override {
        validate_size_map(weights, "bundleWeightOverride")?;
    }

    let updated = brand::update(&state.storage, &id, payload)?;
    tracing::info!(brand_id = %id, name = %updated.name, "Brand updated");
    Ok(Json(updated))
}

/// DELETE /api/brands/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    brand::delete(&state.storage, &id)?;
    tracing::info!(brand_id = %id, "Brand deleted");
    Ok(Json(true))
}

fn validate_formulas(formulas: &SizeMap<SizeFormula>) -> AppResult<()> {
    for (size, formula) in formulas {
        validate_required_text(size, "sizePriceFormula", MAX_SHORT_TEXT_LEN)?;
        validate_modifier(formula.modifier, &format!("sizePriceFormula.{size}.modifier"))?;
    }
    Ok(())
}
