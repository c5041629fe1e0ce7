//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative, validate_required_text,
};

/// GET /api/products
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(product::find_all(&state.storage)?))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    Ok(Json(product::get(&state.storage, &id)?))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.unit, "unit", MAX_SHORT_TEXT_LEN)?;
    validate_non_negative(payload.price_per_unit, "pricePerUnit")?;
    if let Some(weight) = payload.unit_weight_kg {
        validate_non_negative(weight, "unitWeightKg")?;
    }

    let created = product::create(&state.storage, payload)?;
    tracing::info!(
        product_id = created.id.as_deref().unwrap_or_default(),
        name = %created.name,
        "Product created"
    );
    Ok(Json(created))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(unit) = &payload.unit {
        validate_required_text(unit, "unit", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(price) = payload.price_per_unit {
        validate_non_negative(price, "pricePerUnit")?;
    }
    if let Some(weight) = payload.unit_weight_kg {
        validate_non_negative(weight, "unitWeightKg")?;
    }

    let updated = product::update(&state.storage, &id, payload)?;
    tracing::info!(product_id = %id, name = %updated.name, "Product updated");
    Ok(Json(updated))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    product::delete(&state.storage, &id)?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(true))
}
