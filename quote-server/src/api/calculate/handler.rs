//! Calculation Handlers

use axum::{Json, extract::State};
use shared::models::{CalculateItemRequest, SteelLineItem};

use crate::core::ServerState;
use crate::db::repository::brand;
use crate::pricing::PricingContext;
use crate::quotes::calculate_single;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};

/// POST /api/calculate/item - price one line without saving anything
pub async fn calculate_item(
    State(state): State<ServerState>,
    Json(payload): Json<CalculateItemRequest>,
) -> AppResult<Json<SteelLineItem>> {
    validate_required_text(&payload.brand_id, "brandId", MAX_SHORT_TEXT_LEN)?;

    let (brand, profile) = brand::load_pricing(&state.storage, payload.brand_id.trim())?;
    let ctx = PricingContext::new(&brand, profile.as_ref());
    let line = calculate_single(&ctx, &payload.item, payload.base_price_override)?;

    tracing::debug!(
        brand = %brand.name,
        size = %line.size,
        unit = %line.input_unit,
        amount = line.calculation.amount,
        "Item calculated"
    );
    Ok(Json(line))
}
