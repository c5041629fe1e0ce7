//! Vendor Import Handlers

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::models::InputUnit;
use shared::util::now_millis;

use crate::core::ServerState;
use crate::db::repository::brand;
use crate::import::{ImportPlan, parse_extraction, plan_import};
use crate::pricing::PricingContext;
use crate::quotes::default_unit;
use crate::utils::validation::{MAX_URL_LEN, validate_optional_text, validate_required_text};
use crate::utils::AppResult;

/// Upper bound on the raw extraction text
const MAX_EXTRACTION_LEN: usize = 512 * 1024;

/// Import request: raw extraction text plus the brand to match sizes against
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorImportRequest {
    #[serde(default)]
    pub brand_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub vendor_bill_url: Option<String>,
}

/// POST /api/import/vendor - turn an extracted bill into draft lines
///
/// Without a brand every line becomes a generic product line.
pub async fn import_vendor(
    State(state): State<ServerState>,
    Json(payload): Json<VendorImportRequest>,
) -> AppResult<Json<ImportPlan>> {
    validate_required_text(&payload.text, "text", MAX_EXTRACTION_LEN)?;
    validate_optional_text(&payload.vendor_bill_url, "vendorBillUrl", MAX_URL_LEN)?;

    let extraction = parse_extraction(&payload.text)?;

    let pricing = match payload.brand_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(brand::load_pricing(&state.storage, id)?),
        _ => None,
    };
    let ctx = pricing
        .as_ref()
        .map(|(brand, profile)| PricingContext::new(brand, profile.as_ref()));

    let sizes: Vec<&str> = ctx
        .as_ref()
        .map(|ctx| ctx.sizes().into_iter().collect())
        .unwrap_or_default();
    let unit = ctx
        .as_ref()
        .map(|ctx| default_unit(ctx.brand))
        .unwrap_or(InputUnit::Kg);

    let plan = plan_import(
        &extraction,
        &sizes,
        unit,
        payload.vendor_bill_url.filter(|u| !u.trim().is_empty()),
        now_millis(),
    );

    tracing::info!(
        vendor = plan.vendor.vendor.as_deref().unwrap_or("-"),
        extracted = extraction.items.len(),
        steel = plan.steel_items.len(),
        products = plan.products.len(),
        "Vendor bill imported"
    );
    Ok(Json(plan))
}
