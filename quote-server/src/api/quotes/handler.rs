//! Quote API Handlers
//!
//! Every write recalculates the whole quote from the draft against the
//! brand as it is stored right now; client-side totals are never trusted.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{
    Brand, BulkDeleteRequest, Quote, QuoteDraft, QuoteLineItem, QuoteTotals, WeightProfile,
};
use shared::util::{new_id, now_millis};

use crate::core::ServerState;
use crate::db::repository::{brand, quote};
use crate::pricing::PricingContext;
use crate::quotes::{AssembledQuote, QuoteFilter, QuoteStamp, assemble, build_quote};
use crate::utils::AppResult;
use crate::utils::time::{day_end_millis, day_start_millis, parse_date};

/// Query params for listing quotes
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub customer_name: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub date_from: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub date_to: Option<String>,
}

/// Items and totals of a draft, nothing saved
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePreview {
    pub items: Vec<QuoteLineItem>,
    #[serde(flatten)]
    pub totals: QuoteTotals,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

/// GET /api/quotes - newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Quote>>> {
    let filter = QuoteFilter {
        customer_name: query.customer_name,
        date_from: non_blank(query.date_from.as_deref())
            .map(|d| parse_date(d, "dateFrom").map(day_start_millis))
            .transpose()?,
        date_to: non_blank(query.date_to.as_deref())
            .map(|d| parse_date(d, "dateTo").map(day_end_millis))
            .transpose()?,
    };
    Ok(Json(quote::find_all(&state.storage, &filter)?))
}

/// GET /api/quotes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Quote>> {
    Ok(Json(quote::get(&state.storage, &id)?))
}

/// POST /api/quotes/preview
pub async fn preview(
    State(state): State<ServerState>,
    Json(draft): Json<QuoteDraft>,
) -> AppResult<Json<QuotePreview>> {
    let AssembledQuote { items, totals } = assemble_draft(&state, &draft)?;
    Ok(Json(QuotePreview { items, totals }))
}

/// POST /api/quotes
pub async fn create(
    State(state): State<ServerState>,
    Json(draft): Json<QuoteDraft>,
) -> AppResult<Json<Quote>> {
    let assembled = assemble_draft(&state, &draft)?;

    let now = now_millis();
    let stamp = QuoteStamp {
        id: new_id(),
        quote_no: quote::next_quote_no(&state.storage, &state.config.quote_no_prefix, now)?,
        date: now,
        created_at: now,
        updated_at: now,
    };
    let saved = build_quote(draft, assembled, stamp);
    quote::save(&state.storage, &saved)?;

    tracing::info!(
        quote_id = saved.id.as_deref().unwrap_or_default(),
        quote_no = %saved.quote_no,
        customer = %saved.customer.customer_name,
        items = saved.items.len(),
        total = saved.totals.total,
        "Quote created"
    );
    Ok(Json(saved))
}

/// PUT /api/quotes/:id - replace; number, date and creation time are kept
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(draft): Json<QuoteDraft>,
) -> AppResult<Json<Quote>> {
    let existing = quote::get(&state.storage, &id)?;
    let assembled = assemble_draft(&state, &draft)?;

    let stamp = QuoteStamp {
        id: id.clone(),
        quote_no: existing.quote_no,
        date: existing.date,
        created_at: existing.created_at,
        updated_at: now_millis(),
    };
    let saved = build_quote(draft, assembled, stamp);
    quote::save(&state.storage, &saved)?;

    tracing::info!(
        quote_id = %id,
        quote_no = %saved.quote_no,
        total = saved.totals.total,
        "Quote updated"
    );
    Ok(Json(saved))
}

/// DELETE /api/quotes/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    quote::delete(&state.storage, &id)?;
    tracing::info!(quote_id = %id, "Quote deleted");
    Ok(Json(true))
}

/// POST /api/quotes/bulk-delete - unknown ids are skipped
pub async fn bulk_delete(
    State(state): State<ServerState>,
    Json(payload): Json<BulkDeleteRequest>,
) -> AppResult<Json<BulkDeleteResponse>> {
    let deleted = quote::delete_many(&state.storage, &payload.ids)?;
    tracing::info!(requested = payload.ids.len(), deleted, "Quotes bulk deleted");
    Ok(Json(BulkDeleteResponse { deleted }))
}

/// Load the draft's brand (if any) and assemble the quote
fn assemble_draft(state: &ServerState, draft: &QuoteDraft) -> AppResult<AssembledQuote> {
    let pricing: Option<(Brand, Option<WeightProfile>)> = non_blank(draft.brand_id.as_deref())
        .map(|id| brand::load_pricing(&state.storage, id))
        .transpose()?;
    let ctx = pricing
        .as_ref()
        .map(|(brand, profile)| PricingContext::new(brand, profile.as_ref()));
    assemble(draft, ctx.as_ref())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
