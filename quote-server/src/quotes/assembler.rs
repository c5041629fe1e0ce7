//! Quote Assembly
//!
//! Turns a [`QuoteDraft`] into validated, fully recalculated line items and
//! totals. Pure: the caller resolves the brand snapshot beforehand and
//! decides whether the result gets saved.

use shared::models::{
    Brand, CustomerDetails, InputUnit, ItemRequest, ProductLineItem, ProductLineRequest, QuoteDraft,
    QuoteLineItem, QuoteTotals, SteelLineItem,
};

use crate::pricing::{
    LineInput, PricingContext, QuoteAdjustments, calculate_item, calculate_quote_totals,
    loading_charge_from_rate, product_line_amount, total_weight_kg,
};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN,
    parse_quantity, validate_non_negative, validate_optional_text, validate_percent,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Validated steel line, ready for the engine
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLine {
    pub size: String,
    pub unit: InputUnit,
    pub qty: f64,
}

impl ValidatedLine {
    fn as_input(&self) -> LineInput<'_> {
        LineInput {
            size: &self.size,
            unit: self.unit,
            qty: self.qty,
        }
    }
}

/// Line items and totals of an assembled quote
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledQuote {
    pub items: Vec<QuoteLineItem>,
    pub totals: QuoteTotals,
}

// ==================== Units ====================

/// Unit a brand's lines are entered in when nothing else is given
pub fn default_unit(brand: &Brand) -> InputUnit {
    if brand.sells_by_count {
        InputUnit::Nos
    } else {
        InputUnit::Kg
    }
}

/// Unit a steel line is calculated in inside a quote
///
/// Count-priced brands always use pieces. Otherwise the quote-wide unit,
/// when set, replaces the line's own unit.
pub fn effective_unit(brand: &Brand, requested: Option<InputUnit>, global: Option<InputUnit>) -> InputUnit {
    if brand.sells_by_count {
        return InputUnit::Nos;
    }
    global.or(requested).unwrap_or(InputUnit::Kg)
}

/// Parse an optional unit string; blank means "not given"
pub fn parse_unit(raw: Option<&str>, field: &str) -> AppResult<Option<InputUnit>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<InputUnit>()
            .map(Some)
            .map_err(|e| AppError::invalid_input(field, e.message)),
    }
}

// ==================== Line validation ====================

/// Validate one steel line request
///
/// `field` prefixes the reported field names (e.g. `steelItems[2]`).
pub fn validate_line(request: &ItemRequest, field: &str) -> AppResult<(String, Option<InputUnit>, f64)> {
    let size = request.size.trim();
    validate_required_text(size, &format!("{field}.size"), MAX_SHORT_TEXT_LEN)?;
    let unit = parse_unit(request.input_unit.as_deref(), &format!("{field}.inputUnit"))?;
    let qty = parse_quantity(&request.input_qty, &format!("{field}.inputQty"))?;
    Ok((size.to_string(), unit, qty))
}

/// Calculate one steel line in the requested unit (single item calculation)
pub fn calculate_single(
    ctx: &PricingContext<'_>,
    request: &ItemRequest,
    base_price_override: Option<f64>,
) -> AppResult<SteelLineItem> {
    if let Some(price) = base_price_override {
        validate_non_negative(price, "basePriceOverride")?;
    }
    let (size, unit, qty) = validate_line(request, "item")?;
    let line = ValidatedLine {
        size,
        unit: unit.unwrap_or_else(|| default_unit(ctx.brand)),
        qty,
    };
    Ok(steel_line(ctx, &line, base_price_override))
}

/// Recalculate every line for the brand in `ctx`, dropping empty lines
///
/// Order-independent: each line only depends on the brand snapshot.
pub fn recalculate_items(
    ctx: &PricingContext<'_>,
    lines: &[ValidatedLine],
    base_price_override: Option<f64>,
) -> Vec<SteelLineItem> {
    lines
        .iter()
        .filter(|line| line.qty > 0.0)
        .map(|line| steel_line(ctx, line, base_price_override))
        .collect()
}

fn steel_line(
    ctx: &PricingContext<'_>,
    line: &ValidatedLine,
    base_price_override: Option<f64>,
) -> SteelLineItem {
    SteelLineItem {
        brand: ctx.brand.name.clone(),
        brand_id: ctx.brand.id.clone(),
        size: line.size.clone(),
        input_unit: line.unit,
        input_qty: line.qty,
        sells_by_count: ctx.brand.sells_by_count,
        calculation: calculate_item(ctx, line.as_input(), base_price_override),
    }
}

fn product_line(request: &ProductLineRequest, field: &str) -> AppResult<ProductLineItem> {
    let name = request.product.trim();
    validate_required_text(name, &format!("{field}.product"), MAX_NAME_LEN)?;
    let unit = request.unit.trim();
    validate_required_text(unit, &format!("{field}.unit"), MAX_SHORT_TEXT_LEN)?;
    let qty = parse_quantity(&request.input_qty, &format!("{field}.inputQty"))?;
    let price = parse_quantity(&request.price_per_unit, &format!("{field}.pricePerUnit"))?;

    Ok(ProductLineItem {
        product: name.to_string(),
        product_id: request.product_id.clone(),
        input_unit: unit.to_string(),
        input_qty: qty,
        price_per_unit: price,
        amount: product_line_amount(qty, price),
    })
}

fn validate_customer(customer: &CustomerDetails) -> AppResult<()> {
    if customer.customer_name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::CustomerNameRequired).with_detail("field", "customerName"));
    }
    validate_required_text(&customer.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_optional_text(&customer.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&customer.customer_email, "customerEmail", MAX_EMAIL_LEN)?;
    validate_optional_text(&customer.customer_address, "customerAddress", MAX_ADDRESS_LEN)?;
    validate_optional_text(&customer.customer_company, "customerCompany", MAX_NAME_LEN)?;
    Ok(())
}

fn validate_adjustments(draft: &QuoteDraft) -> AppResult<()> {
    validate_percent(draft.online_discount_percent, "onlineDiscountPercent")?;
    validate_percent(draft.offline_discount_percent, "offlineDiscountPercent")?;
    validate_non_negative(draft.transport_charge, "transportCharge")?;
    validate_non_negative(draft.loading_charge, "loadingCharge")?;
    if let Some(rate) = draft.loading_rate {
        validate_non_negative(rate, "loadingRate")?;
    }
    if let Some(price) = draft.base_price_override {
        validate_non_negative(price, "basePriceOverride")?;
    }
    validate_optional_text(&draft.notes, "notes", MAX_NOTE_LEN)?;
    if let Some(vendor) = &draft.vendor {
        validate_optional_text(&vendor.vendor, "vendor.vendor", MAX_NAME_LEN)?;
        validate_optional_text(&vendor.vendor_bill_url, "vendor.vendorBillUrl", MAX_URL_LEN)?;
    }
    Ok(())
}

// ==================== Assembly ====================

/// Validate and calculate a whole quote
///
/// `ctx` is the brand snapshot the steel lines are priced with; it may only
/// be `None` when the draft has no steel lines.
pub fn assemble(draft: &QuoteDraft, ctx: Option<&PricingContext<'_>>) -> AppResult<AssembledQuote> {
    validate_customer(&draft.customer)?;
    validate_adjustments(draft)?;
    let global_unit = parse_unit(draft.global_unit.as_deref(), "globalUnit")?;

    let mut items = Vec::with_capacity(draft.steel_items.len() + draft.products.len());

    if !draft.steel_items.is_empty() {
        let ctx = ctx.ok_or_else(|| {
            AppError::invalid_input("brandId", "brandId is required for steel items")
        })?;

        let lines = draft
            .steel_items
            .iter()
            .enumerate()
            .map(|(i, request)| {
                let (size, unit, qty) = validate_line(request, &format!("steelItems[{i}]"))?;
                Ok(ValidatedLine {
                    size,
                    unit: effective_unit(ctx.brand, unit, global_unit),
                    qty,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        items.extend(
            recalculate_items(ctx, &lines, draft.base_price_override)
                .into_iter()
                .map(QuoteLineItem::Steel),
        );
    }

    for (i, request) in draft.products.iter().enumerate() {
        let line = product_line(request, &format!("products[{i}]"))?;
        if line.input_qty > 0.0 {
            items.push(QuoteLineItem::Product(line));
        }
    }

    if items.is_empty() {
        return Err(AppError::new(ErrorCode::QuoteEmpty));
    }

    let weight = total_weight_kg(&items);
    let loading_charge = match draft.loading_rate {
        Some(rate) if rate > 0.0 && !weight.is_zero() => loading_charge_from_rate(weight, rate),
        _ => draft.loading_charge,
    };

    let adjustments = QuoteAdjustments {
        online_discount_percent: draft.online_discount_percent,
        offline_discount_percent: draft.offline_discount_percent,
        transport_charge: draft.transport_charge,
        transport_taxable: draft.transport_taxable,
        loading_charge,
        loading_taxable: draft.loading_taxable,
    };
    let totals = calculate_quote_totals(&items, &adjustments);

    Ok(AssembledQuote { items, totals })
}

/// Quote number: `<prefix><YYYYMMDD>-<sequence:04>`
pub fn format_quote_no(prefix: &str, date_stamp: &str, sequence: u64) -> String {
    format!("{prefix}{date_stamp}-{sequence:04}")
}
