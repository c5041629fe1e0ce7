//! Quote-Level Calculator
//!
//! Aggregates line amounts into quote totals:
//! - online/offline discounts, both percentages of the steel subtotal
//! - transport and loading charges
//! - flat GST surcharge on the charges marked taxable
//!
//! Uses functions from item_calculator for Decimal conversion.

use rust_decimal::prelude::*;
use shared::models::{QuoteLineItem, QuoteTotals};

use super::item_calculator::{add_or_zero, div_or_zero, mul_or_zero, to_decimal, to_f64};

/// GST rate applied to taxable additional charges (percent)
pub const GST_RATE_PERCENT: i64 = 18;

/// Order-level inputs of the totals calculation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuoteAdjustments {
    pub online_discount_percent: f64,
    pub offline_discount_percent: f64,
    pub transport_charge: f64,
    pub transport_taxable: bool,
    pub loading_charge: f64,
    pub loading_taxable: bool,
}

/// Calculate quote totals
///
/// # Calculation Steps
/// 1. Steel and product subtotals from line amounts
/// 2. Both discounts computed independently on the steel subtotal
/// 3. GST on the sum of the charges whose taxable flag is set
/// 4. `total = subtotal - discounts + charges + surcharge`
pub fn calculate_quote_totals(items: &[QuoteLineItem], adjustments: &QuoteAdjustments) -> QuoteTotals {
    let hundred = Decimal::ONE_HUNDRED;

    let (steel_subtotal, product_subtotal) =
        items
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(steel, product), item| match item {
                QuoteLineItem::Steel(line) => {
                    (add_or_zero(steel, to_decimal(line.calculation.amount)), product)
                }
                QuoteLineItem::Product(line) => (steel, add_or_zero(product, to_decimal(line.amount))),
            });
    let subtotal = add_or_zero(steel_subtotal, product_subtotal);

    let percent_of_steel = |percent: f64| {
        div_or_zero(mul_or_zero(steel_subtotal, to_decimal(percent)), hundred)
    };
    let online_discount = percent_of_steel(adjustments.online_discount_percent);
    let offline_discount = percent_of_steel(adjustments.offline_discount_percent);

    let transport = to_decimal(adjustments.transport_charge);
    let loading = to_decimal(adjustments.loading_charge);

    let mut taxable = Decimal::ZERO;
    if adjustments.transport_taxable {
        taxable = add_or_zero(taxable, transport);
    }
    if adjustments.loading_taxable {
        taxable = add_or_zero(taxable, loading);
    }
    let tax_surcharge = div_or_zero(mul_or_zero(taxable, Decimal::from(GST_RATE_PERCENT)), hundred);

    let total = [-online_discount, -offline_discount, transport, loading, tax_surcharge]
        .into_iter()
        .fold(subtotal, add_or_zero);

    QuoteTotals {
        steel_subtotal: to_f64(steel_subtotal),
        product_subtotal: to_f64(product_subtotal),
        subtotal: to_f64(subtotal),
        online_discount_amount: to_f64(online_discount),
        offline_discount_amount: to_f64(offline_discount),
        transport_charge: to_f64(transport),
        loading_charge: to_f64(loading),
        tax_surcharge: to_f64(tax_surcharge),
        total: to_f64(total),
        total_weight_kg: to_f64(total_weight_kg(items)),
    }
}

/// Total weight of a quote in kg
///
/// Steel lines contribute their converted kg; generic lines only when they
/// were entered in kg.
pub fn total_weight_kg(items: &[QuoteLineItem]) -> Decimal {
    items
        .iter()
        .map(|item| match item {
            QuoteLineItem::Steel(line) => to_decimal(line.calculation.converted_kg),
            QuoteLineItem::Product(line) if line.input_unit.trim().eq_ignore_ascii_case("kg") => {
                to_decimal(line.input_qty)
            }
            QuoteLineItem::Product(_) => Decimal::ZERO,
        })
        .fold(Decimal::ZERO, add_or_zero)
}

/// Loading charge derived from a per-kg rate, rounded to whole currency units
pub fn loading_charge_from_rate(total_weight_kg: Decimal, rate_per_kg: f64) -> f64 {
    mul_or_zero(total_weight_kg, to_decimal(rate_per_kg))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Amount of a generic product line
pub fn product_line_amount(qty: f64, price_per_unit: f64) -> f64 {
    to_f64(mul_or_zero(to_decimal(qty), to_decimal(price_per_unit)))
}
