//! Line Item Calculator
//!
//! Converts one entered quantity (kg, nos or bundles) into the other two
//! units and prices it, either per piece (count-priced brands) or per kg
//! through the size's price formula (weight-priced brands).
//!
//! Uses rust_decimal for precision calculations. Rounding happens once, when
//! the result is converted back to f64.

use rust_decimal::prelude::*;
use shared::models::{FormulaOp, InputUnit, ItemCalculation, SizeFormula, positive_entry};

use super::resolver::{PricingContext, ResolvedWeights};

/// Rounding strategy for quantities and monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

// ==================== Conversion Helpers ====================

/// Convert f64 to Decimal for calculation
///
/// Values outside the Decimal range (about ±7.9e28) become zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        if value.is_finite() {
            tracing::debug!(value, "Value outside Decimal range, treated as zero");
        }
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

// ==================== Checked Arithmetic ====================

/// `a * b`, or zero when the product overflows
#[inline]
pub fn mul_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| overflowed("mul", a, b))
}

/// `a / b`, or zero when `b` is zero or the quotient overflows
#[inline]
pub fn div_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_div(b).unwrap_or_else(|| overflowed("div", a, b))
}

/// `a + b`, or zero when the sum overflows
#[inline]
pub fn add_or_zero(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| overflowed("add", a, b))
}

fn overflowed(op: &'static str, a: Decimal, b: Decimal) -> Decimal {
    tracing::debug!(op, %a, %b, "Decimal arithmetic out of range, result left at zero");
    Decimal::ZERO
}

// ==================== Unit Conversion ====================

/// One quantity expressed in all three units (unrounded)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertedQuantity {
    pub kg: Decimal,
    pub nos: Decimal,
    pub bundles: Decimal,
}

/// Re-express `qty` (given in `unit`) in kg, pieces and bundles
///
/// A conversion path whose weight is unknown leaves that quantity at zero.
/// Piece/bundle conversions prefer the integer pieces-per-bundle count and
/// fall back to the weight ratio only when the count is unknown.
pub fn convert_quantity(weights: &ResolvedWeights, unit: InputUnit, qty: Decimal) -> ConvertedQuantity {
    let piece = weights.piece_weight_kg;
    let count = weights.pieces_per_bundle.map(Decimal::from);
    let bundle = weights.bundle_weight_kg;

    match unit {
        InputUnit::Kg => ConvertedQuantity {
            kg: qty,
            nos: piece.map(|w| div_or_zero(qty, w)).unwrap_or_default(),
            bundles: bundle.map(|b| div_or_zero(qty, b)).unwrap_or_default(),
        },
        InputUnit::Bundle => {
            let nos = match (count, bundle, piece) {
                (Some(n), _, _) => mul_or_zero(qty, n),
                (None, Some(b), Some(w)) => div_or_zero(mul_or_zero(qty, b), w),
                _ => Decimal::ZERO,
            };
            ConvertedQuantity {
                kg: bundle.map(|b| mul_or_zero(qty, b)).unwrap_or_default(),
                nos,
                bundles: qty,
            }
        }
        InputUnit::Nos => {
            let bundles = match (count, piece, bundle) {
                (Some(n), _, _) => div_or_zero(qty, n),
                (None, Some(w), Some(b)) => div_or_zero(mul_or_zero(qty, w), b),
                _ => Decimal::ZERO,
            };
            ConvertedQuantity {
                kg: piece.map(|w| mul_or_zero(qty, w)).unwrap_or_default(),
                nos: qty,
                bundles,
            }
        }
    }
}

// ==================== Pricing ====================

/// Apply a size formula to the base price per kg
///
/// Unknown operators leave the base price unchanged. A result outside the
/// Decimal range prices the size at zero.
pub fn evaluate_formula(base_price: Decimal, formula: &SizeFormula) -> Decimal {
    let modifier = to_decimal(formula.modifier);
    match formula.op {
        FormulaOp::Add => add_or_zero(base_price, modifier),
        FormulaOp::Multiply => mul_or_zero(base_price, modifier),
        FormulaOp::Unknown => base_price,
    }
}

/// Price per kg for a size of a weight-priced brand
pub fn price_per_kg(ctx: &PricingContext<'_>, size: &str, base_price_override: Option<f64>) -> Decimal {
    let base_price = to_decimal(base_price_override.unwrap_or(ctx.brand.base_price));
    let formula = ctx
        .brand
        .size_price_formula
        .get(size)
        .copied()
        .unwrap_or_default();
    evaluate_formula(base_price, &formula)
}

/// One steel line to calculate
#[derive(Debug, Clone, Copy)]
pub struct LineInput<'a> {
    pub size: &'a str,
    pub unit: InputUnit,
    /// Validated, non-negative quantity
    pub qty: f64,
}

/// Calculate one steel line for the brand in `ctx`
///
/// `base_price_override` replaces the brand's base price per kg; it has no
/// effect on count-priced brands. Missing weights or prices never fail the
/// calculation, the affected outputs stay zero.
pub fn calculate_item(
    ctx: &PricingContext<'_>,
    input: LineInput<'_>,
    base_price_override: Option<f64>,
) -> ItemCalculation {
    let qty = to_decimal(input.qty).max(Decimal::ZERO);
    let weights = ctx.resolve(input.size);
    let converted = convert_quantity(&weights, input.unit, qty);

    let (price_per_kg, price_per_piece, amount) = if ctx.brand.sells_by_count {
        match positive_entry(&ctx.brand.fixed_price_per_piece, input.size).map(to_decimal) {
            Some(per_piece) => {
                let per_kg = weights
                    .piece_weight_kg
                    .map(|w| div_or_zero(per_piece, w))
                    .unwrap_or_default();
                (per_kg, per_piece, mul_or_zero(converted.nos, per_piece))
            }
            None => {
                tracing::debug!(
                    brand = %ctx.brand.name,
                    size = input.size,
                    "No fixed piece price, line left unpriced"
                );
                (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
            }
        }
    } else {
        let per_kg = price_per_kg(ctx, input.size, base_price_override);
        let per_piece = weights
            .piece_weight_kg
            .map(|w| mul_or_zero(per_kg, w))
            .unwrap_or_default();
        let amount = if per_kg > Decimal::ZERO {
            mul_or_zero(converted.kg, per_kg)
        } else {
            Decimal::ZERO
        };
        (per_kg, per_piece, amount)
    };

    if weights.is_empty() && !qty.is_zero() {
        tracing::debug!(
            brand = %ctx.brand.name,
            size = input.size,
            "No weight data, conversions left at zero"
        );
    }

    ItemCalculation {
        price_per_kg: to_f64(price_per_kg),
        price_per_piece: to_f64(price_per_piece),
        converted_kg: to_f64(converted.kg),
        converted_nos: to_f64(converted.nos),
        converted_bundles: to_f64(converted.bundles),
        amount: to_f64(amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Brand, WeightProfile};

    fn make_brand(sells_by_count: bool) -> Brand {
        Brand {
            id: Some("b1".into()),
            name: "Kamdhenu".into(),
            base_price: 50.0,
            sells_by_count,
            weight_profile: Some("isi".into()),
            size_price_formula: Default::default(),
            fixed_price_per_piece: Default::default(),
            rod_weight_override: Default::default(),
            bundle_weight_override: Default::default(),
            created_at: 0,
            updated_at: 0,
        }
    }

    fn make_profile() -> WeightProfile {
        let mut profile = WeightProfile {
            id: Some("isi".into()),
            name: "Standard ISI".into(),
            rod_weight_kg: Default::default(),
            rods_per_bundle: Default::default(),
        };
        profile.rod_weight_kg.insert("8mm".into(), 0.395);
        profile.rods_per_bundle.insert("8mm".into(), 10);
        profile.rod_weight_kg.insert("10mm".into(), 0.617);
        profile.rods_per_bundle.insert("10mm".into(), 7);
        profile.rod_weight_kg.insert("12mm".into(), 0.888);
        profile.rods_per_bundle.insert("12mm".into(), 5);
        profile.rod_weight_kg.insert("16mm".into(), 1.58);
        profile.rods_per_bundle.insert("16mm".into(), 3);
        profile
    }

    fn line(size: &str, unit: InputUnit, qty: f64) -> LineInput<'_> {
        LineInput { size, unit, qty }
    }

    // ==================== Scenario Tests ====================

    #[test]
    fn test_weight_priced_kg_input() {
        // basePrice 50, 10mm add 5 -> 55/kg
        // 100kg -> 100/0.617 = 162.07 nos, 100/4.319 = 23.15 bundles
        let mut brand = make_brand(false);
        brand
            .size_price_formula
            .insert("10mm".into(), SizeFormula::add(5.0));
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("10mm", InputUnit::Kg, 100.0), None);

        assert_eq!(result.price_per_kg, 55.0);
        assert_eq!(result.amount, 5500.0);
        assert_eq!(result.converted_kg, 100.0);
        assert_eq!(result.converted_nos, 162.07);
        assert_eq!(result.converted_bundles, 23.15);
        // 55 * 0.617 = 33.935
        assert_eq!(result.price_per_piece, 33.94);
    }

    #[test]
    fn test_weight_priced_bundle_input() {
        // 2 bundles * 7 rods = 14 nos (exact), 2 * 4.319 = 8.638 kg
        // amount from unrounded kg: 8.638 * 55 = 475.09
        let mut brand = make_brand(false);
        brand
            .size_price_formula
            .insert("10mm".into(), SizeFormula::add(5.0));
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("10mm", InputUnit::Bundle, 2.0), None);

        assert_eq!(result.converted_bundles, 2.0);
        assert_eq!(result.converted_nos, 14.0);
        assert_eq!(result.converted_kg, 8.64);
        assert_eq!(result.amount, 475.09);
    }

    #[test]
    fn test_count_priced_nos_input() {
        // 50 nos * 95 = 4750, display price per kg 95 / 0.888 = 106.98
        let mut brand = make_brand(true);
        brand.fixed_price_per_piece.insert("12mm".into(), 95.0);
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("12mm", InputUnit::Nos, 50.0), None);

        assert_eq!(result.amount, 4750.0);
        assert_eq!(result.price_per_piece, 95.0);
        assert_eq!(result.price_per_kg, 106.98);
        assert_eq!(result.converted_kg, 44.4);
        assert_eq!(result.converted_bundles, 10.0);
    }

    // ==================== Property Tests ====================

    #[test]
    fn test_zero_quantity_yields_zero_outputs() {
        let profile = make_profile();
        let mut weight_priced = make_brand(false);
        weight_priced
            .size_price_formula
            .insert("10mm".into(), SizeFormula::multiply(1.1));
        let mut count_priced = make_brand(true);
        count_priced.fixed_price_per_piece.insert("10mm".into(), 40.0);

        for brand in [&weight_priced, &count_priced] {
            let ctx = PricingContext::new(brand, Some(&profile));
            for unit in [InputUnit::Kg, InputUnit::Nos, InputUnit::Bundle] {
                let result = calculate_item(&ctx, line("10mm", unit, 0.0), None);
                assert_eq!(result.converted_kg, 0.0);
                assert_eq!(result.converted_nos, 0.0);
                assert_eq!(result.converted_bundles, 0.0);
                assert_eq!(result.amount, 0.0);
            }
        }
    }

    #[test]
    fn test_default_formula_prices_at_base_price() {
        let brand = make_brand(false);
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("16mm", InputUnit::Kg, 10.0), None);

        assert_eq!(result.price_per_kg, 50.0);
        assert_eq!(result.amount, 500.0);
    }

    #[test]
    fn test_count_priced_without_fixed_price_is_unpriced() {
        let mut brand = make_brand(true);
        brand.fixed_price_per_piece.insert("8mm".into(), 0.0);
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        for size in ["8mm", "16mm"] {
            let result = calculate_item(&ctx, line(size, InputUnit::Nos, 25.0), None);
            assert_eq!(result.amount, 0.0);
            assert_eq!(result.converted_nos, 25.0);
        }
    }

    #[test]
    fn test_round_trips_within_tolerance() {
        let brand = make_brand(false);
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));
        let tolerance = Decimal::new(1, 2);

        for size in ["8mm", "10mm", "12mm", "16mm"] {
            let weights = ctx.resolve(size);
            for kg in [1.0, 37.5, 100.0, 1234.56] {
                let kg = to_decimal(kg);
                let forward = convert_quantity(&weights, InputUnit::Kg, kg);

                let via_nos = convert_quantity(&weights, InputUnit::Nos, forward.nos);
                assert!((via_nos.kg - kg).abs() <= tolerance, "{size}: nos path");

                let via_bundles = convert_quantity(&weights, InputUnit::Bundle, forward.bundles);
                assert!((via_bundles.kg - kg).abs() <= tolerance, "{size}: bundle path");
            }
        }
    }

    // ==================== Conversion Edge Cases ====================

    #[test]
    fn test_unknown_weights_leave_conversions_zero() {
        let brand = make_brand(false);
        let ctx = PricingContext::without_profile(&brand);

        let result = calculate_item(&ctx, line("10mm", InputUnit::Kg, 100.0), None);
        assert_eq!(result.converted_nos, 0.0);
        assert_eq!(result.converted_bundles, 0.0);
        assert_eq!(result.price_per_piece, 0.0);
        // Still priced by weight
        assert_eq!(result.amount, 5000.0);

        let result = calculate_item(&ctx, line("10mm", InputUnit::Nos, 10.0), None);
        assert_eq!(result.converted_kg, 0.0);
        assert_eq!(result.amount, 0.0);
    }

    #[test]
    fn test_bundle_falls_back_to_weight_ratio_without_count() {
        // No rods-per-bundle: nos = bundles * B / W
        let mut brand = make_brand(false);
        brand.rod_weight_override.insert("20mm".into(), 2.47);
        brand.bundle_weight_override.insert("20mm".into(), 4.94);
        let ctx = PricingContext::without_profile(&brand);

        let result = calculate_item(&ctx, line("20mm", InputUnit::Bundle, 3.0), None);
        assert_eq!(result.converted_nos, 6.0);
        assert_eq!(result.converted_kg, 14.82);

        let result = calculate_item(&ctx, line("20mm", InputUnit::Nos, 6.0), None);
        assert_eq!(result.converted_bundles, 3.0);
    }

    #[test]
    fn test_count_beats_inconsistent_bundle_override() {
        // Override says 4.5 kg per bundle, count still decides nos <-> bundles
        let mut brand = make_brand(false);
        brand.bundle_weight_override.insert("10mm".into(), 4.5);
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("10mm", InputUnit::Bundle, 2.0), None);
        assert_eq!(result.converted_nos, 14.0);
        assert_eq!(result.converted_kg, 9.0);

        let result = calculate_item(&ctx, line("10mm", InputUnit::Nos, 21.0), None);
        assert_eq!(result.converted_bundles, 3.0);
    }

    // ==================== Formula Tests ====================

    #[test]
    fn test_evaluate_formula_ops() {
        let base = Decimal::from(50);
        assert_eq!(evaluate_formula(base, &SizeFormula::add(-2.5)), Decimal::new(475, 1));
        assert_eq!(evaluate_formula(base, &SizeFormula::multiply(1.1)), Decimal::from(55));

        let unknown = SizeFormula {
            op: FormulaOp::Unknown,
            modifier: 99.0,
        };
        assert_eq!(evaluate_formula(base, &unknown), base);
    }

    #[test]
    fn test_base_price_override_applies_to_weight_priced_only() {
        let mut brand = make_brand(false);
        brand
            .size_price_formula
            .insert("10mm".into(), SizeFormula::add(5.0));
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("10mm", InputUnit::Kg, 10.0), Some(60.0));
        assert_eq!(result.price_per_kg, 65.0);
        assert_eq!(result.amount, 650.0);

        let mut count_priced = make_brand(true);
        count_priced.fixed_price_per_piece.insert("10mm".into(), 40.0);
        let ctx = PricingContext::new(&count_priced, Some(&profile));
        let result = calculate_item(&ctx, line("10mm", InputUnit::Nos, 10.0), Some(60.0));
        assert_eq!(result.amount, 400.0);
    }

    #[test]
    fn test_non_positive_price_per_kg_yields_zero_amount() {
        let mut brand = make_brand(false);
        brand
            .size_price_formula
            .insert("10mm".into(), SizeFormula::add(-60.0));
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("10mm", InputUnit::Kg, 10.0), None);
        assert_eq!(result.price_per_kg, -10.0);
        assert_eq!(result.amount, 0.0);
    }

    #[test]
    fn test_to_f64_rounds_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(12345, 3)), 12.35);
        assert_eq!(to_f64(Decimal::new(-12345, 3)), -12.35);
        assert_eq!(to_f64(to_decimal(f64::NAN)), 0.0);
    }

    // ==================== Out-of-range Tests ====================

    #[test]
    fn test_overflowing_formula_prices_at_zero() {
        // 1e9 * 1e20 is past the Decimal range
        let mut brand = make_brand(false);
        brand.base_price = 1e9;
        brand
            .size_price_formula
            .insert("10mm".into(), SizeFormula::multiply(1e20));
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("10mm", InputUnit::Kg, 1.0), None);
        assert_eq!(result.price_per_kg, 0.0);
        assert_eq!(result.price_per_piece, 0.0);
        assert_eq!(result.amount, 0.0);
        assert_eq!(result.converted_kg, 1.0);
    }

    #[test]
    fn test_tiny_piece_weight_leaves_counts_at_zero() {
        let mut brand = make_brand(false);
        brand.rod_weight_override.insert("10mm".into(), 1e-27);
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        let result = calculate_item(&ctx, line("10mm", InputUnit::Kg, 1e9), None);
        assert_eq!(result.converted_kg, 1e9);
        assert_eq!(result.converted_nos, 0.0);
        assert_eq!(result.converted_bundles, 0.0);
        assert_eq!(result.amount, 5e10);
    }

    #[test]
    fn test_checked_helpers() {
        assert_eq!(mul_or_zero(Decimal::MAX, Decimal::TWO), Decimal::ZERO);
        assert_eq!(add_or_zero(Decimal::MAX, Decimal::ONE), Decimal::ZERO);
        assert_eq!(div_or_zero(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(div_or_zero(Decimal::TEN, Decimal::TWO), Decimal::new(5, 0));
    }

    #[test]
    fn test_to_decimal_out_of_range_is_zero() {
        assert_eq!(to_decimal(1e30), Decimal::ZERO);
        assert_eq!(to_decimal(-1e30), Decimal::ZERO);
        assert_eq!(evaluate_formula(Decimal::new(50, 0), &SizeFormula::add(1e30)), Decimal::new(50, 0));
    }
}
