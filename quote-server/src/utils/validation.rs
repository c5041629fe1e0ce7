//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Numeric checks report the offending field in `details.field`.

use serde_json::Value;
use shared::models::SizeMap;

use crate::utils::{AppError, AppResult, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: brand, product, weight profile, customer
pub const MAX_NAME_LEN: usize = 200;

/// Notes on a quote
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, unit, size keys
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// URLs (vendor bill links)
pub const MAX_URL_LEN: usize = 2048;

// ── Numeric limits ──────────────────────────────────────────────────

/// Largest accepted line quantity
pub const MAX_QUANTITY: f64 = 1_000_000_000.0;

/// Largest accepted price, charge or weight
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

// ── Numeric validation ──────────────────────────────────────────────

/// Validate a finite, non-negative number (prices, charges, weights)
pub fn validate_non_negative(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid_input(
            field,
            format!("{field} must be a non-negative number"),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(out_of_range(field, MAX_AMOUNT));
    }
    Ok(())
}

/// Validate a formula modifier
///
/// Modifiers may be negative but their magnitude is capped at
/// [`MAX_AMOUNT`], so base price × modifier × quantity stays in Decimal range.
pub fn validate_modifier(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::invalid_input(field, format!("{field} must be a finite number")));
    }
    if value.abs() > MAX_AMOUNT {
        return Err(out_of_range(field, MAX_AMOUNT));
    }
    Ok(())
}

/// Validate a discount percentage (0-100)
pub fn validate_percent(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between 0 and 100"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate every value of a size-keyed number map
pub fn validate_size_map(map: &SizeMap<f64>, field: &str) -> AppResult<()> {
    for (size, value) in map {
        validate_required_text(size, field, MAX_SHORT_TEXT_LEN)?;
        validate_non_negative(*value, &format!("{field}.{size}"))?;
    }
    Ok(())
}

/// Parse a user-entered quantity
///
/// Accepts a JSON number or a numeric string. `null` and blank strings
/// mean "nothing entered" and parse as 0. Anything else, negative or
/// non-finite values are rejected as invalid input for `field`.
pub fn parse_quantity(value: &Value, field: &str) -> AppResult<f64> {
    let qty = match value {
        Value::Null => return Ok(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return Ok(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let qty = qty.ok_or_else(|| AppError::invalid_input(field, format!("{field} must be a number")))?;
    if !qty.is_finite() || qty < 0.0 {
        return Err(AppError::invalid_input(
            field,
            format!("{field} must be a non-negative number"),
        ));
    }
    if qty > MAX_QUANTITY {
        return Err(out_of_range(field, MAX_QUANTITY));
    }
    Ok(qty)
}

fn out_of_range(field: &str, max: f64) -> AppError {
    AppError::with_message(ErrorCode::ValueOutOfRange, format!("{field} exceeds {max}"))
        .with_detail("field", field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_quantity_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_quantity(&json!(12.5), "inputQty").unwrap(), 12.5);
        assert_eq!(parse_quantity(&json!(" 7 "), "inputQty").unwrap(), 7.0);
        assert_eq!(parse_quantity(&json!(0), "inputQty").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_quantity_blank_is_zero() {
        assert_eq!(parse_quantity(&Value::Null, "inputQty").unwrap(), 0.0);
        assert_eq!(parse_quantity(&json!("  "), "inputQty").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_quantity_rejects_garbage_with_field() {
        for bad in [json!("abc"), json!(-1), json!("-0.5"), json!(true), json!([1]), json!("NaN")] {
            let err = parse_quantity(&bad, "steelItems[0].inputQty").unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidInput, "{bad}");
            assert_eq!(err.field(), Some("steelItems[0].inputQty"));
        }
    }

    #[test]
    fn test_parse_quantity_rejects_huge_values() {
        let err = parse_quantity(&json!(1e12), "inputQty").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_validate_percent() {
        assert!(validate_percent(0.0, "onlineDiscountPercent").is_ok());
        assert!(validate_percent(100.0, "onlineDiscountPercent").is_ok());
        assert!(validate_percent(100.5, "onlineDiscountPercent").is_err());
        assert!(validate_percent(-1.0, "onlineDiscountPercent").is_err());
        assert!(validate_percent(f64::NAN, "onlineDiscountPercent").is_err());
    }

    #[test]
    fn test_validate_required_text() {
        let err = validate_required_text("   ", "customerName", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.field(), Some("customerName"));

        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Tata Tiscon", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_validate_size_map_names_the_size() {
        let mut map = SizeMap::new();
        map.insert("10mm".into(), 0.617);
        assert!(validate_size_map(&map, "rodWeightKg").is_ok());

        map.insert("12mm".into(), -1.0);
        let err = validate_size_map(&map, "rodWeightKg").unwrap_err();
        assert_eq!(err.field(), Some("rodWeightKg.12mm"));
    }

    #[test]
    fn test_validate_modifier_bounds_magnitude() {
        assert!(validate_modifier(-250.0, "sizePriceFormula.8mm.modifier").is_ok());
        assert!(validate_modifier(MAX_AMOUNT, "sizePriceFormula.8mm.modifier").is_ok());

        let err = validate_modifier(1e20, "sizePriceFormula.10mm.modifier").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert_eq!(err.field(), Some("sizePriceFormula.10mm.modifier"));

        let err = validate_modifier(-1e30, "sizePriceFormula.10mm.modifier").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let err = validate_modifier(f64::INFINITY, "sizePriceFormula.10mm.modifier").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
