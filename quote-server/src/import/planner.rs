//! Import planning
//!
//! Splits extracted bill lines into steel lines (description names a known
//! size) and generic product lines.

use serde::Serialize;
use serde_json::Value;
use shared::models::{InputUnit, ItemRequest, ProductLineRequest, VendorMetadata};

use super::sanitizer::VendorExtraction;
use crate::pricing::product_line_amount;

/// Draft lines produced from one vendor bill
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    pub vendor: VendorMetadata,
    pub steel_items: Vec<ItemRequest>,
    pub products: Vec<PlannedProduct>,
}

/// Generic product line with its computed amount
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedProduct {
    #[serde(flatten)]
    pub line: ProductLineRequest,
    pub amount: f64,
    pub hsn: Option<String>,
}

/// Find the size a description mentions
///
/// Case-insensitive. A match preceded by a digit does not count, so "10mm"
/// never matches inside "110mm". The longest matching size wins.
pub fn match_size<'a>(description: &str, sizes: &[&'a str]) -> Option<&'a str> {
    let haystack = description.to_lowercase();
    sizes
        .iter()
        .copied()
        .filter(|size| !size.trim().is_empty())
        .filter(|size| {
            let needle = size.to_lowercase();
            haystack.match_indices(&needle).any(|(pos, _)| {
                !haystack[..pos]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_ascii_digit())
            })
        })
        .max_by_key(|size| size.len())
}

/// Build an import plan from an extraction
///
/// Steel lines are entered in `default_unit`; lines with a zero quantity are
/// skipped.
pub fn plan_import(
    extraction: &VendorExtraction,
    sizes: &[&str],
    default_unit: InputUnit,
    vendor_bill_url: Option<String>,
    imported_at: i64,
) -> ImportPlan {
    let mut steel_items = Vec::new();
    let mut products = Vec::new();

    for item in extraction.items.iter().filter(|item| item.qty > 0.0) {
        match match_size(&item.description, sizes) {
            Some(size) => steel_items.push(ItemRequest {
                size: size.to_string(),
                input_unit: Some(default_unit.to_string()),
                input_qty: Value::from(item.qty),
            }),
            None => products.push(PlannedProduct {
                line: ProductLineRequest {
                    product: item.description.trim().to_string(),
                    product_id: None,
                    unit: item
                        .unit
                        .clone()
                        .filter(|u| !u.trim().is_empty())
                        .unwrap_or_else(|| "nos".to_string()),
                    input_qty: Value::from(item.qty),
                    price_per_unit: Value::from(item.rate),
                },
                amount: product_line_amount(item.qty, item.rate),
                hsn: item.hsn.clone(),
            }),
        }
    }

    tracing::debug!(
        steel = steel_items.len(),
        products = products.len(),
        "Vendor import planned"
    );

    ImportPlan {
        vendor: VendorMetadata {
            vendor: extraction.vendor.clone(),
            date: extraction.date.clone(),
            vendor_bill_url,
            imported_at: Some(imported_at),
        },
        steel_items,
        products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ExtractedItem;

    const SIZES: &[&str] = &["8mm", "10mm", "12mm", "16mm", "110mm"];

    fn extracted(description: &str, qty: f64, unit: &str, rate: f64) -> ExtractedItem {
        ExtractedItem {
            description: description.into(),
            qty,
            unit: Some(unit.into()),
            rate,
            hsn: None,
        }
    }

    #[test]
    fn test_match_size() {
        assert_eq!(match_size("TMT Bar 10MM Fe550", SIZES), Some("10mm"));
        assert_eq!(match_size("8mm ring", SIZES), Some("8mm"));
        assert_eq!(match_size("MS pipe 110mm", SIZES), Some("110mm"));
        assert_eq!(match_size("18mm TMT", SIZES), None);
        assert_eq!(match_size("Cement OPC 53", SIZES), None);
    }

    #[test]
    fn test_plan_splits_steel_and_products() {
        let extraction = VendorExtraction {
            vendor: Some("SRS Steels".into()),
            date: Some("2024-03-15".into()),
            items: vec![
                extracted("8mm TMT", 1000.0, "kg", 50.0),
                extracted("10mm TMT", 2000.0, "kg", 48.0),
                extracted("Binding wire", 25.0, "kg", 90.0),
                extracted("Cement OPC 53", 0.0, "bag", 380.0),
            ],
        };

        let plan = plan_import(&extraction, SIZES, InputUnit::Kg, None, 1_700_000_000_000);

        assert_eq!(plan.steel_items.len(), 2);
        assert_eq!(plan.steel_items[1].size, "10mm");
        assert_eq!(plan.steel_items[1].input_unit.as_deref(), Some("kg"));
        assert_eq!(plan.steel_items[1].input_qty, Value::from(2000.0));

        assert_eq!(plan.products.len(), 1);
        assert_eq!(plan.products[0].line.product, "Binding wire");
        assert_eq!(plan.products[0].amount, 2250.0);

        assert_eq!(plan.vendor.vendor.as_deref(), Some("SRS Steels"));
        assert_eq!(plan.vendor.imported_at, Some(1_700_000_000_000));
    }
}
