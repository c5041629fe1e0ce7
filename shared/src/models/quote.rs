//! Quote Model
//!
//! A saved quote is a full snapshot: every steel line keeps its converted
//! quantities, the prices actually used and the brand's pricing mode, so
//! re-display never has to resolve the brand again.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::size::{InputUnit, Size};

/// Customer block of a quote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,
    #[serde(default)]
    pub customer_company: Option<String>,
}

/// Computed result for one steel line
///
/// Converted quantities and per-unit prices are rounded to 2 decimals;
/// `amount` is rounded to currency precision (2 decimals).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCalculation {
    pub price_per_kg: f64,
    pub price_per_piece: f64,
    pub converted_kg: f64,
    pub converted_nos: f64,
    pub converted_bundles: f64,
    pub amount: f64,
}

/// Steel (rebar) line of a saved quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelLineItem {
    /// Brand name at the time of saving
    pub brand: String,
    pub brand_id: Option<String>,
    pub size: Size,
    pub input_unit: InputUnit,
    pub input_qty: f64,
    /// Pricing mode the amount was computed with
    pub sells_by_count: bool,
    #[serde(flatten)]
    pub calculation: ItemCalculation,
}

/// Generic inventory line of a saved quote (no unit conversion)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLineItem {
    pub product: String,
    #[serde(default)]
    pub product_id: Option<String>,
    pub input_unit: String,
    pub input_qty: f64,
    pub price_per_unit: f64,
    pub amount: f64,
}

/// One quote line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteLineItem {
    Steel(SteelLineItem),
    Product(ProductLineItem),
}

impl QuoteLineItem {
    pub fn amount(&self) -> f64 {
        match self {
            Self::Steel(item) => item.calculation.amount,
            Self::Product(item) => item.amount,
        }
    }
}

/// Order-level totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    /// Sum of steel line amounts (discount basis)
    pub steel_subtotal: f64,
    /// Sum of generic line amounts
    pub product_subtotal: f64,
    pub subtotal: f64,
    pub online_discount_amount: f64,
    pub offline_discount_amount: f64,
    pub transport_charge: f64,
    pub loading_charge: f64,
    /// GST on the taxable additional charges
    pub tax_surcharge: f64,
    pub total: f64,
    pub total_weight_kg: f64,
}

/// Metadata of a vendor-bill import the quote was started from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorMetadata {
    pub vendor: Option<String>,
    pub date: Option<String>,
    pub vendor_bill_url: Option<String>,
    pub imported_at: Option<i64>,
}

/// Quote entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Option<String>,
    pub quote_no: String,
    /// Quote date (Unix millis)
    pub date: i64,
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub brand_id: Option<String>,
    pub items: Vec<QuoteLineItem>,
    pub online_discount_percent: f64,
    pub offline_discount_percent: f64,
    pub transport_taxable: bool,
    pub loading_taxable: bool,
    /// Per-kg loading rate the loading charge was derived from
    pub loading_rate: Option<f64>,
    pub base_price_override: Option<f64>,
    #[serde(flatten)]
    pub totals: QuoteTotals,
    pub notes: Option<String>,
    pub vendor: Option<VendorMetadata>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Quote {
    pub fn steel_items(&self) -> impl Iterator<Item = &SteelLineItem> {
        self.items.iter().filter_map(|item| match item {
            QuoteLineItem::Steel(steel) => Some(steel),
            QuoteLineItem::Product(_) => None,
        })
    }

    pub fn product_items(&self) -> impl Iterator<Item = &ProductLineItem> {
        self.items.iter().filter_map(|item| match item {
            QuoteLineItem::Product(product) => Some(product),
            QuoteLineItem::Steel(_) => None,
        })
    }
}

// ==================== Request payloads ====================

/// One steel line as entered by the user
///
/// `input_qty` is kept as raw JSON so blank fields, numeric strings and
/// garbage can be told apart during validation. A missing unit falls back
/// to the brand's default unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub size: Size,
    #[serde(default)]
    pub input_unit: Option<String>,
    #[serde(default)]
    pub input_qty: Value,
}

/// One generic inventory line as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLineRequest {
    pub product: String,
    #[serde(default)]
    pub product_id: Option<String>,
    pub unit: String,
    #[serde(default)]
    pub input_qty: Value,
    #[serde(default)]
    pub price_per_unit: Value,
}

/// Single line calculation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateItemRequest {
    pub brand_id: String,
    #[serde(flatten)]
    pub item: ItemRequest,
    #[serde(default)]
    pub base_price_override: Option<f64>,
}

/// Whole-quote payload used for create, replace and preview
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub brand_id: Option<String>,
    #[serde(default)]
    pub steel_items: Vec<ItemRequest>,
    #[serde(default)]
    pub products: Vec<ProductLineRequest>,
    /// Replaces every kg-priced item's unit when set
    #[serde(default)]
    pub global_unit: Option<String>,
    /// Replaces the brand's base price for this quote
    #[serde(default)]
    pub base_price_override: Option<f64>,
    #[serde(default)]
    pub online_discount_percent: f64,
    #[serde(default)]
    pub offline_discount_percent: f64,
    #[serde(default)]
    pub transport_charge: f64,
    #[serde(default)]
    pub transport_taxable: bool,
    #[serde(default)]
    pub loading_charge: f64,
    #[serde(default)]
    pub loading_taxable: bool,
    #[serde(default)]
    pub loading_rate: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub vendor: Option<VendorMetadata>,
}

/// Bulk delete payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_tagging() {
        let item = QuoteLineItem::Product(ProductLineItem {
            product: "Cement OPC 53".into(),
            product_id: None,
            input_unit: "bag".into(),
            input_qty: 10.0,
            price_per_unit: 380.0,
            amount: 3800.0,
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "product");
        assert_eq!(json["pricePerUnit"], 380.0);
        assert_eq!(item.amount(), 3800.0);
    }

    #[test]
    fn test_steel_line_flattens_calculation() {
        let item = SteelLineItem {
            brand: "Kamdhenu".into(),
            brand_id: Some("b1".into()),
            size: "10mm".into(),
            input_unit: InputUnit::Kg,
            input_qty: 100.0,
            sells_by_count: false,
            calculation: ItemCalculation {
                price_per_kg: 55.0,
                amount: 5500.0,
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["pricePerKg"], 55.0);
        assert_eq!(json["inputUnit"], "kg");
        assert_eq!(json["sellsByCount"], false);

        let back: SteelLineItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_draft_defaults() {
        let draft: QuoteDraft =
            serde_json::from_str(r#"{"customerName":"Ravi","steelItems":[{"size":"8mm"}]}"#)
                .unwrap();
        assert_eq!(draft.customer.customer_name, "Ravi");
        assert_eq!(draft.steel_items[0].input_qty, Value::Null);
        assert!(draft.steel_items[0].input_unit.is_none());
        assert_eq!(draft.online_discount_percent, 0.0);
    }
}
