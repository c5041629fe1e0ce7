//! Product Model (generic inventory: cement bags, binding wire, ...)

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<String>,
    pub name: String,
    /// Selling unit, e.g. "bag", "kg", "pcs"
    pub unit: String,
    pub unit_weight_kg: Option<f64>,
    pub price_per_unit: f64,
    #[serde(default)]
    pub allow_quantity_decimal: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub unit: String,
    pub unit_weight_kg: Option<f64>,
    pub price_per_unit: f64,
    pub allow_quantity_decimal: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub unit_weight_kg: Option<f64>,
    pub price_per_unit: Option<f64>,
    pub allow_quantity_decimal: Option<bool>,
}
