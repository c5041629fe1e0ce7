//! Brand Model

use serde::{Deserialize, Serialize};

use super::size::{Size, SizeMap};

/// Operator of a per-size price formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaOp {
    #[default]
    Add,
    #[serde(alias = "mul")]
    Multiply,
    /// Anything else stored by older data entry; evaluates to the base price
    #[serde(other)]
    Unknown,
}

/// Per-size price adjustment relative to the brand's base price per kg
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeFormula {
    #[serde(default, alias = "formulaType")]
    pub op: FormulaOp,
    #[serde(default)]
    pub modifier: f64,
}

impl SizeFormula {
    pub fn add(modifier: f64) -> Self {
        Self {
            op: FormulaOp::Add,
            modifier,
        }
    }

    pub fn multiply(modifier: f64) -> Self {
        Self {
            op: FormulaOp::Multiply,
            modifier,
        }
    }
}

/// Brand entity (pricing configuration)
///
/// `weight_profile` references a [`super::WeightProfile`] by id; the profile
/// is never copied into the brand. The two override maps win over whatever
/// the profile derives for the same size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: Option<String>,
    pub name: String,
    /// Currency units per kg
    pub base_price: f64,
    /// true = priced per piece from `fixed_price_per_piece`
    #[serde(default, alias = "sellsInNos")]
    pub sells_by_count: bool,
    #[serde(default)]
    pub weight_profile: Option<String>,
    /// Only consulted when `sells_by_count` is false
    #[serde(default, alias = "sizeFormulas")]
    pub size_price_formula: SizeMap<SizeFormula>,
    /// Only consulted when `sells_by_count` is true
    #[serde(default, alias = "sizePricing")]
    pub fixed_price_per_piece: SizeMap<f64>,
    #[serde(default, alias = "rodWeightMap")]
    pub rod_weight_override: SizeMap<f64>,
    #[serde(default, alias = "bundleWeightMap")]
    pub bundle_weight_override: SizeMap<f64>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Brand {
    /// Every size this brand carries its own configuration for
    pub fn configured_sizes(&self) -> impl Iterator<Item = &Size> {
        self.size_price_formula
            .keys()
            .chain(self.fixed_price_per_piece.keys())
            .chain(self.rod_weight_override.keys())
            .chain(self.bundle_weight_override.keys())
    }
}

/// Create brand payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandCreate {
    pub name: String,
    pub base_price: f64,
    #[serde(default, alias = "sellsInNos")]
    pub sells_by_count: bool,
    pub weight_profile: Option<String>,
    #[serde(default, alias = "sizeFormulas")]
    pub size_price_formula: SizeMap<SizeFormula>,
    #[serde(default, alias = "sizePricing")]
    pub fixed_price_per_piece: SizeMap<f64>,
    #[serde(default, alias = "rodWeightMap")]
    pub rod_weight_override: SizeMap<f64>,
    #[serde(default, alias = "bundleWeightMap")]
    pub bundle_weight_override: SizeMap<f64>,
}

/// Update brand payload
///
/// Absent fields are left untouched. Map fields replace the whole map.
/// `weight_profile: Some("")` detaches the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandUpdate {
    pub name: Option<String>,
    pub base_price: Option<f64>,
    #[serde(alias = "sellsInNos")]
    pub sells_by_count: Option<bool>,
    pub weight_profile: Option<String>,
    #[serde(alias = "sizeFormulas")]
    pub size_price_formula: Option<SizeMap<SizeFormula>>,
    #[serde(alias = "sizePricing")]
    pub fixed_price_per_piece: Option<SizeMap<f64>>,
    #[serde(alias = "rodWeightMap")]
    pub rod_weight_override: Option<SizeMap<f64>>,
    #[serde(alias = "bundleWeightMap")]
    pub bundle_weight_override: Option<SizeMap<f64>>,
}
