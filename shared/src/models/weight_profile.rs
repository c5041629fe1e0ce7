//! Weight Profile Model

use serde::{Deserialize, Serialize};

use super::size::SizeMap;

/// Named, reusable weight table shared across brands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightProfile {
    pub id: Option<String>,
    /// e.g. "Standard ISI Weights"
    pub name: String,
    /// Weight of one piece in kg, per size
    #[serde(default, alias = "rodWeights")]
    pub rod_weight_kg: SizeMap<f64>,
    /// Pieces per bundle, per size
    #[serde(default)]
    pub rods_per_bundle: SizeMap<u32>,
}

/// Create weight profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightProfileCreate {
    pub name: String,
    #[serde(default, alias = "rodWeights")]
    pub rod_weight_kg: SizeMap<f64>,
    #[serde(default)]
    pub rods_per_bundle: SizeMap<u32>,
}

/// Update weight profile payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightProfileUpdate {
    pub name: Option<String>,
    #[serde(alias = "rodWeights")]
    pub rod_weight_kg: Option<SizeMap<f64>>,
    pub rods_per_bundle: Option<SizeMap<u32>>,
}
