//! Weight / Unit Resolver
//!
//! For a brand and a size, resolves the three numbers every conversion
//! needs: piece weight, pieces per bundle, bundle weight.
//!
//! Resolution order per field:
//! 1. brand-level override map
//! 2. value derived from the referenced weight profile
//! 3. absent (`None`)
//!
//! Zero and negative stored values count as absent. Nothing here fails:
//! missing data just leaves the field `None` and the calculators skip the
//! conversion paths that need it.

use std::collections::BTreeSet;

use rust_decimal::prelude::*;
use serde::Serialize;
use shared::models::{Brand, WeightProfile, positive_count, positive_entry};

use super::item_calculator::{mul_or_zero, to_decimal};

/// Brand configuration plus the weight profile it references
///
/// Both records stay separate; the context only borrows them. A profile
/// whose id does not match the brand's reference is ignored.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    pub brand: &'a Brand,
    pub profile: Option<&'a WeightProfile>,
}

impl<'a> PricingContext<'a> {
    pub fn new(brand: &'a Brand, profile: Option<&'a WeightProfile>) -> Self {
        let profile = profile.filter(|p| {
            brand.weight_profile.is_some() && p.id.as_deref() == brand.weight_profile.as_deref()
        });
        Self { brand, profile }
    }

    /// Brand without any weight profile
    pub fn without_profile(brand: &'a Brand) -> Self {
        Self {
            brand,
            profile: None,
        }
    }

    pub fn resolve(&self, size: &str) -> ResolvedWeights {
        resolve(self.brand, self.profile, size)
    }

    /// Every size known to the brand or its profile, sorted
    pub fn sizes(&self) -> BTreeSet<&'a str> {
        let mut sizes: BTreeSet<&'a str> =
            self.brand.configured_sizes().map(String::as_str).collect();
        if let Some(profile) = self.profile {
            sizes.extend(profile.rod_weight_kg.keys().map(String::as_str));
            sizes.extend(profile.rods_per_bundle.keys().map(String::as_str));
        }
        sizes
    }

    /// Resolved weight table for every known size
    pub fn weight_table(&self) -> Vec<WeightRow> {
        self.sizes()
            .into_iter()
            .map(|size| WeightRow::new(size, &self.resolve(size)))
            .collect()
    }
}

/// Resolved weights for one (brand, size)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedWeights {
    /// Weight of one piece in kg
    pub piece_weight_kg: Option<Decimal>,
    /// Pieces per bundle
    pub pieces_per_bundle: Option<u32>,
    /// Weight of one bundle in kg
    pub bundle_weight_kg: Option<Decimal>,
}

impl ResolvedWeights {
    pub fn is_empty(&self) -> bool {
        self.piece_weight_kg.is_none()
            && self.pieces_per_bundle.is_none()
            && self.bundle_weight_kg.is_none()
    }
}

/// Resolve weights for one size
///
/// An explicit bundle-weight override wins even when it disagrees with
/// `pieces_per_bundle × piece_weight_kg`; legacy price lists do not always
/// factor cleanly.
pub fn resolve(brand: &Brand, profile: Option<&WeightProfile>, size: &str) -> ResolvedWeights {
    let piece_weight_kg = positive_entry(&brand.rod_weight_override, size)
        .or_else(|| profile.and_then(|p| positive_entry(&p.rod_weight_kg, size)))
        .map(to_decimal)
        .filter(|w| w.is_sign_positive() && !w.is_zero());

    let pieces_per_bundle = profile.and_then(|p| positive_count(&p.rods_per_bundle, size));

    let bundle_weight_kg = match positive_entry(&brand.bundle_weight_override, size)
        .map(to_decimal)
        .filter(|w| !w.is_zero())
    {
        Some(weight) => Some(weight),
        None => match (pieces_per_bundle, piece_weight_kg) {
            (Some(count), Some(piece)) => {
                Some(mul_or_zero(Decimal::from(count), piece)).filter(|w| !w.is_zero())
            }
            _ => None,
        },
    };

    ResolvedWeights {
        piece_weight_kg,
        pieces_per_bundle,
        bundle_weight_kg,
    }
}

/// One row of a brand's resolved weight table (API view)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightRow {
    pub size: String,
    pub piece_weight_kg: Option<f64>,
    pub pieces_per_bundle: Option<u32>,
    pub bundle_weight_kg: Option<f64>,
}

impl WeightRow {
    fn new(size: &str, weights: &ResolvedWeights) -> Self {
        Self {
            size: size.to_string(),
            piece_weight_kg: weights.piece_weight_kg.and_then(|w| w.to_f64()),
            pieces_per_bundle: weights.pieces_per_bundle,
            bundle_weight_kg: weights.bundle_weight_kg.and_then(|w| w.to_f64()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_brand(profile: Option<&str>) -> Brand {
        Brand {
            id: Some("brand-1".into()),
            name: "Kamdhenu".into(),
            base_price: 50.0,
            sells_by_count: false,
            weight_profile: profile.map(String::from),
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
        profile.rod_weight_kg.insert("10mm".into(), 0.617);
        profile.rods_per_bundle.insert("10mm".into(), 7);
        profile.rod_weight_kg.insert("12mm".into(), 0.888);
        profile.rods_per_bundle.insert("16mm".into(), 3);
        profile
    }

    #[test]
    fn test_profile_values_derive_bundle_weight() {
        let brand = make_brand(Some("isi"));
        let profile = make_profile();
        let weights = PricingContext::new(&brand, Some(&profile)).resolve("10mm");

        assert_eq!(weights.piece_weight_kg, Some(dec("0.617")));
        assert_eq!(weights.pieces_per_bundle, Some(7));
        assert_eq!(weights.bundle_weight_kg, Some(dec("4.319")));
    }

    #[test]
    fn test_brand_override_beats_profile() {
        let mut brand = make_brand(Some("isi"));
        brand.rod_weight_override.insert("10mm".into(), 0.6);
        let profile = make_profile();
        let weights = PricingContext::new(&brand, Some(&profile)).resolve("10mm");

        assert_eq!(weights.piece_weight_kg, Some(dec("0.6")));
        // Derived from the overridden piece weight
        assert_eq!(weights.bundle_weight_kg, Some(dec("4.2")));
    }

    #[test]
    fn test_bundle_override_wins_even_if_inconsistent() {
        let mut brand = make_brand(Some("isi"));
        brand.bundle_weight_override.insert("10mm".into(), 4.5);
        let profile = make_profile();
        let weights = PricingContext::new(&brand, Some(&profile)).resolve("10mm");

        assert_eq!(weights.piece_weight_kg, Some(dec("0.617")));
        assert_eq!(weights.bundle_weight_kg, Some(dec("4.5")));
    }

    #[test]
    fn test_partial_profile_leaves_bundle_unknown() {
        let brand = make_brand(Some("isi"));
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));

        // Piece weight only
        let weights = ctx.resolve("12mm");
        assert_eq!(weights.piece_weight_kg, Some(dec("0.888")));
        assert_eq!(weights.pieces_per_bundle, None);
        assert_eq!(weights.bundle_weight_kg, None);

        // Count only
        let weights = ctx.resolve("16mm");
        assert_eq!(weights.piece_weight_kg, None);
        assert_eq!(weights.pieces_per_bundle, Some(3));
        assert_eq!(weights.bundle_weight_kg, None);
    }

    #[test]
    fn test_zero_values_are_unknown() {
        let mut brand = make_brand(None);
        brand.rod_weight_override.insert("8mm".into(), 0.0);
        brand.bundle_weight_override.insert("8mm".into(), 0.0);
        let weights = PricingContext::without_profile(&brand).resolve("8mm");

        assert!(weights.is_empty());
    }

    #[test]
    fn test_dangling_profile_reference_resolves_empty() {
        // Brand points at a profile that was deleted; caller passes nothing
        let brand = make_brand(Some("deleted-profile"));
        let weights = PricingContext::new(&brand, None).resolve("10mm");
        assert!(weights.is_empty());
    }

    #[test]
    fn test_mismatched_profile_is_ignored() {
        let brand = make_brand(Some("other"));
        let profile = make_profile();
        let ctx = PricingContext::new(&brand, Some(&profile));
        assert!(ctx.profile.is_none());
        assert!(ctx.resolve("10mm").is_empty());
    }

    #[test]
    fn test_weight_table_covers_every_known_size() {
        let mut brand = make_brand(Some("isi"));
        brand.bundle_weight_override.insert("32mm".into(), 75.84);
        let profile = make_profile();
        let table = PricingContext::new(&brand, Some(&profile)).weight_table();

        let sizes: Vec<&str> = table.iter().map(|r| r.size.as_str()).collect();
        assert_eq!(sizes, vec!["10mm", "12mm", "16mm", "32mm"]);
        assert_eq!(table[0].bundle_weight_kg, Some(4.319));
        assert_eq!(table[3].piece_weight_kg, None);
        assert_eq!(table[3].bundle_weight_kg, Some(75.84));
    }
}
