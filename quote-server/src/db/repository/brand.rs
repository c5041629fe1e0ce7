//! Brand Repository

use shared::models::{Brand, BrandCreate, BrandUpdate, WeightProfile};
use shared::util::{new_id, now_millis};

use super::{RepoError, RepoResult, weight_profile};
use crate::db::CatalogStorage;
use crate::utils::ErrorCode;

pub fn find_all(storage: &CatalogStorage) -> RepoResult<Vec<Brand>> {
    let mut brands: Vec<Brand> = storage.list()?;
    brands.sort_by_key(|b| b.name.to_lowercase());
    Ok(brands)
}

pub fn get(storage: &CatalogStorage, id: &str) -> RepoResult<Brand> {
    storage.get(id)?.ok_or_else(|| not_found(id))
}

/// Brand plus the weight profile it references
///
/// A reference to a deleted profile resolves to `None`.
pub fn load_pricing(storage: &CatalogStorage, id: &str) -> RepoResult<(Brand, Option<WeightProfile>)> {
    let brand = get(storage, id)?;
    let profile = match brand.weight_profile.as_deref() {
        Some(profile_id) => {
            let profile = weight_profile::find_by_id(storage, profile_id)?;
            if profile.is_none() {
                tracing::debug!(brand_id = id, profile_id, "Brand references a missing weight profile");
            }
            profile
        }
        None => None,
    };
    Ok((brand, profile))
}

pub fn create(storage: &CatalogStorage, data: BrandCreate) -> RepoResult<Brand> {
    let weight_profile = normalize_profile_ref(storage, data.weight_profile)?;

    let id = new_id();
    let now = now_millis();
    let brand = Brand {
        id: Some(id.clone()),
        name: data.name.trim().to_string(),
        base_price: data.base_price,
        sells_by_count: data.sells_by_count,
        weight_profile,
        size_price_formula: data.size_price_formula,
        fixed_price_per_piece: data.fixed_price_per_piece,
        rod_weight_override: data.rod_weight_override,
        bundle_weight_override: data.bundle_weight_override,
        created_at: now,
        updated_at: now,
    };
    put_unique_name(storage, &id, &brand)?;
    Ok(brand)
}

/// Absent fields stay untouched; map fields replace the whole map
pub fn update(storage: &CatalogStorage, id: &str, data: BrandUpdate) -> RepoResult<Brand> {
    let mut brand = get(storage, id)?;

    if let Some(name) = data.name {
        brand.name = name.trim().to_string();
    }
    if let Some(price) = data.base_price {
        brand.base_price = price;
    }
    if let Some(sells_by_count) = data.sells_by_count {
        brand.sells_by_count = sells_by_count;
    }
    if data.weight_profile.is_some() {
        brand.weight_profile = normalize_profile_ref(storage, data.weight_profile)?;
    }
    if let Some(formulas) = data.size_price_formula {
        brand.size_price_formula = formulas;
    }
    if let Some(prices) = data.fixed_price_per_piece {
        brand.fixed_price_per_piece = prices;
    }
    if let Some(weights) = data.rod_weight_override {
        brand.rod_weight_override = weights;
    }
    if let Some(weights) = data.bundle_weight_override {
        brand.bundle_weight_override = weights;
    }
    brand.updated_at = now_millis();

    put_unique_name(storage, id, &brand)?;
    Ok(brand)
}

pub fn delete(storage: &CatalogStorage, id: &str) -> RepoResult<()> {
    if !storage.remove::<Brand>(id)? {
        return Err(not_found(id));
    }
    Ok(())
}

/// Write the brand unless another brand already has its name (case-insensitive)
fn put_unique_name(storage: &CatalogStorage, id: &str, brand: &Brand) -> RepoResult<()> {
    let name = brand.name.trim().to_lowercase();
    let written =
        storage.put_unless(id, brand, |other: &Brand| other.name.trim().to_lowercase() == name)?;
    if !written {
        return Err(RepoError::Duplicate(
            ErrorCode::BrandNameExists,
            format!("Brand '{}' already exists", brand.name),
        ));
    }
    Ok(())
}

/// Blank reference detaches the profile; anything else must exist
fn normalize_profile_ref(storage: &CatalogStorage, profile: Option<String>) -> RepoResult<Option<String>> {
    match profile.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(profile_id) => {
            weight_profile::get(storage, profile_id)?;
            Ok(Some(profile_id.to_string()))
        }
    }
}

fn not_found(id: &str) -> RepoError {
    RepoError::NotFound(ErrorCode::BrandNotFound, format!("Brand {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::WeightProfileCreate;

    fn brand_create(name: &str, profile: Option<&str>) -> BrandCreate {
        BrandCreate {
            name: name.into(),
            base_price: 52.0,
            sells_by_count: false,
            weight_profile: profile.map(String::from),
            size_price_formula: Default::default(),
            fixed_price_per_piece: Default::default(),
            rod_weight_override: Default::default(),
            bundle_weight_override: Default::default(),
        }
    }

    fn profile_create(name: &str) -> WeightProfileCreate {
        WeightProfileCreate {
            name: name.into(),
            rod_weight_kg: [("10mm".to_string(), 0.617)].into(),
            rods_per_bundle: [("10mm".to_string(), 7)].into(),
        }
    }

    #[test]
    fn test_duplicate_name_is_rejected_case_insensitive() {
        let storage = CatalogStorage::open_in_memory().unwrap();
        create(&storage, brand_create("Tata Tiscon", None)).unwrap();

        let err = create(&storage, brand_create(" tata tiscon ", None)).unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ErrorCode::BrandNameExists, _)));
    }

    #[test]
    fn test_rename_to_own_name_is_allowed() {
        let storage = CatalogStorage::open_in_memory().unwrap();
        let brand = create(&storage, brand_create("Kamdhenu", None)).unwrap();
        let id = brand.id.unwrap();

        let update = BrandUpdate {
            name: Some("KAMDHENU".into()),
            base_price: Some(55.0),
            ..Default::default()
        };
        let updated = super::update(&storage, &id, update).unwrap();
        assert_eq!(updated.name, "KAMDHENU");
        assert_eq!(updated.base_price, 55.0);
    }

    #[test]
    fn test_unknown_profile_reference_is_rejected() {
        let storage = CatalogStorage::open_in_memory().unwrap();
        let err = create(&storage, brand_create("Kamdhenu", Some("nope"))).unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ErrorCode::WeightProfileNotFound, _)));
    }

    #[test]
    fn test_deleted_profile_leaves_brand_without_weights() {
        let storage = CatalogStorage::open_in_memory().unwrap();
        let profile = weight_profile::create(&storage, profile_create("Standard ISI")).unwrap();
        let profile_id = profile.id.unwrap();
        let brand = create(&storage, brand_create("Kamdhenu", Some(&profile_id))).unwrap();
        let brand_id = brand.id.unwrap();

        let (_, loaded) = load_pricing(&storage, &brand_id).unwrap();
        assert!(loaded.is_some());

        weight_profile::delete(&storage, &profile_id).unwrap();

        let (brand, loaded) = load_pricing(&storage, &brand_id).unwrap();
        assert_eq!(brand.weight_profile.as_deref(), Some(profile_id.as_str()));
        assert!(loaded.is_none());
    }

    #[test]
    fn test_blank_profile_update_detaches() {
        let storage = CatalogStorage::open_in_memory().unwrap();
        let profile = weight_profile::create(&storage, profile_create("Standard ISI")).unwrap();
        let brand = create(&storage, brand_create("Kamdhenu", profile.id.as_deref())).unwrap();
        let id = brand.id.unwrap();

        let update = BrandUpdate {
            weight_profile: Some(String::new()),
            ..Default::default()
        };
        let updated = super::update(&storage, &id, update).unwrap();
        assert!(updated.weight_profile.is_none());
    }

    #[test]
    fn test_missing_brand() {
        let storage = CatalogStorage::open_in_memory().unwrap();
        let err = get(&storage, "missing").unwrap_err();
        assert!(matches!(err, RepoError::NotFound(ErrorCode::BrandNotFound, _)));
        assert!(delete(&storage, "missing").is_err());
    }

    #[test]
    fn test_concurrent_creates_keep_names_unique() {
        let storage = CatalogStorage::open_in_memory().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let storage = storage.clone();
                std::thread::spawn(move || create(&storage, brand_create("Tata Tiscon", None)))
            })
            .collect();
        let created = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(created, 1);
        assert_eq!(find_all(&storage).unwrap().len(), 1);
    }

    #[test]
    fn test_rename_onto_existing_name_is_rejected() {
        let storage = CatalogStorage::open_in_memory().unwrap();
        create(&storage, brand_create("Tata Tiscon", None)).unwrap();
        let other = create(&storage, brand_create("Kamdhenu", None)).unwrap();

        let update = BrandUpdate {
            name: Some("TATA TISCON".into()),
            ..Default::default()
        };
        let err = super::update(&storage, other.id.as_deref().unwrap(), update).unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(ErrorCode::BrandNameExists, _)));
        assert_eq!(get(&storage, other.id.as_deref().unwrap()).unwrap().name, "Kamdhenu");
    }
}
