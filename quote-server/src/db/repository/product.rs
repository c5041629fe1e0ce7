//! Product Repository

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::new_id;

use super::{RepoError, RepoResult};
use crate::db::CatalogStorage;
use crate::utils::ErrorCode;

pub fn find_all(storage: &CatalogStorage) -> RepoResult<Vec<Product>> {
    let mut products: Vec<Product> = storage.list()?;
    products.sort_by_key(|p| p.name.to_lowercase());
    Ok(products)
}

pub fn get(storage: &CatalogStorage, id: &str) -> RepoResult<Product> {
    storage.get(id)?.ok_or_else(|| not_found(id))
}

pub fn create(storage: &CatalogStorage, data: ProductCreate) -> RepoResult<Product> {
    let id = new_id();
    let product = Product {
        id: Some(id.clone()),
        name: data.name.trim().to_string(),
        unit: data.unit.trim().to_string(),
        unit_weight_kg: data.unit_weight_kg,
        price_per_unit: data.price_per_unit,
        allow_quantity_decimal: data.allow_quantity_decimal.unwrap_or(false),
    };
    storage.put(&id, &product)?;
    Ok(product)
}

pub fn update(storage: &CatalogStorage, id: &str, data: ProductUpdate) -> RepoResult<Product> {
    let mut product = get(storage, id)?;
    if let Some(name) = data.name {
        product.name = name.trim().to_string();
    }
    if let Some(unit) = data.unit {
        product.unit = unit.trim().to_string();
    }
    if let Some(weight) = data.unit_weight_kg {
        product.unit_weight_kg = Some(weight);
    }
    if let Some(price) = data.price_per_unit {
        product.price_per_unit = price;
    }
    if let Some(allow) = data.allow_quantity_decimal {
        product.allow_quantity_decimal = allow;
    }
    storage.put(id, &product)?;
    Ok(product)
}

pub fn delete(storage: &CatalogStorage, id: &str) -> RepoResult<()> {
    if !storage.remove::<Product>(id)? {
        return Err(not_found(id));
    }
    Ok(())
}

fn not_found(id: &str) -> RepoError {
    RepoError::NotFound(ErrorCode::ProductNotFound, format!("Product {id} not found"))
}
