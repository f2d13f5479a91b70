//! Validated, immutable product collection.

use std::collections::HashSet;

use super::model::{Category, Product};
use super::preset::builtin_products;
use crate::error::{LuminaError, Result};
use crate::filter::{FilterSelection, filter_products};

/// Number of products shown in the home page "New Arrivals" strip.
pub const NEW_ARRIVALS_COUNT: usize = 4;

/// The product catalog.
///
/// Construction checks the invariants the rest of the engine relies on:
/// identifiers and display names are unique (names case-insensitively, since
/// the entity linker matches them that way), names are non-empty, and every
/// product lists at least one color. Product order is preserved and is the
/// order every derived view uses.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for product in &products {
            if product.name.trim().is_empty() {
                return Err(LuminaError::InvalidCatalog(format!(
                    "product '{}' has an empty name",
                    product.id
                )));
            }
            if product.colors.is_empty() {
                return Err(LuminaError::InvalidCatalog(format!(
                    "product '{}' lists no colors",
                    product.id
                )));
            }
            if !ids.insert(product.id.as_str()) {
                return Err(LuminaError::InvalidCatalog(format!(
                    "duplicate product id '{}'",
                    product.id
                )));
            }
            if !names.insert(product.name.to_lowercase()) {
                return Err(LuminaError::InvalidCatalog(format!(
                    "duplicate product name '{}'",
                    product.name
                )));
            }
        }

        tracing::debug!("Catalog loaded with {} products", products.len());
        Ok(Self { products })
    }

    /// The built-in Lumina collection.
    pub fn builtin() -> Self {
        Self {
            products: builtin_products(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks a product up by identifier.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Looks a product up by its full display name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|product| product.name.to_lowercase() == wanted)
    }

    /// Resolves an identifier, falling back to a name lookup.
    pub fn resolve(&self, id_or_name: &str) -> Option<&Product> {
        self.get(id_or_name.trim())
            .or_else(|| self.find_by_name(id_or_name))
    }

    /// Products of a single category, in catalog order.
    pub fn in_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Distinct color names across the catalog, in first-encounter order.
    pub fn all_colors(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .flat_map(|product| product.colors.iter())
            .filter(|color| seen.insert(color.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// First products of the catalog, shown as new arrivals.
    pub fn new_arrivals(&self) -> &[Product] {
        let end = NEW_ARRIVALS_COUNT.min(self.products.len());
        &self.products[..end]
    }

    /// Filtered view of the whole catalog.
    pub fn filter(&self, selection: &FilterSelection) -> Vec<&Product> {
        filter_products(&self.products, selection)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::new(builtin_products()).expect("builtin catalog is valid");
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.get("2").unwrap().name, "Aura Seamless Leggings");
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut products = builtin_products();
        products[1].id = "1".to_string();
        let err = Catalog::new(products).unwrap_err();
        assert!(err.to_string().contains("duplicate product id"));
    }

    #[test]
    fn test_rejects_names_differing_only_in_case() {
        let mut products = builtin_products();
        products[1].name = "midnight silk wrap DRESS".to_string();
        assert!(Catalog::new(products).is_err());
    }

    #[test]
    fn test_rejects_product_without_colors() {
        let mut products = builtin_products();
        products[0].colors.clear();
        assert!(Catalog::new(products).is_err());
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let catalog = Catalog::builtin();
        let product = catalog.find_by_name("zen flow YOGA set").unwrap();
        assert_eq!(product.id, "3");
        assert!(catalog.find_by_name("Zen Flow").is_none());
    }

    #[test]
    fn test_resolve_prefers_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve("7").unwrap().name, "Celine Belted Jumpsuit");
        assert_eq!(catalog.resolve("celine belted jumpsuit").unwrap().id, "7");
        assert!(catalog.resolve("99").is_none());
    }

    #[test]
    fn test_all_colors_are_distinct_in_encounter_order() {
        let catalog = Catalog::builtin();
        let colors = catalog.all_colors();
        assert_eq!(&colors[..3], &["Midnight Blue", "Emerald Green", "Rose Gold"]);
        // "Dusty Rose" appears on products 3 and 5
        assert_eq!(colors.iter().filter(|c| **c == "Dusty Rose").count(), 1);
        assert_eq!(colors.len(), 23);
    }

    #[test]
    fn test_new_arrivals_are_first_four() {
        let catalog = Catalog::builtin();
        let ids: Vec<_> = catalog.new_arrivals().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_in_category() {
        let catalog = Catalog::builtin();
        let ids: Vec<_> = catalog
            .in_category(Category::Lingerie)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["5", "6"]);
        assert!(catalog.in_category(Category::WomenFashion).is_empty());
    }
}
