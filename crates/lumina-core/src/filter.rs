//! Multi-facet product filtering.
//!
//! A selection holds three independent facets. An empty facet places no
//! constraint; values inside a facet are OR-ed; facets are AND-ed together.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{Category, Product};

/// Current facet selections of the shop view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub categories: BTreeSet<Category>,
    /// Accepted for the UI but never narrows the result: products carry no
    /// per-size availability.
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.sizes.insert(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.insert(color.into());
        self
    }

    pub fn toggle_category(&mut self, category: Category) {
        toggle(&mut self.categories, category);
    }

    pub fn toggle_size(&mut self, size: impl Into<String>) {
        toggle(&mut self.sizes, size.into());
    }

    pub fn toggle_color(&mut self, color: impl Into<String>) {
        toggle(&mut self.colors, color.into());
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.sizes.clear();
        self.colors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.sizes.is_empty() && self.colors.is_empty()
    }

    /// Number of selected values across all facets (badge count).
    pub fn active_count(&self) -> usize {
        self.categories.len() + self.sizes.len() + self.colors.len()
    }

    /// Returns true if the product passes every facet.
    pub fn matches(&self, product: &Product) -> bool {
        let category_match =
            self.categories.is_empty() || self.categories.contains(&product.category);
        // Size never excludes: there is no size attribute to test against.
        let size_match = true;
        let color_match = self.colors.is_empty() || product.has_any_color(&self.colors);
        category_match && size_match && color_match
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Filters products by the selection, preserving input order.
///
/// Never fails; an empty result is a valid outcome the caller renders as an
/// empty state.
pub fn filter_products<'a, I>(products: I, selection: &FilterSelection) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let filtered: Vec<&Product> = products
        .into_iter()
        .filter(|product| selection.matches(product))
        .collect();

    tracing::debug!(
        "Filter applied ({} active facet values): {} products",
        selection.active_count(),
        filtered.len()
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SIZES};
    use strum::IntoEnumIterator;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    fn sample_selections() -> Vec<FilterSelection> {
        vec![
            FilterSelection::new(),
            FilterSelection::new().with_category(Category::Lingerie),
            FilterSelection::new()
                .with_category(Category::Jumpsuits)
                .with_category(Category::Dresses),
            FilterSelection::new().with_color("Dusty Rose"),
            FilterSelection::new()
                .with_category(Category::YogaFitness)
                .with_color("Dusty Rose"),
            FilterSelection::new().with_size("XL").with_color("Black"),
            FilterSelection::new()
                .with_category(Category::WomenFashion)
                .with_color("Noir"),
        ]
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let catalog = Catalog::builtin();
        let result = catalog.filter(&FilterSelection::new());
        assert_eq!(result.len(), catalog.len());
    }

    #[test]
    fn test_categories_are_or_within_facet() {
        let catalog = Catalog::builtin();
        let selection = FilterSelection::new()
            .with_category(Category::Jumpsuits)
            .with_category(Category::Dresses);
        assert_eq!(ids(&catalog.filter(&selection)), vec!["1", "7", "8"]);
    }

    #[test]
    fn test_facets_are_and_across() {
        let catalog = Catalog::builtin();
        let selection = FilterSelection::new()
            .with_category(Category::Lingerie)
            .with_color("Dusty Rose");
        assert_eq!(ids(&catalog.filter(&selection)), vec!["5"]);
    }

    #[test]
    fn test_color_facet_matches_any_listed_color() {
        let catalog = Catalog::builtin();
        let selection = FilterSelection::new().with_color("Dusty Rose");
        assert_eq!(ids(&catalog.filter(&selection)), vec!["3", "5"]);
    }

    #[test]
    fn test_size_selection_never_reduces_result() {
        let catalog = Catalog::builtin();
        for base in sample_selections() {
            let baseline = catalog.filter(&base);
            for size in SIZES {
                let with_size = base.clone().with_size(size);
                assert_eq!(catalog.filter(&with_size), baseline);
            }
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = Catalog::builtin();
        for selection in sample_selections() {
            let once = catalog.filter(&selection);
            let twice = filter_products(once.iter().copied(), &selection);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_every_result_satisfies_predicate() {
        let catalog = Catalog::builtin();
        for selection in sample_selections() {
            for product in catalog.filter(&selection) {
                assert!(
                    selection.categories.is_empty()
                        || selection.categories.contains(&product.category)
                );
                assert!(
                    selection.colors.is_empty()
                        || product.colors.iter().any(|c| selection.colors.contains(c))
                );
            }
        }
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let catalog = Catalog::builtin();
        let selection = FilterSelection::new()
            .with_category(Category::WomenFashion)
            .with_color("Noir");
        assert!(catalog.filter(&selection).is_empty());
    }

    #[test]
    fn test_filter_preserves_catalog_order() {
        let catalog = Catalog::builtin();
        let mut selection = FilterSelection::new();
        for category in Category::iter().rev() {
            selection.toggle_category(category);
        }
        assert_eq!(
            ids(&catalog.filter(&selection)),
            vec!["1", "2", "3", "4", "5", "6", "7", "8"]
        );
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut selection = FilterSelection::new();
        selection.toggle_color("Black");
        selection.toggle_size("M");
        selection.toggle_category(Category::GymWear);
        assert_eq!(selection.active_count(), 3);

        selection.toggle_color("Black");
        assert!(selection.colors.is_empty());
        assert_eq!(selection.active_count(), 2);

        selection.clear();
        assert!(selection.is_empty());
    }
}
