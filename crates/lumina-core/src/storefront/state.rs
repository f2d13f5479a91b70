//! Storefront state and reducer.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Category, ProductId};
use crate::filter::FilterSelection;
use crate::wishlist::Wishlist;

/// Top-level pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Shop,
    Wishlist,
    About,
}

/// Named state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontAction {
    Navigate(Page),
    /// Open the product view. Unknown ids are ignored.
    ViewProduct(ProductId),
    /// Open the product view by full display name, ignoring case. Unknown
    /// names are ignored.
    ViewProductByName(String),
    CloseProduct,
    ToggleWishlist(ProductId),
    ToggleCategory(Category),
    ToggleSize(String),
    ToggleColor(String),
    ClearFilters,
}

/// Everything the views render from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorefrontState {
    pub page: Page,
    pub selected_product: Option<ProductId>,
    pub filters: FilterSelection,
    pub wishlist: Wishlist,
}

impl StorefrontState {
    pub fn with_wishlist(wishlist: Wishlist) -> Self {
        Self {
            wishlist,
            ..Self::default()
        }
    }

    /// Returns the state after `action`. Lookup misses return an unchanged copy.
    pub fn reduce(&self, action: &StorefrontAction, catalog: &Catalog) -> StorefrontState {
        let mut next = self.clone();
        match action {
            StorefrontAction::Navigate(page) => next.page = *page,
            StorefrontAction::ViewProduct(id) => match catalog.get(id) {
                Some(product) => next.selected_product = Some(product.id.clone()),
                None => tracing::debug!("View requested for unknown product '{}'", id),
            },
            StorefrontAction::ViewProductByName(name) => match catalog.find_by_name(name) {
                Some(product) => next.selected_product = Some(product.id.clone()),
                None => tracing::debug!("View requested for unknown product name '{}'", name),
            },
            StorefrontAction::CloseProduct => next.selected_product = None,
            StorefrontAction::ToggleWishlist(id) => {
                // Stale ids may still be removed; unknown ids are never added
                if catalog.get(id).is_some() || self.wishlist.contains(id) {
                    next.wishlist = self.wishlist.toggle(id);
                } else {
                    tracing::debug!("Wishlist toggle for unknown product '{}'", id);
                }
            }
            StorefrontAction::ToggleCategory(category) => next.filters.toggle_category(*category),
            StorefrontAction::ToggleSize(size) => next.filters.toggle_size(size.clone()),
            StorefrontAction::ToggleColor(color) => next.filters.toggle_color(color.clone()),
            StorefrontAction::ClearFilters => next.filters.clear(),
        }
        next
    }
}
