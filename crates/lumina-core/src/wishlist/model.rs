//! Wishlist value type.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product, ProductId};

/// Set of favorited product ids.
///
/// Membership is what matters; the encounter order is kept so that the
/// persisted list and the "favorites" hint stay stable. Serialized as a
/// plain JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a wishlist from ids, dropping repeats.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ProductId>,
    {
        let mut wishlist = Self::new();
        for id in ids {
            let id = id.into();
            if !wishlist.contains(&id) {
                wishlist.ids.push(id);
            }
        }
        wishlist
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Adds the id if absent, removes it if present.
    pub fn toggle(&self, id: &str) -> Wishlist {
        let mut next = self.clone();
        if let Some(pos) = next.ids.iter().position(|existing| existing == id) {
            next.ids.remove(pos);
        } else {
            next.ids.push(id.to_string());
        }
        next
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Wishlisted products in catalog order. Ids that no longer exist in
    /// the catalog are skipped.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog
            .products()
            .iter()
            .filter(|product| self.contains(&product.id))
            .collect()
    }

    /// Set equality, ignoring order.
    pub fn same_items(&self, other: &Wishlist) -> bool {
        self.len() == other.len() && self.ids.iter().all(|id| other.contains(id))
    }
}
