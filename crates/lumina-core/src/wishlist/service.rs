//! Wishlist load/save lifecycle.

use std::sync::Arc;

use super::model::Wishlist;
use super::repository::KeyValueStore;
use crate::catalog::ProductId;
use crate::error::Result;

/// Storage key the wishlist is kept under.
pub const WISHLIST_STORAGE_KEY: &str = "lumina_wishlist";

/// Loads and persists the wishlist through a [`KeyValueStore`].
///
/// Loading never fails: a missing key, an unreadable store, or a payload
/// that is not a JSON list of strings all yield an empty wishlist. Saving
/// writes the whole set on every call.
#[derive(Clone)]
pub struct WishlistManager {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl WishlistManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, WISHLIST_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted wishlist, degrading to empty on any fault.
    pub fn load(&self) -> Wishlist {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No wishlist stored under '{}'", self.key);
                return Wishlist::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read wishlist from storage: {}", e);
                return Wishlist::new();
            }
        };

        match serde_json::from_str::<Vec<ProductId>>(&raw) {
            Ok(ids) => {
                let wishlist = Wishlist::from_ids(ids);
                tracing::debug!("Loaded wishlist with {} items", wishlist.len());
                wishlist
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed wishlist payload under '{}': {}",
                    self.key,
                    e
                );
                Wishlist::new()
            }
        }
    }

    /// Writes the full wishlist back as a JSON list.
    pub fn save(&self, wishlist: &Wishlist) -> Result<()> {
        let payload = serde_json::to_string(wishlist)?;
        self.store.set(&self.key, &payload)?;
        tracing::debug!("Saved wishlist with {} items", wishlist.len());
        Ok(())
    }

    /// Toggles an id and persists the result.
    ///
    /// The new state is returned even if the write fails; the failure is
    /// logged and the next save carries the latest state.
    pub fn toggle_and_save(&self, wishlist: &Wishlist, id: &str) -> Wishlist {
        let next = wishlist.toggle(id);
        if let Err(e) = self.save(&next) {
            tracing::warn!("Failed to persist wishlist: {}", e);
        }
        next
    }
}
