//! Wishlist domain module.
//!
//! - `model`: the `Wishlist` value (ordered set of product ids)
//! - `repository`: the key-value port durable storage implements
//! - `service`: `WishlistManager`, the load/save lifecycle against that port

mod model;
mod repository;
mod service;

pub use model::Wishlist;
pub use repository::KeyValueStore;
pub use service::{WISHLIST_STORAGE_KEY, WishlistManager};
