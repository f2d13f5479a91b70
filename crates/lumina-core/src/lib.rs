//! Domain layer for the Lumina storefront: the catalog, faceted filtering,
//! the persisted wishlist, recommendations, product-mention linking, and the
//! stylist conversation.
//!
//! Storage and text generation are ports (`KeyValueStore`, `TextGenerator`);
//! their adapters live in `lumina-infrastructure` and `lumina-interaction`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod linking;
pub mod recommend;
pub mod secret;
pub mod session;
pub mod storefront;
pub mod wishlist;

// Re-export common error type
pub use error::LuminaError;
