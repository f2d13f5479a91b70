//! Catalog domain module.
//!
//! The catalog is the immutable product list and category taxonomy. It is the
//! sole source of truth for filtering, recommendations, and entity linking.
//!
//! # Module Structure
//!
//! - `model`: `Product` and the closed `Category` enumeration
//! - `store`: `Catalog`, the validated product collection
//! - `preset`: the built-in Lumina collection and brand constants

mod model;
mod preset;
mod store;

pub use model::{Category, Product, ProductId};
pub use preset::{
    BRAND_NAME, DEFAULT_SIZE, GOOGLE_FORM_URL, ORDER_GREETING_NAME, SIZES, TAGLINE,
    WHATSAPP_NUMBER, builtin_products,
};
pub use store::{Catalog, NEW_ARRIVALS_COUNT};
