//! Storefront controller.
//!
//! All UI state (current page, open product, filters, wishlist) is owned by
//! a single `Storefront`. Views read it; changes go through named
//! [`StorefrontAction`]s that produce the next [`StorefrontState`].
//!
//! - `state`: the state value, pages, actions, and the pure reducer
//! - `controller`: `Storefront`, which applies actions and runs their effects
//! - `inquiry`: order inquiry text handed to external messaging services

mod controller;
mod inquiry;
mod state;

pub use controller::Storefront;
pub use inquiry::OrderInquiry;
pub use state::{Page, StorefrontAction, StorefrontState};
