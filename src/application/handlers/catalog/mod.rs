//! Catalog handlers: storefront loading and search gating.

mod load_storefront;
mod search_gate;

pub use load_storefront::{LoadStorefrontHandler, LoadStorefrontQuery, Storefront};
pub use search_gate::{SearchAccess, SearchGate};
