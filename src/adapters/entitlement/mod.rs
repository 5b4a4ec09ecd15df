//! Entitlement provider adapters.

mod static_provider;

pub use static_provider::StaticEntitlementProvider;
