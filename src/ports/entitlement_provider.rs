//! Entitlement provider port.
//!
//! The store purchase flow lives outside this crate. This port exposes just
//! enough of it to gate searches and to reconcile purchases with the backend.

use async_trait::async_trait;

/// Result of a purchase or restore initiated through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Purchase completed; the receipt must be validated with the backend.
    Purchased { receipt_data: String },
    /// The user backed out of the store sheet.
    Cancelled,
    /// The store is waiting on external approval (e.g. parental consent).
    Pending,
}

/// Store-side failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntitlementError {
    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("nothing to restore")]
    NothingToRestore,
}

/// Port for the external purchase/entitlement provider.
#[async_trait]
pub trait EntitlementProvider: Send + Sync {
    /// Whether the store currently reports an active subscription.
    async fn has_active_subscription(&self) -> bool;

    /// Starts a purchase of a store product.
    async fn purchase(&self, product_id: &str) -> Result<PurchaseOutcome, EntitlementError>;

    /// Restores previous purchases, returning the receipt to re-validate.
    async fn restore(&self) -> Result<String, EntitlementError>;
}
