//! PurchaseReconciler - reports store purchases to the backend.
//!
//! The store completes a purchase or restore and hands back receipt data.
//! The receipt is then validated with the backend in a background task so
//! the caller is never blocked on it.

use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::domain::account::ValidationResult;
use crate::ports::{ApiError, EntitlementError, EntitlementProvider, PurchaseOutcome, RecommendationApi};

/// Handle to a background receipt validation.
pub type ReconcileHandle = JoinHandle<Result<ValidationResult, ApiError>>;

/// Errors raised before any background work starts.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Store(#[from] EntitlementError),
}

/// Outcome of a purchase attempt.
#[derive(Debug)]
pub enum PurchaseProgress {
    /// The store reported a purchase; the receipt is being validated.
    Validating(ReconcileHandle),
    /// The user cancelled in the store sheet.
    Cancelled,
    /// The store is waiting on external approval.
    Pending,
}

/// Handler reconciling store purchases with the backend.
pub struct PurchaseReconciler {
    api: Arc<dyn RecommendationApi>,
    entitlements: Arc<dyn EntitlementProvider>,
}

impl PurchaseReconciler {
    pub fn new(api: Arc<dyn RecommendationApi>, entitlements: Arc<dyn EntitlementProvider>) -> Self {
        Self { api, entitlements }
    }

    /// Buys `product_id` and validates the receipt in the background.
    pub async fn purchase(&self, product_id: &str) -> Result<PurchaseProgress, ReconcileError> {
        match self.entitlements.purchase(product_id).await? {
            PurchaseOutcome::Purchased { receipt_data } => {
                tracing::info!(product_id, "Purchase completed, validating receipt");
                let api = Arc::clone(&self.api);
                Ok(PurchaseProgress::Validating(tokio::spawn(async move {
                    let result = api.validate_receipt(&receipt_data).await;
                    log_outcome("validate", &result);
                    result
                })))
            }
            PurchaseOutcome::Cancelled => {
                tracing::debug!(product_id, "Purchase cancelled");
                Ok(PurchaseProgress::Cancelled)
            }
            PurchaseOutcome::Pending => {
                tracing::info!(product_id, "Purchase pending approval");
                Ok(PurchaseProgress::Pending)
            }
        }
    }

    /// Restores previous purchases and re-validates them in the background.
    pub async fn restore(&self) -> Result<ReconcileHandle, ReconcileError> {
        let receipt_data = self.entitlements.restore().await?;
        let api = Arc::clone(&self.api);

        Ok(tokio::spawn(async move {
            let result = api.restore_purchases(&receipt_data).await;
            log_outcome("restore", &result);
            result
        }))
    }
}

fn log_outcome(kind: &'static str, result: &Result<ValidationResult, ApiError>) {
    match result {
        Ok(validation) if validation.grants_entitlement() => tracing::info!(
            kind,
            product_id = validation.product_id.as_deref().unwrap_or("unknown"),
            "Receipt accepted"
        ),
        Ok(_) => tracing::warn!(kind, "Receipt did not grant an entitlement"),
        Err(err) => tracing::warn!(kind, error = %err, "Receipt reconciliation failed"),
    }
}
