//! Static entitlement provider.
//!
//! Answers from fixed, configurable state instead of a real store. Used by
//! tests and by the demo binary, which has no store to talk to.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::ports::{EntitlementError, EntitlementProvider, PurchaseOutcome};

#[derive(Debug, Default)]
struct StaticState {
    subscribed: bool,
    outcomes: HashMap<String, PurchaseOutcome>,
    restore_receipt: Option<String>,
    unavailable: Option<String>,
    purchases: Vec<String>,
}

/// Entitlement provider with scripted answers.
#[derive(Debug, Clone, Default)]
pub struct StaticEntitlementProvider {
    state: Arc<Mutex<StaticState>>,
}

impl StaticEntitlementProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports an active subscription.
    pub fn subscribed(self) -> Self {
        self.state.lock().unwrap().subscribed = true;
        self
    }

    /// Scripts the outcome of purchasing `product_id`.
    pub fn with_product(self, product_id: &str, outcome: PurchaseOutcome) -> Self {
        self.state
            .lock()
            .unwrap()
            .outcomes
            .insert(product_id.to_string(), outcome);
        self
    }

    /// Receipt returned by `restore`.
    pub fn with_restorable_receipt(self, receipt_data: &str) -> Self {
        self.state.lock().unwrap().restore_receipt = Some(receipt_data.to_string());
        self
    }

    /// Makes every store operation fail.
    pub fn unavailable(self, reason: &str) -> Self {
        self.state.lock().unwrap().unavailable = Some(reason.to_string());
        self
    }

    /// Product ids passed to `purchase`, in order.
    pub fn purchases(&self) -> Vec<String> {
        self.state.lock().unwrap().purchases.clone()
    }
}

#[async_trait]
impl EntitlementProvider for StaticEntitlementProvider {
    async fn has_active_subscription(&self) -> bool {
        self.state.lock().unwrap().subscribed
    }

    async fn purchase(&self, product_id: &str) -> Result<PurchaseOutcome, EntitlementError> {
        let mut state = self.state.lock().unwrap();
        state.purchases.push(product_id.to_string());

        if let Some(reason) = &state.unavailable {
            return Err(EntitlementError::StoreUnavailable(reason.clone()));
        }

        let outcome = state
            .outcomes
            .get(product_id)
            .cloned()
            .ok_or_else(|| EntitlementError::ProductNotFound(product_id.to_string()))?;

        if matches!(outcome, PurchaseOutcome::Purchased { .. }) {
            state.subscribed = true;
        }
        Ok(outcome)
    }

    async fn restore(&self) -> Result<String, EntitlementError> {
        let state = self.state.lock().unwrap();
        if let Some(reason) = &state.unavailable {
            return Err(EntitlementError::StoreUnavailable(reason.clone()));
        }
        state
            .restore_receipt
            .clone()
            .ok_or(EntitlementError::NothingToRestore)
    }
}
