//! Subscription plans and receipt validation results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Billing interval of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    #[serde(alias = "week")]
    Weekly,
    #[serde(alias = "month")]
    Monthly,
    #[serde(alias = "year", alias = "annual")]
    Yearly,
    Lifetime,
}

/// Purchasable subscription plan as listed by the backend.
///
/// `product_id` is the store product the purchase flow should buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub currency: Option<String>,
    pub period: BillingPeriod,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}

/// Body of the receipt validation and restore endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    pub receipt_data: String,
}

/// Outcome of a server-side receipt check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub is_subscribed: bool,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ValidationResult {
    /// A valid receipt that grants an entitlement.
    pub fn grants_entitlement(&self) -> bool {
        self.valid && self.is_subscribed
    }
}
