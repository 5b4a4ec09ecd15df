//! Recommendation API port.
//!
//! The typed operation set of the backend. `adapters::api::ApiClient` is the
//! production implementation; the question flow and the session manager
//! depend only on this trait.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::account::{Plan, Registration, UserStatus, ValidationResult};
use crate::domain::answers::AnswerSet;
use crate::domain::catalog::{Category, QuestionSet};
use crate::domain::foundation::{Currency, DeviceId, Region, SubcategoryId};
use crate::domain::search::RankedResult;

/// Typed access to the recommendation backend.
///
/// No implementation retries; every failure is returned to the caller.
#[async_trait]
pub trait RecommendationApi: Send + Sync {
    /// Registers the device. Unauthenticated.
    ///
    /// The caller stores the returned token via [`Self::set_auth_token`].
    async fn register(
        &self,
        device_id: &DeviceId,
        region: &Region,
        currency: &Currency,
    ) -> Result<Registration, ApiError>;

    /// Usage counters and subscription state. Authenticated.
    async fn get_user_status(&self) -> Result<UserStatus, ApiError>;

    /// Category tree priced in `currency`. Unauthenticated.
    async fn get_categories(&self, currency: &Currency) -> Result<Vec<Category>, ApiError>;

    /// Questions for a subcategory. Unauthenticated.
    async fn get_questions(
        &self,
        subcategory_id: &SubcategoryId,
        currency: &Currency,
    ) -> Result<QuestionSet, ApiError>;

    /// Submits answers and returns ranked recommendations. Authenticated.
    ///
    /// Fails with [`ApiError::LimitReached`] when free usage is exhausted and
    /// the user holds no entitlement.
    async fn search(
        &self,
        subcategory_id: &SubcategoryId,
        answers: &AnswerSet,
    ) -> Result<RankedResult, ApiError>;

    /// Purchasable plans priced in `currency`. Unauthenticated.
    async fn get_subscription_plans(&self, currency: &Currency) -> Result<Vec<Plan>, ApiError>;

    /// Validates a fresh purchase receipt. Authenticated.
    async fn validate_receipt(&self, receipt_data: &str) -> Result<ValidationResult, ApiError>;

    /// Re-validates a restored receipt. Authenticated.
    async fn restore_purchases(&self, receipt_data: &str) -> Result<ValidationResult, ApiError>;

    /// Installs the bearer token used by authenticated calls.
    fn set_auth_token(&self, token: &str);

    /// Drops the bearer token.
    fn clear_auth_token(&self);

    /// Whether a bearer token is installed.
    fn has_auth_token(&self) -> bool;
}
