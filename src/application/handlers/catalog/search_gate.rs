//! SearchGate - tells the UI whether a search is expected to go through.
//!
//! The server has the final say (it answers `LIMIT_REACHED`); the gate only
//! lets the UI show the upgrade path before the user fills in answers.

use chrono::Utc;
use std::sync::Arc;

use crate::ports::{ApiError, EntitlementProvider, RecommendationApi};

/// Expected search access for the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAccess {
    /// Active subscription, from the store or the backend.
    Subscribed,
    /// Free searches left.
    Free { remaining: u32 },
    /// Free usage exhausted and no subscription.
    UpgradeRequired,
}

impl SearchAccess {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, SearchAccess::UpgradeRequired)
    }
}

pub struct SearchGate {
    api: Arc<dyn RecommendationApi>,
    entitlements: Arc<dyn EntitlementProvider>,
}

impl SearchGate {
    pub fn new(api: Arc<dyn RecommendationApi>, entitlements: Arc<dyn EntitlementProvider>) -> Self {
        Self { api, entitlements }
    }

    pub async fn check(&self) -> Result<SearchAccess, ApiError> {
        if self.entitlements.has_active_subscription().await {
            return Ok(SearchAccess::Subscribed);
        }

        let status = self.api.get_user_status().await?;
        let access = if status.subscription_active_at(Utc::now()) {
            SearchAccess::Subscribed
        } else {
            match status.remaining_free_searches() {
                0 => SearchAccess::UpgradeRequired,
                remaining => SearchAccess::Free { remaining },
            }
        };

        tracing::debug!(?access, searches_used = status.searches_used, "Search access checked");
        Ok(access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::MockRecommendationApi;
    use crate::adapters::entitlement::StaticEntitlementProvider;
    use crate::domain::account::UserStatus;
    use chrono::Duration;

    fn status(used: u32, limit: u32) -> UserStatus {
        UserStatus {
            searches_used: used,
            free_search_limit: limit,
            is_subscribed: false,
            subscription_expires_at: None,
        }
    }

    fn gate(api: MockRecommendationApi, store: StaticEntitlementProvider) -> SearchGate {
        api.set_auth_token("t1");
        SearchGate::new(Arc::new(api), Arc::new(store))
    }

    #[tokio::test]
    async fn store_subscription_skips_backend() {
        let api = MockRecommendationApi::new();
        let handle = api.clone();

        let access = gate(api, StaticEntitlementProvider::new().subscribed())
            .check()
            .await
            .unwrap();

        assert_eq!(access, SearchAccess::Subscribed);
        assert_eq!(handle.call_count(), 0);
    }

    #[tokio::test]
    async fn free_searches_remaining() {
        let api = MockRecommendationApi::new().with_user_status(status(1, 3));

        let access = gate(api, StaticEntitlementProvider::new()).check().await.unwrap();

        assert_eq!(access, SearchAccess::Free { remaining: 2 });
        assert!(access.is_allowed());
    }

    #[tokio::test]
    async fn exhausted_free_usage_requires_upgrade() {
        let api = MockRecommendationApi::new().with_user_status(status(5, 3));

        let access = gate(api, StaticEntitlementProvider::new()).check().await.unwrap();

        assert_eq!(access, SearchAccess::UpgradeRequired);
        assert!(!access.is_allowed());
    }

    #[tokio::test]
    async fn backend_subscription_counts() {
        let mut subscribed = status(5, 3);
        subscribed.is_subscribed = true;
        subscribed.subscription_expires_at = Some(Utc::now() + Duration::days(30));
        let api = MockRecommendationApi::new().with_user_status(subscribed);

        let access = gate(api, StaticEntitlementProvider::new()).check().await.unwrap();

        assert_eq!(access, SearchAccess::Subscribed);
    }

    #[tokio::test]
    async fn expired_subscription_falls_back_to_free_usage() {
        let mut lapsed = status(3, 3);
        lapsed.is_subscribed = true;
        lapsed.subscription_expires_at = Some(Utc::now() - Duration::days(1));
        let api = MockRecommendationApi::new().with_user_status(lapsed);

        let access = gate(api, StaticEntitlementProvider::new()).check().await.unwrap();

        assert_eq!(access, SearchAccess::UpgradeRequired);
    }
}
