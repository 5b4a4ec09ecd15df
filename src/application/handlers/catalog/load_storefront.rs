//! LoadStorefrontHandler - Query handler for the browse screen.

use std::sync::Arc;

use crate::domain::account::Plan;
use crate::domain::catalog::Category;
use crate::domain::foundation::Currency;
use crate::ports::{ApiError, RecommendationApi};

/// Query for categories and plans priced in one currency.
#[derive(Debug, Clone)]
pub struct LoadStorefrontQuery {
    pub currency: Currency,
}

/// Everything the browse screen needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Storefront {
    pub categories: Vec<Category>,
    pub plans: Vec<Plan>,
}

/// Fetches categories and subscription plans concurrently.
///
/// Both requests are in flight at once; the first failure is returned.
pub struct LoadStorefrontHandler {
    api: Arc<dyn RecommendationApi>,
}

impl LoadStorefrontHandler {
    pub fn new(api: Arc<dyn RecommendationApi>) -> Self {
        Self { api }
    }

    pub async fn handle(&self, query: LoadStorefrontQuery) -> Result<Storefront, ApiError> {
        let (categories, plans) = futures::try_join!(
            self.api.get_categories(&query.currency),
            self.api.get_subscription_plans(&query.currency),
        )?;

        tracing::debug!(
            currency = %query.currency,
            categories = categories.len(),
            plans = plans.len(),
            "Storefront loaded"
        );

        Ok(Storefront { categories, plans })
    }
}
