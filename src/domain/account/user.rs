//! Registered user and usage status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, DeviceId, Region, UserId};

/// Server-side user record created by registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub device_id: Option<DeviceId>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of registering a device: a bearer token and the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub token: String,
    pub user: User,
}

/// Free-usage counters and subscription state of the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    #[serde(default)]
    pub searches_used: u32,
    #[serde(default)]
    pub free_search_limit: u32,
    #[serde(default)]
    pub is_subscribed: bool,
    #[serde(default)]
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

impl UserStatus {
    /// Free searches left before the server starts answering `LIMIT_REACHED`.
    pub fn remaining_free_searches(&self) -> u32 {
        self.free_search_limit.saturating_sub(self.searches_used)
    }

    /// Whether the subscription is active at `now`. A missing expiry on a
    /// subscribed user counts as active.
    pub fn subscription_active_at(&self, now: DateTime<Utc>) -> bool {
        self.is_subscribed
            && self
                .subscription_expires_at
                .map_or(true, |expires| expires > now)
    }

    /// Whether a search is expected to be allowed at `now`.
    pub fn can_search_at(&self, now: DateTime<Utc>) -> bool {
        self.subscription_active_at(now) || self.remaining_free_searches() > 0
    }

    pub fn can_search(&self) -> bool {
        self.can_search_at(Utc::now())
    }
}
