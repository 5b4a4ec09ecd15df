//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the client core to external systems:
//! - `api` - Recommendation API client (HTTP) and its in-process mock
//! - `http` - HTTP transports (reqwest, mock)
//! - `storage` - Credential stores (file, in-memory)
//! - `entitlement` - Store entitlement providers

pub mod api;
pub mod entitlement;
pub mod http;
pub mod storage;

pub use api::{ApiClient, MockRecommendationApi};
pub use entitlement::StaticEntitlementProvider;
pub use http::{MockTransport, ReqwestTransport};
pub use storage::{FileCredentialStore, InMemoryCredentialStore};
