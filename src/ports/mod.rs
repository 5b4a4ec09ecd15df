//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the client core and the outside world. Adapters implement these ports.
//!
//! - `HttpTransport` - Moves HTTP requests and responses
//! - `RecommendationApi` - Typed backend operations (implemented by `ApiClient`)
//! - `CredentialStore` - Persisted device id and bearer token
//! - `EntitlementProvider` - Store purchase and subscription state

mod api_error;
mod credential_store;
mod entitlement_provider;
mod http_transport;
mod recommendation_api;

pub use api_error::ApiError;
pub use credential_store::{CredentialStore, CredentialStoreError};
pub use entitlement_provider::{EntitlementError, EntitlementProvider, PurchaseOutcome};
pub use http_transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use recommendation_api::RecommendationApi;
