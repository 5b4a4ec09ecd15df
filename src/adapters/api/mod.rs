//! Recommendation API adapters.
//!
//! - `ApiClient` - HTTP client over any `HttpTransport`
//! - `MockRecommendationApi` - in-process API for tests
//!
//! The envelope module owns status classification; the endpoint module owns
//! address and header composition.

mod client;
mod endpoint;
pub mod envelope;
mod mock_api;

pub use client::ApiClient;
pub use endpoint::Endpoint;
pub use envelope::{Envelope, ErrorBody};
pub use mock_api::{MockCall, MockRecommendationApi};
