//! HTTP transport adapters.
//!
//! - `ReqwestTransport` - production transport with the fixed 30s timeout
//! - `MockTransport` - queued responses for tests

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::MockTransport;
pub use reqwest_transport::{ReqwestTransport, REQUEST_TIMEOUT};
