//! Reqwest-backed implementation of the `HttpTransport` port.
//!
//! # Configuration
//!
//! ```ignore
//! let transport = ReqwestTransport::new()?;                 // 30s timeout
//! let client = ApiClient::new(base_url, Arc::new(transport));
//! ```

use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

use crate::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Fixed per-request timeout of the API contract.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport over a shared `reqwest::Client`.
///
/// `reqwest::Client` pools connections internally and is cheap to share, so
/// concurrent requests do not block each other.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport with the contract timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Creates a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shortlist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = self.classify(e);
            tracing::warn!(method = %request.method, error = %err, "HTTP request failed");
            err
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
