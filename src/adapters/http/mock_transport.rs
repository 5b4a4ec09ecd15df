//! Mock HTTP transport for testing.
//!
//! Queues canned responses and records every request, so tests can drive the
//! API client without a server.
//!
//! # Example
//!
//! ```ignore
//! let transport = MockTransport::new()
//!     .with_json(200, json!({"success": true, "data": [], "error": null}));
//!
//! let client = ApiClient::new("https://api.test", Arc::new(transport.clone()));
//! client.get_categories(&gbp).await?;
//! assert_eq!(transport.last_request().unwrap().method, HttpMethod::Get);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Mock transport returning queued responses in order.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response.
    pub fn with_json(self, status: u16, body: serde_json::Value) -> Self {
        self.push(Ok(HttpResponse::json(status, &body)))
    }

    /// Queues a `{"success": true, "data": ..., "error": null}` response.
    pub fn with_data(self, data: serde_json::Value) -> Self {
        self.with_json(
            200,
            serde_json::json!({"success": true, "data": data, "error": null}),
        )
    }

    /// Queues an error envelope with the given status.
    pub fn with_api_error(self, status: u16, code: &str, message: &str) -> Self {
        self.with_json(
            status,
            serde_json::json!({
                "success": false,
                "data": null,
                "error": {"code": code, "message": message}
            }),
        )
    }

    /// Queues a response with a raw body.
    pub fn with_raw(self, status: u16, body: &str) -> Self {
        self.push(Ok(HttpResponse::new(status, body.as_bytes().to_vec())))
    }

    /// Queues a transport failure.
    pub fn with_error(self, error: TransportError) -> Self {
        self.push(Err(error))
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Responses still queued.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    fn push(self, response: Result<HttpResponse, TransportError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no mock response queued".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpMethod;

    fn request(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: vec![],
            body: None,
        }
    }

    #[tokio::test]
    async fn returns_responses_in_order_and_records_requests() {
        let transport = MockTransport::new()
            .with_raw(200, "first")
            .with_error(TransportError::Connect("refused".to_string()));

        let first = transport.send(request("https://a/1")).await.unwrap();
        let second = transport.send(request("https://a/2")).await;

        assert_eq!(first.body, b"first");
        assert_eq!(second, Err(TransportError::Connect("refused".to_string())));
        assert_eq!(transport.request_count(), 2);
        assert_eq!(transport.last_request().unwrap().url, "https://a/2");
    }

    #[tokio::test]
    async fn empty_queue_is_an_error() {
        let transport = MockTransport::new();
        assert!(transport.send(request("https://a")).await.is_err());
        assert_eq!(transport.remaining(), 0);
    }
}
