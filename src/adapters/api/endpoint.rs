//! Request composition for API endpoints.
//!
//! Every endpoint lives under `<base>/api`. Path literals are validated;
//! dynamic segments (ids) are percent-encoded by the URL builder.

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::ports::{ApiError, HttpMethod, HttpRequest};

const API_PREFIX: &str = "api";

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Describes one API call before it is bound to a base URL and token.
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: HttpMethod,
    path: String,
    segments: Vec<Segment>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    authenticated: bool,
}

impl Endpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        let path = path.into();
        let segments = path
            .trim_start_matches('/')
            .split('/')
            .map(|s| Segment::Literal(s.to_string()))
            .collect();
        Self {
            method,
            path,
            segments,
            query: Vec::new(),
            body: None,
            authenticated: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Appends a dynamic path segment.
    pub fn param(mut self, value: impl Into<String>) -> Self {
        self.segments.push(Segment::Param(value.into()));
        self
    }

    /// Appends a literal path segment after a dynamic one.
    pub fn then(mut self, literal: &str) -> Self {
        self.segments.push(Segment::Literal(literal.to_string()));
        self
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Attaches a JSON body. Serialization failures are decoding errors.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_vec(body).map_err(ApiError::decoding)?);
        Ok(self)
    }

    /// Marks the endpoint as requiring the bearer token.
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Binds the endpoint to a base URL and (optional) token.
    ///
    /// The `Authorization` header is attached only when the endpoint is
    /// authenticated and a non-empty token is present.
    pub fn build(
        &self,
        base_url: &str,
        token: Option<&SecretString>,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url(base_url)?;

        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if self.authenticated {
            if let Some(token) = token.filter(|t| !t.expose_secret().is_empty()) {
                headers.push((
                    "Authorization".to_string(),
                    format!("Bearer {}", token.expose_secret()),
                ));
            }
        }

        Ok(HttpRequest {
            method: self.method,
            url: url.to_string(),
            headers,
            body: self.body.clone(),
        })
    }

    fn url(&self, base_url: &str) -> Result<Url, ApiError> {
        if !self.path.starts_with('/') {
            return Err(ApiError::InvalidEndpoint);
        }

        let mut url = Url::parse(base_url).map_err(|_| ApiError::InvalidEndpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidEndpoint);
        }

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidEndpoint)?;
            path.pop_if_empty().push(API_PREFIX);
            for segment in &self.segments {
                match segment {
                    Segment::Literal(s) if is_valid_literal(s) => {
                        path.push(s);
                    }
                    Segment::Param(s) if !s.trim().is_empty() => {
                        path.push(s);
                    }
                    _ => return Err(ApiError::InvalidEndpoint),
                }
            }
        }

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}

fn is_valid_literal(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
