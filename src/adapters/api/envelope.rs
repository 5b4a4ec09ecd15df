//! Response envelope decoding and status classification.
//!
//! Every backend response has the shape
//! `{"success": bool, "data": T | null, "error": {"code", "message"} | null}`.
//! [`interpret`] turns a raw response into either the typed payload or an
//! [`ApiError`], in this order:
//!
//! | Status   | Outcome                                                         |
//! |----------|-----------------------------------------------------------------|
//! | 2xx      | error present -> `ServerError`; data null -> `NoData`; else data |
//! | 401      | `Unauthorized`                                                  |
//! | 403      | code `LIMIT_REACHED` -> `LimitReached`; else server message     |
//! | 429      | `ServerError` with the fixed rate-limit message                 |
//! | other    | server message if present, else `Server error: <status>`        |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ports::{ApiError, HttpResponse};

/// Error code the backend uses when free usage is exhausted.
pub const LIMIT_REACHED_CODE: &str = "LIMIT_REACHED";

/// Message for HTTP 429.
pub const TOO_MANY_REQUESTS_MESSAGE: &str = "Too many requests. Please try again later.";

/// Message for a 403 that carries no server message.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied";

/// Standard response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "none")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

fn none<T>() -> Option<T> {
    None
}

/// Error object inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Decodes and classifies a raw response.
pub fn interpret<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if response.is_success() {
        let envelope = decode(&response.body).map_err(ApiError::decoding)?;
        if let Some(error) = envelope.error {
            return Err(ApiError::ServerError(error.message));
        }
        let data = envelope.data.ok_or(ApiError::NoData)?;
        return serde_json::from_value(data).map_err(ApiError::decoding);
    }

    match response.status {
        401 => Err(ApiError::Unauthorized),
        403 => match error_body(&response.body) {
            Some(error) if error.code == LIMIT_REACHED_CODE => Err(ApiError::LimitReached),
            Some(error) if !error.message.is_empty() => Err(ApiError::ServerError(error.message)),
            _ => Err(ApiError::server(ACCESS_DENIED_MESSAGE)),
        },
        429 => Err(ApiError::server(TOO_MANY_REQUESTS_MESSAGE)),
        status => match error_body(&response.body) {
            Some(error) if !error.message.is_empty() => Err(ApiError::ServerError(error.message)),
            _ => Err(ApiError::ServerError(format!("Server error: {}", status))),
        },
    }
}

fn decode(body: &[u8]) -> Result<Envelope<serde_json::Value>, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Error object of a non-2xx body, if the body is an envelope at all.
fn error_body(body: &[u8]) -> Option<ErrorBody> {
    decode(body).ok().and_then(|envelope| envelope.error)
}
