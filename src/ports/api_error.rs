//! Closed error taxonomy of the recommendation API.

use super::TransportError;

/// Every way a backend call can fail.
///
/// The set is closed: callers branch on it exhaustively. `Unauthorized`
/// means re-authenticate, `LimitReached` means show the upgrade path, and
/// every other kind is a retryable failure for the end user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request address could not be composed.
    #[error("invalid endpoint")]
    InvalidEndpoint,

    /// A successful response carried no payload.
    #[error("no data in response")]
    NoData,

    /// The response (or request body) could not be (de)serialized.
    #[error("decoding error: {0}")]
    DecodingError(String),

    /// The backend reported an error.
    #[error("{0}")]
    ServerError(String),

    /// Connection failure or timeout.
    #[error("network error: {0}")]
    NetworkError(String),

    /// Missing, expired or rejected bearer token.
    #[error("unauthorized")]
    Unauthorized,

    /// Free usage exhausted and no active entitlement.
    #[error("free search limit reached")]
    LimitReached,
}

impl ApiError {
    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::ServerError(message.into())
    }

    /// Creates a decoding error.
    pub fn decoding(cause: impl ToString) -> Self {
        Self::DecodingError(cause.to_string())
    }

    /// Creates a network error.
    pub fn network(cause: impl ToString) -> Self {
        Self::NetworkError(cause.to_string())
    }

    /// The caller should re-register and retry the original action.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// The caller should present the upgrade path.
    pub fn is_limit_reached(&self) -> bool {
        matches!(self, ApiError::LimitReached)
    }

    /// Whether presenting "try again" to the user makes sense.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ApiError::Unauthorized | ApiError::LimitReached)
    }

    /// Message suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidEndpoint => "Something went wrong. Please try again.".to_string(),
            ApiError::NoData => "No results were returned. Please try again.".to_string(),
            ApiError::DecodingError(_) => {
                "We couldn't read the server's response. Please try again.".to_string()
            }
            ApiError::ServerError(message) => message.clone(),
            ApiError::NetworkError(_) => {
                "Network connection problem. Check your connection and try again.".to_string()
            }
            ApiError::Unauthorized => "Your session has expired. Please try again.".to_string(),
            ApiError::LimitReached => {
                "You've used all your free searches. Upgrade to keep searching.".to_string()
            }
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::NetworkError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn only_unauthorized_requires_reauthentication() {
        assert!(ApiError::Unauthorized.requires_reauthentication());
        assert!(!ApiError::LimitReached.requires_reauthentication());
        assert!(!ApiError::server("x").requires_reauthentication());
    }

    #[test]
    fn limit_and_auth_are_not_generic_retryable_failures() {
        assert!(!ApiError::LimitReached.is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(ApiError::NoData.is_retryable());
        assert!(ApiError::network("reset").is_retryable());
        assert!(ApiError::InvalidEndpoint.is_retryable());
    }

    #[test]
    fn server_error_shows_server_message() {
        let err = ApiError::server("Subcategory not found");
        assert_eq!(err.to_string(), "Subcategory not found");
        assert_eq!(err.user_message(), "Subcategory not found");
    }

    #[test]
    fn transport_timeout_becomes_network_error() {
        let err: ApiError = TransportError::Timeout(Duration::from_secs(30)).into();
        assert!(matches!(err, ApiError::NetworkError(ref m) if m.contains("30")));
    }
}
