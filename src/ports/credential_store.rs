//! Credential Store Port - persistence of the auth session.
//!
//! Exactly two values survive restarts: the device identifier and the bearer
//! token. No schema versioning.

use async_trait::async_trait;

use crate::domain::account::AuthSession;

/// Errors that can occur while reading or writing credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize credentials: {0}")]
    Serialization(String),

    #[error("Stored credentials are corrupt: {0}")]
    Corrupt(String),
}

/// Port for persisting the device id and bearer token.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the persisted session, or `None` on first launch.
    async fn load(&self) -> Result<Option<AuthSession>, CredentialStoreError>;

    /// Persists the session (device id and token, if any).
    async fn save(&self, session: &AuthSession) -> Result<(), CredentialStoreError>;

    /// Removes the token, keeping the device id.
    async fn clear_token(&self) -> Result<(), CredentialStoreError>;
}
