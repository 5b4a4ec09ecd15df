//! In-memory Credential Store Adapter
//!
//! Holds the session in process memory. Useful for tests and for running
//! without touching the filesystem.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::domain::account::AuthSession;
use crate::ports::{CredentialStore, CredentialStoreError};

/// In-memory credential storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    session: Arc<RwLock<Option<AuthSession>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a session
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(Some(session))),
        }
    }

    /// Current contents, for assertions
    pub fn snapshot(&self) -> Option<AuthSession> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<AuthSession>, CredentialStoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, session: &AuthSession) -> Result<(), CredentialStoreError> {
        let mut slot = self
            .session
            .write()
            .map_err(|e| CredentialStoreError::Io(e.to_string()))?;
        *slot = Some(session.clone());
        Ok(())
    }

    async fn clear_token(&self) -> Result<(), CredentialStoreError> {
        let mut slot = self
            .session
            .write()
            .map_err(|e| CredentialStoreError::Io(e.to_string()))?;
        if let Some(session) = slot.as_mut() {
            session.clear_token();
        }
        Ok(())
    }
}
