//! File-based Credential Store Adapter
//!
//! Persists the device id and bearer token as a small JSON document. The
//! file is written to a sibling temp file first and then renamed into place,
//! so a crash mid-write never leaves a truncated credentials file.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::account::AuthSession;
use crate::domain::foundation::DeviceId;
use crate::ports::{CredentialStore, CredentialStoreError};

/// On-disk representation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCredentials {
    device_id: String,
    #[serde(default)]
    token: Option<String>,
}

/// Stores the auth session in a JSON file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the given file
    ///
    /// # Example
    /// ```ignore
    /// let store = FileCredentialStore::new(".shortlist/credentials.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    async fn ensure_parent(&self) -> Result<(), CredentialStoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| CredentialStoreError::Io(e.to_string())),
            _ => Ok(()),
        }
    }

    async fn write(&self, stored: &StoredCredentials) -> Result<(), CredentialStoreError> {
        self.ensure_parent().await?;

        let json = serde_json::to_vec_pretty(stored)
            .map_err(|e| CredentialStoreError::Serialization(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| CredentialStoreError::Io(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| CredentialStoreError::Io(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<AuthSession>, CredentialStoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CredentialStoreError::Io(e.to_string())),
        };

        let stored: StoredCredentials = serde_json::from_slice(&bytes)
            .map_err(|e| CredentialStoreError::Corrupt(e.to_string()))?;
        let device_id = DeviceId::new(stored.device_id)
            .map_err(|e| CredentialStoreError::Corrupt(e.to_string()))?;

        let session = match stored.token.filter(|t| !t.is_empty()) {
            Some(token) => AuthSession::with_token(device_id, token),
            None => AuthSession::new(device_id),
        };

        Ok(Some(session))
    }

    async fn save(&self, session: &AuthSession) -> Result<(), CredentialStoreError> {
        let stored = StoredCredentials {
            device_id: session.device_id().as_str().to_string(),
            token: session.token().map(|t| t.expose_secret().to_string()),
        };
        self.write(&stored).await?;

        tracing::debug!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }

    async fn clear_token(&self) -> Result<(), CredentialStoreError> {
        match self.load().await? {
            Some(mut session) => {
                session.clear_token();
                self.save(&session).await
            }
            None => Ok(()),
        }
    }
}
