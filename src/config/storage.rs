//! Credential storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the device id and bearer token are persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the persisted session
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.credentials_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__CREDENTIALS_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
        }
    }
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from(".shortlist/credentials.json")
}
