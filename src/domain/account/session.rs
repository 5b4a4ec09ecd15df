//! Authentication session: device identity plus an optional bearer token.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::DeviceId;

/// Per-install authentication state.
///
/// The device id is fixed for the life of the install. The token is absent
/// before the first registration, set on registration, and cleared on
/// sign-out; clearing it never touches the device id.
#[derive(Debug, Clone)]
pub struct AuthSession {
    device_id: DeviceId,
    token: Option<SecretString>,
}

impl AuthSession {
    /// Creates a session for a device that has not registered yet.
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            token: None,
        }
    }

    /// Restores a session with a previously stored token.
    pub fn with_token(device_id: DeviceId, token: impl Into<String>) -> Self {
        Self {
            device_id,
            token: Some(SecretString::new(token.into())),
        }
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty())
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(SecretString::new(token.into()));
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }
}
