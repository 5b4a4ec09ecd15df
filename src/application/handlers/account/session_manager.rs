//! SessionManager - owns the device identity and the bearer token.
//!
//! The single writer of the auth session: it restores persisted credentials
//! into the API client, registers when no token exists, clears the token on
//! sign-out and re-registers once when the backend rejects a token.

use secrecy::ExposeSecret;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::account::{AuthSession, Registration};
use crate::domain::foundation::{DeviceId, Locale};
use crate::ports::{ApiError, CredentialStore, CredentialStoreError, RecommendationApi};

/// Errors from session management.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("credential storage failed: {0}")]
    Storage(#[from] CredentialStoreError),
}

impl SessionError {
    /// The underlying API error, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            SessionError::Api(err) => Some(err),
            SessionError::Storage(_) => None,
        }
    }
}

/// Manages the auth session shared by the API client and the credential store.
pub struct SessionManager {
    api: Arc<dyn RecommendationApi>,
    store: Arc<dyn CredentialStore>,
    locale: Locale,
    session: Mutex<Option<AuthSession>>,
}

impl SessionManager {
    pub fn new(
        api: Arc<dyn RecommendationApi>,
        store: Arc<dyn CredentialStore>,
        locale: Locale,
    ) -> Self {
        Self {
            api,
            store,
            locale,
            session: Mutex::new(None),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Current session, if bootstrapped.
    pub async fn session(&self) -> Option<AuthSession> {
        self.session.lock().await.clone()
    }

    /// Restores or creates the session and makes sure a token is installed.
    ///
    /// The device id is generated only when nothing is held or persisted, and
    /// saved before registering so it survives a failed registration.
    pub async fn bootstrap(&self) -> Result<AuthSession, SessionError> {
        let mut guard = self.session.lock().await;
        let mut session = self.load_or_create(&mut guard).await?;

        if session.is_authenticated() {
            if let Some(token) = session.token() {
                self.api.set_auth_token(token.expose_secret());
            }
            tracing::debug!(device_id = %session.device_id(), "Restored persisted session");
        } else {
            self.register_device(&mut session).await?;
        }

        *guard = Some(session.clone());
        Ok(session)
    }

    /// Registers the device and installs the new token in client and store.
    pub async fn register(&self) -> Result<Registration, SessionError> {
        let mut guard = self.session.lock().await;
        let mut session = self.load_or_create(&mut guard).await?;

        let result = self.register_device(&mut session).await;
        *guard = Some(session);
        result
    }

    /// Drops the token from client and store. The device id is kept.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        let mut guard = self.session.lock().await;
        self.api.clear_auth_token();
        self.store.clear_token().await?;
        if let Some(session) = guard.as_mut() {
            session.clear_token();
        }
        tracing::info!("Signed out");
        Ok(())
    }

    /// Runs an authenticated operation, re-registering once on `Unauthorized`.
    ///
    /// The operation is retried at most once; a second `Unauthorized` is
    /// returned to the caller.
    pub async fn with_reauthentication<T, F, Fut>(&self, op: F) -> Result<T, SessionError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match op().await {
            Err(ApiError::Unauthorized) => {
                tracing::warn!("Token rejected, re-registering device");
                self.api.clear_auth_token();
                self.register().await?;
                Ok(op().await?)
            }
            other => Ok(other?),
        }
    }

    /// The held session, else the persisted one, else a freshly generated
    /// device that is saved before use. The result is also held in `guard`.
    async fn load_or_create(
        &self,
        guard: &mut Option<AuthSession>,
    ) -> Result<AuthSession, SessionError> {
        if let Some(session) = guard.as_ref() {
            return Ok(session.clone());
        }

        let session = match self.store.load().await? {
            Some(session) => session,
            None => {
                let session = AuthSession::new(DeviceId::generate());
                self.store.save(&session).await?;
                tracing::info!(device_id = %session.device_id(), "Generated device id");
                session
            }
        };
        *guard = Some(session.clone());
        Ok(session)
    }

    async fn register_device(&self, session: &mut AuthSession) -> Result<Registration, SessionError> {
        let registration = self
            .api
            .register(
                session.device_id(),
                &self.locale.region,
                &self.locale.currency,
            )
            .await?;

        self.api.set_auth_token(&registration.token);
        session.set_token(registration.token.clone());
        self.store.save(session).await?;

        tracing::info!(
            device_id = %session.device_id(),
            user_id = %registration.user.id,
            "Device registered"
        );
        Ok(registration)
    }
}
