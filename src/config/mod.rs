//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SHORTLIST` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use shortlist::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Talking to {}", config.api.resolved_base_url());
//! ```

mod api;
mod error;
mod locale;
mod logging;
mod storage;

pub use api::{ApiConfig, Environment, API_TIMEOUT_SECS};
pub use error::{ConfigError, ValidationError};
pub use locale::LocaleConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend API (environment, base URL, timeout)
    #[serde(default)]
    pub api: ApiConfig,

    /// Credential persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Region and currency
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SHORTLIST` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SHORTLIST__API__ENVIRONMENT=production` -> `api.environment = production`
    /// - `SHORTLIST__LOCALE__CURRENCY=USD` -> `locale.currency = USD`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SHORTLIST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.storage.validate()?;
        self.locale.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Check if targeting the production backend
    pub fn is_production(&self) -> bool {
        self.api.is_production()
    }
}
