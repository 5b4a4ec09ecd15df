//! Backend API configuration

use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Request timeout fixed by the API contract.
pub const API_TIMEOUT_SECS: u64 = 30;

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Deployment environment; selects the default base URL
    #[serde(default)]
    pub environment: Environment,

    /// Explicit base URL, overriding the environment default
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Deployment environment of the backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Origin used when no explicit base URL is configured
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:3000",
            Environment::Staging => "https://staging-api.shortlist.app",
            Environment::Production => "https://api.shortlist.app",
        }
    }
}

impl ApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL the client talks to
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.environment.default_base_url())
            .to_string()
    }

    /// Check if targeting production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs != API_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout {
                expected: API_TIMEOUT_SECS,
                actual: self.timeout_secs,
            });
        }

        let base_url = self.resolved_base_url();
        let url = Url::parse(&base_url)
            .map_err(|_| ValidationError::InvalidBaseUrl(base_url.clone()))?;

        match url.scheme() {
            "https" => {}
            "http" if self.is_production() => return Err(ValidationError::BaseUrlMustBeHttps),
            "http" => {}
            _ => return Err(ValidationError::InvalidBaseUrl(base_url)),
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    API_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.resolved_base_url(), "http://localhost:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_selects_base_url() {
        let config = ApiConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url(), "https://api.shortlist.app");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let config = ApiConfig {
            environment: Environment::Staging,
            base_url: Some("https://eu.shortlist.app".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url(), "https://eu.shortlist.app");
    }

    #[test]
    fn test_blank_base_url_falls_back() {
        let config = ApiConfig {
            base_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_timeout_is_pinned() {
        let config = ApiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTimeout {
                expected: 30,
                actual: 60
            })
        );
    }

    #[test]
    fn test_production_requires_https() {
        let config = ApiConfig {
            environment: Environment::Production,
            base_url: Some("http://api.shortlist.app".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::BaseUrlMustBeHttps));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl(_))
        ));
    }
}
