//! Locale configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::{Currency, Locale, Region};

/// Region and currency sent at registration and on catalog requests
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_currency")]
    pub currency: String,
}

impl LocaleConfig {
    /// Parse into the domain locale
    pub fn to_locale(&self) -> Result<Locale, ValidationError> {
        let region = Region::new(&self.region)
            .map_err(|_| ValidationError::InvalidRegion(self.region.clone()))?;
        let currency = Currency::new(&self.currency)
            .map_err(|_| ValidationError::InvalidCurrency(self.currency.clone()))?;
        Ok(Locale::new(region, currency))
    }

    /// Validate locale configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_locale().map(|_| ())
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            currency: default_currency(),
        }
    }
}

fn default_region() -> String {
    "UK".to_string()
}

fn default_currency() -> String {
    "GBP".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_defaults() {
        let locale = LocaleConfig::default().to_locale().unwrap();
        assert_eq!(locale.region.as_str(), "UK");
        assert_eq!(locale.currency.as_str(), "GBP");
    }

    #[test]
    fn test_lowercase_codes_are_normalized() {
        let config = LocaleConfig {
            region: "us".to_string(),
            currency: "usd".to_string(),
        };
        let locale = config.to_locale().unwrap();
        assert_eq!(locale.currency.as_str(), "USD");
    }

    #[test]
    fn test_invalid_currency() {
        let config = LocaleConfig {
            currency: "POUNDS".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCurrency("POUNDS".to_string()))
        );
    }

    #[test]
    fn test_blank_region() {
        let config = LocaleConfig {
            region: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRegion(_))
        ));
    }
}
