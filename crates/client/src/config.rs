//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `OUR_SHOP_API_BASE` - Account Service base URL
//!   (default: `https://our-shop.somee.com/api`)

use url::Url;

/// Default Account Service base URL.
pub const DEFAULT_API_BASE: &str = "https://our-shop.somee.com/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopping client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Account Service (ends before `/Customer/...`).
    pub account_api_base: Url,
}

impl ClientConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `OUR_SHOP_API_BASE` is set
    /// but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("OUR_SHOP_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_owned());

        let account_api_base = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("OUR_SHOP_API_BASE".to_owned(), e.to_string()))?;

        Ok(Self { account_api_base })
    }

    /// Build a configuration pointing at an explicit base URL.
    #[must_use]
    pub const fn with_base(account_api_base: Url) -> Self {
        Self { account_api_base }
    }
}
