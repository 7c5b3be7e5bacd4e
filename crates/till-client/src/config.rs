//! Connection settings for the payment API.
//!
//! The base URL and shop credentials live in an [`ApiConfig`] value that is
//! passed explicitly into the transport, not read from ambient process state.
//! Construction fails fast when the shop identifier or secret key is absent,
//! before any network call is attempted.

use std::env;
use url::Url;

/// Environment variable holding the payment API base URL.
pub const API_URL_VAR: &str = "PAYMENT_API_URL";
/// Environment variable holding the shop identifier (Basic Auth username).
pub const SHOP_ID_VAR: &str = "PAYMENT_SHOP_ID";
/// Environment variable holding the secret key (Basic Auth password).
pub const SECRET_KEY_VAR: &str = "PAYMENT_SECRET_KEY";

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),
    #[error("Shop identifier is empty")]
    MissingShopId,
    #[error("Secret key is empty")]
    MissingSecretKey,
    #[error("Invalid payment API base URL: {0}")]
    InvalidBaseUrl(#[source] url::ParseError),
}

/// Base URL and credentials for the payment API.
///
/// The shop identifier and secret key authenticate every request via HTTP
/// Basic Auth (username = shop id, password = secret key).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    shop_id: String,
    secret_key: String,
}

impl ApiConfig {
    /// Creates a configuration from explicit values.
    ///
    /// The base URL is normalized to end with a single trailing slash so that
    /// request paths join onto it instead of replacing its last segment.
    pub fn new(
        base_url: impl AsRef<str>,
        shop_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let shop_id = shop_id.into();
        if shop_id.is_empty() {
            return Err(ConfigError::MissingShopId);
        }
        let secret_key = secret_key.into();
        if secret_key.is_empty() {
            return Err(ConfigError::MissingSecretKey);
        }
        let mut normalized = base_url.as_ref().trim_end_matches('/').to_string();
        normalized.push('/');
        let base_url = Url::parse(&normalized).map_err(ConfigError::InvalidBaseUrl)?;
        Ok(Self {
            base_url,
            shop_id,
            secret_key,
        })
    }

    /// Reads the configuration from `PAYMENT_API_URL`, `PAYMENT_SHOP_ID`, and
    /// `PAYMENT_SECRET_KEY`.
    ///
    /// A missing or empty variable is a fatal configuration error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = require_var(API_URL_VAR)?;
        let shop_id = require_var(SHOP_ID_VAR)?;
        let secret_key = require_var(SECRET_KEY_VAR)?;
        Self::new(base_url, shop_id, secret_key)
    }

    /// The normalized base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The shop identifier used as the Basic Auth username.
    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    /// The secret key used as the Basic Auth password.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
