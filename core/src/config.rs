//! Client configuration.
//!
//! Built once and held by `AccountsClient`; nothing here changes after
//! construction.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Base URL used when `ACCOUNTS_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const BASE_URL_ENV: &str = "ACCOUNTS_API_URL";
pub const TIMEOUT_ENV: &str = "ACCOUNTS_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Validates `base_url` (scheme, host, optional port and path prefix).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(invalid("url has no host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("url must not carry a query or fragment"));
        }

        Ok(Self {
            base_url: url,
            timeout: None,
        })
    }

    /// Reads `ACCOUNTS_API_URL` and `ACCOUNTS_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let config = Self::new(&base_url)?;

        match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            Err(_) => Ok(config),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
