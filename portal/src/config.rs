//! Client configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::store::ACCESS_TOKEN_KEY;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Origin of the REST backend, without trailing slash.
    pub api_base_url: String,
    /// Key the bearer token is persisted under.
    pub token_key: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl PortalConfig {
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            token_key: ACCESS_TOKEN_KEY.to_owned(),
        }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `CUSTOMER_API_BASE_URL`: default `http://localhost:8080`
    /// - `CUSTOMER_TOKEN_KEY`: default `access_token`
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("CUSTOMER_API_BASE_URL").ok().as_deref(),
            std::env::var("CUSTOMER_TOKEN_KEY").ok().as_deref(),
        )
    }

    /// Build config from optional raw values; blank values fall back to defaults.
    #[must_use]
    pub fn from_values(api_base_url: Option<&str>, token_key: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);
        let mut config = Self::new(api_base_url);
        if let Some(key) = token_key.map(str::trim).filter(|v| !v.is_empty()) {
            key.clone_into(&mut config.token_key);
        }
        config
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
