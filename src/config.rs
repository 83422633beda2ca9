//! Client configuration.

use std::time::Duration;

use crate::error::ClientError;

/// Backend base URL used when neither the environment nor the caller
/// provides one. Points at a local development backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Environment variable overriding the backend base URL.
pub const ENV_BASE_URL: &str = "VITALBOARD_BASE_URL";

/// Request timeout for ordinary API areas.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request timeout for the AI area. Generative replies take longer than
/// ordinary CRUD calls, so this area gets an extended limit.
pub const AI_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolved client configuration shared by every API client instance.
#[derive(Clone, Debug)]
pub struct Config {
    base_url: String,
}

impl Config {
    /// Build a configuration from an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] unless the URL uses an
    /// `http://` or `https://` scheme.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url: String = base_url.into();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }
        Ok(Self { base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// Build a configuration from `VITALBOARD_BASE_URL`, falling back to
    /// [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the override is malformed.
    pub fn from_env() -> Result<Self, ClientError> {
        match std::env::var(ENV_BASE_URL) {
            Ok(url) => Self::new(url),
            Err(_) => Self::new(DEFAULT_BASE_URL),
        }
    }

    /// Backend base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(Config::new("http://127.0.0.1:8000/api").is_ok());
        assert!(Config::new("https://vitalboard.example/api").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = Config::new("ftp://vitalboard.example").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn trims_trailing_slash() {
        let config = Config::new("http://127.0.0.1:8000/api/").unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:8000/api");
    }
}
