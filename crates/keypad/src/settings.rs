//! Client configuration loaded via OrthoConfig.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

/// Backend origin used when `CALCULATOR_API_URL` is empty or absent.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Configuration sources could not be read or merged.
    #[error("failed to load client configuration: {message}")]
    Load {
        /// Loader diagnostic.
        message: String,
    },
    /// The configured API URL does not parse.
    #[error("invalid CALCULATOR_API_URL {value:?}: {message}")]
    InvalidApiUrl {
        /// The rejected value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Configuration values for talking to the calculator backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CALCULATOR")]
pub struct ClientSettings {
    /// Backend base URL.
    pub api_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ClientSettings {
    /// Load from the environment and configuration files, ignoring the
    /// process arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a configuration source is
    /// malformed.
    pub fn load_for(program: &str) -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(program)]).map_err(|error| SettingsError::Load {
            message: error.to_string(),
        })
    }

    /// Backend base URL, falling back to [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidApiUrl`] when the configured value is
    /// not an absolute URL.
    pub fn api_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        Url::parse(value).map_err(|error| SettingsError::InvalidApiUrl {
            value: value.to_owned(),
            message: error.to_string(),
        })
    }

    /// Per-request timeout, ten seconds unless configured.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }
}
