//! Application configuration loaded from environment variables.
//!
//! The deployment environment picks the base API address; individual
//! values can be overridden with `TROVE_API_URL` and `TROVE_STORAGE`.
//! A `.env` file is honored for local development.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `TROVE_ENV` named an unknown environment.
    #[error("unknown environment: {0}")]
    UnknownEnv(String),

    /// The base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Deployment environment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    /// Local development server.
    #[default]
    Development,
    /// Production API.
    Production,
}

impl AppEnv {
    /// Base API address used when `TROVE_API_URL` is not set.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Development => "http://localhost:3000/api",
            Self::Production => "https://api.trove.app/v1",
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for AppEnv {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::UnknownEnv(other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Selected deployment environment.
    pub env: AppEnv,
    /// Base API address.
    pub base_url: Url,
    /// Path of the key-value storage file.
    pub storage_path: PathBuf,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TROVE_ENV` or the base URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env_kind = match env::var("TROVE_ENV") {
            Ok(raw) => raw.parse()?,
            Err(_) => AppEnv::default(),
        };
        let base_raw = env::var("TROVE_API_URL")
            .unwrap_or_else(|_| env_kind.default_base_url().to_string());
        let base_url = Url::parse(&base_raw)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("{base_raw}: {e}")))?;
        let storage_path = env::var("TROVE_STORAGE")
            .map_or_else(|_| PathBuf::from(".trove/storage.json"), PathBuf::from);

        Ok(Self {
            env: env_kind,
            base_url,
            storage_path,
        })
    }
}
