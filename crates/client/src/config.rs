//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DRWISE_API_BASE_URL` - Base URL of the Dr WISE backend API
//!
//! ## Optional
//! - `DRWISE_AMBASSADOR_ROLE_ID` - Override for the ambassador role id used
//!   as a fallback during role derivation
//! - `DRWISE_TOKEN_DIR` - Directory for the persisted auth token
//!   (default: `.drwise`)
//! - `DRWISE_ROLE_LOOKUP_SETTLE_MS` - Delay before the remote-config role
//!   lookup, in milliseconds (default: 400)

use std::path::PathBuf;
use std::time::Duration;

use drwise_core::RoleId;
use thiserror::Error;
use url::Url;

/// Default directory for the persisted token file.
const DEFAULT_TOKEN_DIR: &str = ".drwise";

/// Default settle delay before the remote-config role lookup.
pub(crate) const DEFAULT_ROLE_LOOKUP_SETTLE_MS: u64 = 400;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dr WISE client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API. Always ends with a trailing slash so
    /// relative path joins resolve under it.
    pub api_base_url: Url,
    /// Override for the fallback ambassador role id.
    pub ambassador_role_id: Option<RoleId>,
    /// Directory holding the persisted token file.
    pub token_dir: PathBuf,
    /// Delay before the remote-config role lookup.
    pub role_lookup_settle: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            "DRWISE_API_BASE_URL",
            &get_required_env("DRWISE_API_BASE_URL")?,
        )?;
        let ambassador_role_id = get_optional_env("DRWISE_AMBASSADOR_ROLE_ID").map(RoleId::new);
        let token_dir = PathBuf::from(get_env_or_default("DRWISE_TOKEN_DIR", DEFAULT_TOKEN_DIR));
        let role_lookup_settle = parse_settle_ms(
            "DRWISE_ROLE_LOOKUP_SETTLE_MS",
            get_optional_env("DRWISE_ROLE_LOOKUP_SETTLE_MS").as_deref(),
        )?;

        Ok(Self {
            api_base_url,
            ambassador_role_id,
            token_dir,
            role_lookup_settle,
        })
    }

    /// Build a configuration directly, for embedders that do not use
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL does not parse.
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url("api_base_url", api_base_url)?,
            ambassador_role_id: None,
            token_dir: PathBuf::from(DEFAULT_TOKEN_DIR),
            role_lookup_settle: Duration::from_millis(DEFAULT_ROLE_LOOKUP_SETTLE_MS),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and normalize the API base URL.
///
/// A trailing slash is appended when missing: `Url::join` drops the last
/// path segment of a slash-less base, which would silently rewrite every
/// endpoint path.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };

    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "URL cannot serve as a base".to_string(),
        ));
    }

    Ok(url)
}

/// Parse the settle delay, falling back to the default when unset.
fn parse_settle_ms(var_name: &str, value: Option<&str>) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(Duration::from_millis(DEFAULT_ROLE_LOOKUP_SETTLE_MS)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string())),
    }
}
