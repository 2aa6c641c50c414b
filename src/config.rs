//! Gate configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TOKEN_PATH: &str = ".journal/token";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue { var: &'static str, value: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Root of the journal API, without trailing slash.
    pub api_base_url: String,
    /// File holding the persisted session token.
    pub token_path: PathBuf,
    /// Per-request timeout for auth calls.
    pub auth_timeout: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            auth_timeout: Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
        }
    }
}

impl GateConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `JOURNAL_API_BASE_URL`: default `http://localhost:8000/api/v1`
    /// - `JOURNAL_TOKEN_PATH`: default `.journal/token`
    /// - `JOURNAL_AUTH_TIMEOUT_SECS`: default 10, must be a positive integer
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a blank base URL or a bad timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but reads through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup("JOURNAL_API_BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => DEFAULT_API_BASE_URL.to_owned(),
        };
        let token_path = lookup("JOURNAL_TOKEN_PATH")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH), PathBuf::from);
        let auth_timeout = match lookup("JOURNAL_AUTH_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_timeout_secs(&raw)?),
            None => Duration::from_secs(DEFAULT_AUTH_TIMEOUT_SECS),
        };

        Ok(Self { api_base_url, token_path, auth_timeout })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "JOURNAL_API_BASE_URL",
            value: raw.to_owned(),
            reason: "must not be empty",
        });
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            var: "JOURNAL_API_BASE_URL",
            value: raw.to_owned(),
            reason: "expected http:// or https:// URL",
        });
    }
    Ok(trimmed.to_owned())
}

fn parse_timeout_secs(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            var: "JOURNAL_AUTH_TIMEOUT_SECS",
            value: raw.to_owned(),
            reason: "must be greater than zero",
        }),
        Ok(secs) => Ok(secs),
        Err(_) => Err(ConfigError::InvalidValue {
            var: "JOURNAL_AUTH_TIMEOUT_SECS",
            value: raw.to_owned(),
            reason: "expected whole seconds",
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
