//! HTTP auth service backed by the journal API.
//!
//! Thin `reqwest` wrapper over `GET /auth/status` and `POST /auth/auth/token`.
//! The token route sits under the backend's `/auth` router prefix, hence the
//! doubled segment; the status route is mounted on the app root.
//! Status/body interpretation lives in pure `parse_*` functions for
//! testability.

#[cfg(test)]
#[path = "http_auth_test.rs"]
mod http_auth_test;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::auth::{AuthError, AuthService, Credentials};
use crate::config::GateConfig;
use crate::session::UserProfile;

const STATUS_PATH: &str = "/auth/status";
const TOKEN_PATH: &str = "/auth/auth/token";
const CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpAuthService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthService {
    /// Build a client for `base_url` (e.g. `http://localhost:8000/api/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()
            .map_err(|e| AuthError::Network(format!("http client build failed: {e}")))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// # Errors
    ///
    /// Returns [`AuthError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: &GateConfig) -> Result<Self, AuthError> {
        Self::new(&config.api_base_url, config.auth_timeout)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn validate(&self, token: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .http
            .get(self.url(STATUS_PATH))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        parse_status_response(status, &body)
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let response = self
            .http
            .post(self.url(TOKEN_PATH))
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        parse_token_response(status, &body)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct StatusResponse {
    authenticated: bool,
    user: Option<UserProfile>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

/// Interpret a `/auth/status` reply.
pub(crate) fn parse_status_response(status: u16, body: &str) -> Result<UserProfile, AuthError> {
    match status {
        200..=299 => {}
        401 | 403 => return Err(AuthError::InvalidToken),
        other => return Err(AuthError::Network(format!("unexpected status {other}"))),
    }

    let parsed: StatusResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Network(format!("malformed status body: {e}")))?;

    match (parsed.authenticated, parsed.user) {
        (true, Some(user)) => Ok(user),
        (true, None) => Err(AuthError::Network("status body missing user".to_owned())),
        (false, _) => Err(AuthError::InvalidToken),
    }
}

/// Interpret a `/auth/auth/token` reply.
pub(crate) fn parse_token_response(status: u16, body: &str) -> Result<String, AuthError> {
    match status {
        200..=299 => {}
        400 | 401 | 403 => return Err(AuthError::InvalidCredentials),
        other => return Err(AuthError::Network(format!("unexpected status {other}"))),
    }

    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| AuthError::Network(format!("malformed token body: {e}")))?;

    if let Some(kind) = parsed.token_type.as_deref() {
        if !kind.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::Network(format!("unsupported token type: {kind}")));
        }
    }
    if parsed.access_token.trim().is_empty() {
        return Err(AuthError::Network("empty access token".to_owned()));
    }
    Ok(parsed.access_token.trim().to_owned())
}
