//! Auth service contract: token validation and credential login.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use async_trait::async_trait;

use crate::session::UserProfile;

/// Failure reported by an [`AuthService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the token.
    #[error("token rejected by auth service")]
    InvalidToken,
    /// The backend rejected the username/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The backend could not be reached or answered unexpectedly.
    #[error("auth service unreachable: {0}")]
    Network(String),
}

impl AuthError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "E_INVALID_TOKEN",
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::Network(_) => "E_NETWORK",
        }
    }

    /// Whether a retry could plausibly succeed. The gate never retries; this
    /// only classifies the failure for logs.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Login form input.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Backend that issues and checks session tokens.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check a stored token and return the profile it belongs to.
    async fn validate(&self, token: &str) -> Result<UserProfile, AuthError>;

    /// Exchange credentials for a fresh token.
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError>;
}
