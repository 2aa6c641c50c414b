//! Auth-session state for the current page user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned and mutated only by [`crate::gate::SessionGate`]. Everything else
//! reads it through the gate or a watch subscription.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

/// Role assigned by the backend. Usernames starting with `teacher` are
/// provisioned as teachers, everyone else as students.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Teacher,
    Student,
}

/// Profile returned by a successful token validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Teacher or student.
    pub user_type: UserType,
}

impl UserProfile {
    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.user_type == UserType::Teacher
    }
}

/// Where the session stands in its load/validate lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    /// No usable token.
    #[default]
    Unauthenticated,
    /// A stored token is being checked with the auth service.
    Validating,
    /// The token was accepted; carries the validated profile.
    Authenticated(UserProfile),
}

/// Current session: status plus the token it was derived from.
///
/// `Authenticated` and `Validating` always carry a token; `Unauthenticated`
/// never does. The constructors below are the only way to build one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    status: SessionStatus,
    token: Option<String>,
}

impl Session {
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn validating(token: String) -> Self {
        Self { status: SessionStatus::Validating, token: Some(token) }
    }

    #[must_use]
    pub fn authenticated(token: String, user: UserProfile) -> Self {
        Self { status: SessionStatus::Authenticated(user), token: Some(token) }
    }

    #[must_use]
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The validated user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&UserProfile> {
        match &self.status {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated(_))
    }

    #[must_use]
    pub fn is_validating(&self) -> bool {
        matches!(self.status, SessionStatus::Validating)
    }
}
