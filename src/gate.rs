//! Session gate: owns the session and the active section for one page.
//!
//! DESIGN
//! ======
//! A single `SessionGate` instance replaces page-global auth state. It is
//! the only writer of [`Session`]; readers go through [`SessionGate::session`]
//! or a watch receiver from [`SessionGate::subscribe`].
//!
//! Load is split in two so validation never holds the gate borrowed:
//! [`SessionGate::begin_load`] moves to `Validating` and hands back a
//! [`PendingValidation`], whose `run` future can be awaited while
//! navigation keeps working. [`SessionGate::complete_validation`] applies
//! the result, dropping it if the session moved on in the meantime.
//!
//! ERROR HANDLING
//! ==============
//! `InvalidToken` and `Network` failures both end in `Unauthenticated` with
//! the token cleared. They stay distinguishable in [`LoadOutcome`] and in
//! logs only.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::nav::{ClickHandler, EventSource, NavControl, RegistrationError, handler_for};
use crate::render::Renderer;
use crate::section::Section;
use crate::services::auth::{AuthError, AuthService, Credentials};
use crate::services::token_store::TokenStore;
use crate::session::{Session, UserProfile};

// =============================================================================
// OUTCOMES
// =============================================================================

/// What a load (or a completed validation) did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored; session is unauthenticated.
    NoToken,
    /// Stored token accepted.
    Authenticated,
    /// Stored token rejected or unverifiable; token cleared.
    Rejected(AuthError),
    /// The session changed while validating; result ignored.
    Stale,
}

/// Login form failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("username is required")]
    EmptyUsername,
    #[error("password is required")]
    EmptyPassword,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

// =============================================================================
// PENDING VALIDATION
// =============================================================================

/// An in-flight token check detached from the gate.
pub struct PendingValidation {
    token: String,
    auth: Arc<dyn AuthService>,
}

impl PendingValidation {
    /// Ask the auth service about the token.
    pub async fn run(self) -> ValidationResult {
        let result = self.auth.validate(&self.token).await;
        ValidationResult { token: self.token, result }
    }
}

/// Result of [`PendingValidation::run`], fed back into the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub token: String,
    pub result: Result<UserProfile, AuthError>,
}

// =============================================================================
// GATE
// =============================================================================

pub struct SessionGate {
    store: Box<dyn TokenStore>,
    auth: Arc<dyn AuthService>,
    renderer: Box<dyn Renderer>,
    session: Session,
    section: Section,
    notify: watch::Sender<Session>,
}

impl SessionGate {
    #[must_use]
    pub fn new(store: Box<dyn TokenStore>, auth: Arc<dyn AuthService>, renderer: Box<dyn Renderer>) -> Self {
        let (notify, _) = watch::channel(Session::default());
        Self { store, auth, renderer, session: Session::default(), section: Section::default(), notify }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    /// Watch handle that sees every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.notify.subscribe()
    }

    #[must_use]
    pub fn token_store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    fn set_session(&mut self, session: Session) {
        self.session = session.clone();
        self.notify.send_replace(session);
    }

    fn drop_token(&mut self) {
        self.store.clear();
        self.set_session(Session::unauthenticated());
    }

    // -------------------------------------------------------------------------
    // Load
    // -------------------------------------------------------------------------

    /// Read the stored token, render the initial section and validate.
    pub async fn on_load(&mut self) -> LoadOutcome {
        let Some(pending) = self.begin_load() else {
            return LoadOutcome::NoToken;
        };
        let result = pending.run().await;
        self.complete_validation(result)
    }

    /// Synchronous half of [`Self::on_load`].
    ///
    /// Returns `None` when no token is stored (session left unauthenticated).
    pub fn begin_load(&mut self) -> Option<PendingValidation> {
        self.renderer.show(self.section);

        let Some(token) = self.store.get() else {
            info!("no stored token; session unauthenticated");
            self.set_session(Session::unauthenticated());
            return None;
        };

        debug!("stored token found; validating");
        self.set_session(Session::validating(token.clone()));
        Some(PendingValidation { token, auth: Arc::clone(&self.auth) })
    }

    /// Apply a validation result produced by [`PendingValidation::run`].
    pub fn complete_validation(&mut self, validation: ValidationResult) -> LoadOutcome {
        if !self.session.is_validating() || self.session.token() != Some(validation.token.as_str()) {
            debug!("validation result no longer matches session; ignored");
            return LoadOutcome::Stale;
        }

        match validation.result {
            Ok(user) => {
                info!(user_id = user.id, username = %user.username, "session authenticated");
                self.set_session(Session::authenticated(validation.token, user));
                LoadOutcome::Authenticated
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), retryable = e.retryable(), "token validation failed; clearing");
                self.drop_token();
                LoadOutcome::Rejected(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Login / logout
    // -------------------------------------------------------------------------

    /// Submit the login form: obtain a token, persist it, then validate it.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] for empty fields or any auth failure. After an
    /// auth failure the session is unauthenticated and no token is stored.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<&UserProfile, LoginError> {
        if credentials.username.trim().is_empty() {
            return Err(LoginError::EmptyUsername);
        }
        if credentials.password.is_empty() {
            return Err(LoginError::EmptyPassword);
        }

        let token = match self.auth.login(credentials).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "login failed");
                self.drop_token();
                return Err(e.into());
            }
        };

        self.store.set(&token);
        self.set_session(Session::validating(token.clone()));

        let result = self.auth.validate(&token).await;
        match self.complete_validation(ValidationResult { token, result }) {
            LoadOutcome::Rejected(e) => Err(e.into()),
            _ => self.session.user().ok_or(LoginError::Auth(AuthError::InvalidToken)),
        }
    }

    /// Forget the token. The active section is left as is.
    pub fn logout(&mut self) {
        info!("logging out");
        self.drop_token();
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Switch the visible section. Not gated on auth.
    pub fn navigate_to(&mut self, section: Section) {
        debug!(?section, authenticated = self.session.is_authenticated(), "navigate");
        self.section = section;
        self.renderer.show(section);
    }

    /// Register the named handler for each navigation control.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::AlreadyRegistered`] if a control already
    /// has a handler on `events`.
    pub fn wire_navigation<E>(events: &mut E) -> Result<(), RegistrationError>
    where
        E: EventSource + ?Sized,
    {
        for control in NavControl::ALL {
            let handler: ClickHandler = handler_for(control);
            events.register(control, handler)?;
        }
        Ok(())
    }
}
