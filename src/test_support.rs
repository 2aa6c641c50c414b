//! Fakes shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::gate::SessionGate;
use crate::render::Renderer;
use crate::section::Section;
use crate::services::auth::{AuthError, AuthService, Credentials};
use crate::services::token_store::MemoryTokenStore;
use crate::session::{UserProfile, UserType};

pub fn alice() -> UserProfile {
    UserProfile { id: 1, username: "alice".to_owned(), user_type: UserType::Student }
}

/// Auth service with canned answers and call counters.
pub struct StubAuth {
    pub validate_result: Result<UserProfile, AuthError>,
    pub login_result: Result<String, AuthError>,
    pub validate_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    /// When set, `validate` waits for a notification before answering.
    pub hold: Option<Arc<Notify>>,
}

impl StubAuth {
    pub fn accepting(user: UserProfile) -> Self {
        Self {
            validate_result: Ok(user),
            login_result: Ok("fresh-token".to_owned()),
            validate_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            hold: None,
        }
    }

    pub fn rejecting(err: AuthError) -> Self {
        Self { validate_result: Err(err.clone()), login_result: Err(err), ..Self::accepting(alice()) }
    }

    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthService for StubAuth {
    async fn validate(&self, _token: &str) -> Result<UserProfile, AuthError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        self.validate_result.clone()
    }

    async fn login(&self, _credentials: &Credentials) -> Result<String, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_result.clone()
    }
}

/// Renderer that records every `show` call.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub shown: Arc<Mutex<Vec<Section>>>,
}

impl RecordingRenderer {
    pub fn shown(&self) -> Vec<Section> {
        self.shown.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn show(&mut self, section: Section) {
        self.shown.lock().unwrap().push(section);
    }
}

pub fn gate_with(store: MemoryTokenStore, auth: Arc<StubAuth>) -> (SessionGate, RecordingRenderer) {
    let renderer = RecordingRenderer::default();
    let gate = SessionGate::new(Box::new(store), auth, Box::new(renderer.clone()));
    (gate, renderer)
}
