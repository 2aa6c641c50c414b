//! Session and navigation controller for the journal single-page app.
//!
//! ARCHITECTURE
//! ============
//! [`gate::SessionGate`] owns the session (derived from a persisted token)
//! and the active [`section::Section`]. It talks to the outside through
//! three seams: [`services::token_store::TokenStore`],
//! [`services::auth::AuthService`] and [`render::Renderer`]. Navigation
//! controls are wired through [`nav::EventSource`].

pub mod config;
pub mod gate;
pub mod nav;
pub mod render;
pub mod section;
pub mod services;
pub mod session;

#[cfg(test)]
mod test_support;

pub use gate::{LoadOutcome, LoginError, SessionGate};
pub use section::Section;
pub use session::{Session, SessionStatus, UserProfile, UserType};
