//! External collaborators of the session gate.
//!
//! ARCHITECTURE
//! ============
//! The gate only sees the `AuthService` and `TokenStore` traits. Concrete
//! HTTP and file implementations live here so tests can swap in fakes
//! without touching gate logic.

pub mod auth;
pub mod http_auth;
pub mod token_store;
