//! Persisted single-token storage.
//!
//! DESIGN
//! ======
//! The store holds at most one token. Reads never fail: a missing or
//! unreadable token is simply absent. Write failures are logged and
//! swallowed so the page can always fall back to the unauthenticated view.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::path::{Path, PathBuf};

use tracing::warn;

/// Key-value store for the one session token.
pub trait TokenStore: Send {
    fn get(&self) -> Option<String>;
    fn set(&mut self, token: &str);
    fn clear(&mut self);
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process store. Starts empty unless seeded.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.clone()
    }

    fn set(&mut self, token: &str) {
        self.token = Some(token.trim().to_owned());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

// =============================================================================
// FILE
// =============================================================================

/// Token kept as the whole contents of one file.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, token.trim())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                (!token.is_empty()).then(|| token.to_owned())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "token read failed");
                None
            }
        }
    }

    fn set(&mut self, token: &str) {
        if let Err(e) = self.write(token) {
            warn!(error = %e, path = %self.path.display(), "token write failed");
        }
    }

    fn clear(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, path = %self.path.display(), "token clear failed"),
        }
    }
}
