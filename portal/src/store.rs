//! Bearer token persistence.
//!
//! A token store is a single key-value cell. It never inspects the token;
//! expiry and decoding belong to [`crate::claims`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;

/// Storage key the token is persisted under.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Failure to persist a token.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No backing storage is reachable (e.g. `localStorage` is disabled).
    #[error("token storage is unavailable")]
    Unavailable,
    /// The backing storage rejected the write.
    #[error("token storage rejected the write: {0}")]
    Rejected(String),
    #[error("token file could not be written: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent holder for the current bearer token.
///
/// Methods take `&self`; implementations use interior mutability since the
/// client runs on a single thread.
pub trait TokenStore {
    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the token could not be persisted; the
    /// previous value may or may not survive.
    fn save(&self, token: &str) -> Result<(), StoreError>;
    /// Current token, or `None` when nothing (or an empty string) is stored.
    fn read(&self) -> Option<String>;
    /// Remove the stored token.
    fn clear(&self);
}

/// Process-lifetime store used for tests and native builds.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_owned())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.token.borrow_mut() = Some(token.to_owned());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        self.token.borrow().clone().filter(|t| !t.is_empty())
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}
