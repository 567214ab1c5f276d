//! Browser `localStorage` token store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes csr-only web-sys glue so the auth context can persist the
//! bearer token without knowing it runs in a browser.
//!
//! TRADE-OFFS
//! ==========
//! Reads are best-effort: a browser that denies `localStorage` behaves as if
//! nothing is stored. Writes report failure so login can refuse a session it
//! cannot persist. Native builds keep the token in memory.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use portal::store::{StoreError, TokenStore};
#[cfg(not(feature = "csr"))]
use portal::store::MemoryTokenStore;

/// Token store backed by `window.localStorage`.
#[derive(Debug)]
pub struct BrowserTokenStore {
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    key: String,
    #[cfg(not(feature = "csr"))]
    fallback: MemoryTokenStore,
}

impl BrowserTokenStore {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            #[cfg(not(feature = "csr"))]
            fallback: MemoryTokenStore::new(),
        }
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage().ok_or(StoreError::Unavailable)?;
            storage
                .set_item(&self.key, token)
                .map_err(|e| StoreError::Rejected(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            self.fallback.save(token)
        }
    }

    fn read(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let token = local_storage()?.get_item(&self.key).ok().flatten()?;
            (!token.is_empty()).then_some(token)
        }
        #[cfg(not(feature = "csr"))]
        {
            self.fallback.read()
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(&self.key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            self.fallback.clear();
        }
    }
}
