// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistent token storage.
//!
//! Only [`crate::services::SessionManager`] reads or writes tokens; everything
//! else goes through it.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::models::TokenPair;

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Key-value persistence surviving restarts.
///
/// Writes are last-writer-wins. `set_pair` and `clear` must leave both keys in
/// a consistent state; implementations that can write both in one step should
/// override the defaults.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Replace both tokens.
    ///
    /// The default writes the keys one at a time; if the second write fails
    /// both keys are removed so a new access token never sits next to a stale
    /// refresh token. Stores that can write both keys in one step should
    /// override this.
    fn set_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.set(ACCESS_TOKEN_KEY, &pair.access)?;
        if let Err(e) = self.set(REFRESH_TOKEN_KEY, &pair.refresh) {
            if let Err(clear_err) = self.clear() {
                tracing::error!(error = %clear_err, "Failed to roll back partial token write");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove both tokens.
    fn clear(&self) -> Result<(), StoreError> {
        // Attempt both removals even if the first fails
        let access = self.remove(ACCESS_TOKEN_KEY);
        let refresh = self.remove(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }
}

/// Token store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Token store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
