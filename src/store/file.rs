// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token store backed by a JSON file.
//!
//! Every mutation rewrites the whole file through a temporary sibling and a
//! rename, so readers never observe a half-written token pair.

use super::{StoreError, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::models::TokenPair;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File-backed token store that survives restarts.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(Map::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;

        // Bearer tokens: owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under the process-local lock.
    ///
    /// With `replace_corrupt`, an unparseable file is discarded instead of
    /// failing the write; used by operations that overwrite both tokens anyway.
    fn update<F>(&self, replace_corrupt: bool, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StoreError::Corrupt(e)) if replace_corrupt => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Token store corrupt, replacing it"
                );
                Map::new()
            }
            Err(e) => return Err(e),
        };
        mutate(&mut entries);
        self.save(&entries)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.load()?;
        Ok(entries.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(false, |entries| {
            entries.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(false, |entries| {
            entries.remove(key);
        })
    }

    fn set_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.update(true, |entries| {
            entries.insert(ACCESS_TOKEN_KEY.to_string(), Value::String(pair.access.clone()));
            entries.insert(REFRESH_TOKEN_KEY.to_string(), Value::String(pair.refresh.clone()));
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.update(true, |entries| {
            entries.remove(ACCESS_TOKEN_KEY);
            entries.remove(REFRESH_TOKEN_KEY);
        })
    }
}
