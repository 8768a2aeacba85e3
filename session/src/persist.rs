//! Persistence adapter: whitelisted session slice to and from client storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The web crate supplies a `localStorage` backend; tests use
//! [`MemoryStorage`]. One blob lives under [`STORAGE_KEY`] per browser profile.
//!
//! FORMAT
//! ======
//! A JSON object with the whitelisted keys (`Token`, `UserData`,
//! `isAuthenticated`, and the reserved `Role`, `Flag`, `TrialFlag`) plus a
//! `_persist` object carrying [`PERSIST_VERSION`]. Blobs from another version
//! are ignored and the session starts empty.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PersistError;
use crate::state::{Session, UserProfile};

/// Storage key of the persisted auth slice.
pub const STORAGE_KEY: &str = "persist:auth";

/// Bump when the slice layout changes incompatibly.
pub const PERSIST_VERSION: u32 = 1;

/// Key/value string storage, shaped like the browser's `Storage` interface.
pub trait StorageBackend {
    /// # Errors
    ///
    /// Returns [`PersistError::Unavailable`] when no storage area is reachable.
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;
    /// # Errors
    ///
    /// Returns an error when the storage area is missing or rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError>;
    /// # Errors
    ///
    /// Returns [`PersistError::Unavailable`] when no storage area is reachable.
    fn remove_item(&self, key: &str) -> Result<(), PersistError>;
}

/// Process-local storage. Clones share the same map, which lets tests model a
/// page reload by rehydrating a second store from a clone.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), PersistError> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
        Ok(())
    }
}

/// Whitelisted slots with no producer. Read back and written out untouched;
/// no logic depends on them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservedSlots {
    #[serde(rename = "Role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(rename = "Flag", default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<Value>,
    #[serde(rename = "TrialFlag", default, skip_serializing_if = "Option::is_none")]
    pub trial_flag: Option<Value>,
}

/// The whitelisted subset of session state that survives a reload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSlice {
    #[serde(rename = "Token", default)]
    pub token: Option<String>,
    #[serde(rename = "UserData", default)]
    pub user_data: Option<UserProfile>,
    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: bool,
    #[serde(flatten)]
    pub reserved: ReservedSlots,
}

impl PersistedSlice {
    #[must_use]
    pub fn capture(session: &Session, reserved: &ReservedSlots) -> Self {
        Self {
            token: session.token().map(str::to_owned),
            user_data: session.profile().cloned(),
            is_authenticated: session.is_authenticated(),
            reserved: reserved.clone(),
        }
    }

    /// Rebuild the session. An authenticated flag without a token (a blob
    /// edited by hand, or written by an older build) loads as anonymous.
    #[must_use]
    pub fn to_session(&self) -> Session {
        match (&self.token, self.is_authenticated) {
            (Some(token), true) => Session::authenticated(token.clone(), self.user_data.clone().unwrap_or_default()),
            _ => Session::Anonymous,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistMeta {
    version: u32,
    rehydrated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredBlob {
    #[serde(flatten)]
    slice: PersistedSlice,
    #[serde(rename = "_persist")]
    meta: PersistMeta,
}

/// Reads and writes the slice under one storage key.
#[derive(Clone, Debug)]
pub struct Persistor<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> Persistor<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    #[must_use]
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    /// Read the stored slice. Missing, unreadable, unparsable, or
    /// wrong-version blobs all yield `None`; the last two are also purged.
    #[must_use]
    pub fn load(&self) -> Option<PersistedSlice> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("session storage read failed: key={} error={e}", self.key);
                return None;
            }
        };
        let blob: StoredBlob = match serde_json::from_str(&raw) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("discarding unparsable session blob: key={} error={e}", self.key);
                self.discard();
                return None;
            }
        };
        if blob.meta.version != PERSIST_VERSION {
            log::info!(
                "discarding session blob from version {} (current {PERSIST_VERSION})",
                blob.meta.version
            );
            self.discard();
            return None;
        }
        Some(blob.slice)
    }

    /// Serialize and store `slice`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error, or [`PersistError::Encode`].
    pub fn save(&self, slice: &PersistedSlice) -> Result<(), PersistError> {
        let blob = StoredBlob {
            slice: slice.clone(),
            meta: PersistMeta { version: PERSIST_VERSION, rehydrated: true },
        };
        let raw = serde_json::to_string(&blob).map_err(|e| PersistError::Encode(e.to_string()))?;
        self.backend.set_item(&self.key, &raw)
    }

    /// Remove the stored blob entirely.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub fn purge(&self) -> Result<(), PersistError> {
        self.backend.remove_item(&self.key)
    }

    fn discard(&self) {
        if let Err(e) = self.purge() {
            log::warn!("could not remove discarded session blob: key={} error={e}", self.key);
        }
    }
}
