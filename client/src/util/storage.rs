//! Browser storage glue.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`BrowserStorage`] is the `localStorage` backend behind the persisted
//! session. The `session_item` helpers use `sessionStorage` for values that
//! must not outlive the tab (the OAuth `state` nonce). Outside the browser
//! reads find nothing and writes report the storage as unavailable.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::PersistError;
use session::persist::StorageBackend;

/// `window.localStorage` as a session persistence backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, PersistError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(PersistError::Unavailable)
}

#[cfg(feature = "csr")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.session_storage().ok().flatten())
}

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|_| PersistError::Unavailable)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| PersistError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(PersistError::Unavailable)
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), PersistError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|_| PersistError::Unavailable)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(PersistError::Unavailable)
        }
    }
}

/// Store a tab-scoped value in `sessionStorage`. Best effort.
pub fn set_session_item(key: &str, value: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(key, value);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}

/// Read and remove a tab-scoped value.
pub fn take_session_item(key: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let storage = session_storage()?;
        let value = storage.get_item(key).ok().flatten()?;
        let _ = storage.remove_item(key);
        Some(value)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}
