//! Auth-session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided to the component tree as `RwSignal<AuthState>`. Route guards, the
//! navbar, and the auth actions all read or settle through it. `store` is
//! `None` until rehydration has run; nothing may consult the session before
//! that, so the app renders a loading view instead.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::guard::{self, GuardOutcome};
use session::persist::StorageBackend;
use session::reducer::{AuthEvent, AuthOp};
use session::{AuthError, Session, SessionStore};

use crate::util::storage::BrowserStorage;

#[derive(Clone, Debug)]
pub struct AuthState<B = BrowserStorage> {
    pub store: Option<SessionStore<B>>,
}

impl<B> Default for AuthState<B> {
    fn default() -> Self {
        Self { store: None }
    }
}

impl AuthState<BrowserStorage> {
    /// Read the persisted session out of `localStorage`.
    #[must_use]
    pub fn rehydrated() -> Self {
        Self::rehydrated_from(BrowserStorage)
    }
}

impl<B: StorageBackend> AuthState<B> {
    #[must_use]
    pub fn rehydrated_from(backend: B) -> Self {
        Self { store: Some(SessionStore::rehydrate(backend)) }
    }

    /// True until rehydration has completed.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.store.is_none()
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.store.as_ref().map(SessionStore::session)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some_and(Session::is_authenticated)
    }

    /// Protected-route decision, or `None` while still loading.
    #[must_use]
    pub fn protected_outcome(&self, path: &str) -> Option<GuardOutcome> {
        self.session()
            .map(|session| guard::protected_guard(session.is_authenticated(), path))
    }

    /// Root redirect decision, or `None` while still loading.
    #[must_use]
    pub fn redirect_outcome(&self, path: &str) -> Option<GuardOutcome> {
        self.session()
            .map(|session| guard::redirect_guard(session.is_authenticated(), path))
    }

    /// Apply a settled operation to the store.
    ///
    /// # Errors
    ///
    /// Returns the operation's error for display.
    pub fn settle(&mut self, op: AuthOp, result: Result<AuthEvent, AuthError>) -> Result<(), AuthError> {
        match &mut self.store {
            Some(store) => store.settle(op, result),
            None => {
                log::warn!("auth result arrived before rehydration: op={}", op.as_str());
                result.map(|_| ())
            }
        }
    }
}
