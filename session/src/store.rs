//! Session store: the explicit context object guards and requests read.
//!
//! DESIGN
//! ======
//! The only way to build a store is [`SessionStore::rehydrate`], so nothing can
//! observe the session before storage has been read. Every transition that
//! changes the session writes the slice through synchronously before
//! returning. Overlapping operations are applied in settlement order; the
//! last one to settle wins.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::error::AuthError;
use crate::persist::{PersistedSlice, Persistor, ReservedSlots, StorageBackend};
use crate::reducer::{AuthEvent, AuthOp, reduce};
use crate::state::Session;

#[derive(Clone, Debug)]
pub struct SessionStore<B> {
    session: Session,
    reserved: ReservedSlots,
    persistor: Persistor<B>,
}

impl<B: StorageBackend> SessionStore<B> {
    /// Read the persisted slice from `backend` and install it. A missing or
    /// unreadable blob installs the empty session.
    #[must_use]
    pub fn rehydrate(backend: B) -> Self {
        Self::rehydrate_from(Persistor::new(backend))
    }

    fn rehydrate_from(persistor: Persistor<B>) -> Self {
        let slice = persistor.load().unwrap_or_default();
        let session = slice.to_session();
        log::debug!("session rehydrated: authenticated={}", session.is_authenticated());
        Self { session, reserved: slice.reserved, persistor }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Current whitelisted slice, as it would be written to storage.
    #[must_use]
    pub fn slice(&self) -> PersistedSlice {
        PersistedSlice::capture(&self.session, &self.reserved)
    }

    /// Apply one reducer step. Returns whether the session changed; a change
    /// is written through to storage before this returns.
    pub fn dispatch(&mut self, event: AuthEvent) -> bool {
        let op = event.op();
        let next = reduce(&self.session, event);
        if next == self.session {
            return false;
        }
        log::debug!(
            "session transition: op={} authenticated {} -> {}",
            op.as_str(),
            self.session.is_authenticated(),
            next.is_authenticated()
        );
        self.session = next;
        self.flush();
        true
    }

    /// Apply the settled result of `op`. Failures dispatch
    /// [`AuthEvent::Failed`] (which only changes the session for refresh) and
    /// are handed back for display.
    ///
    /// # Errors
    ///
    /// Returns the operation's error unchanged.
    pub fn settle(&mut self, op: AuthOp, result: Result<AuthEvent, AuthError>) -> Result<(), AuthError> {
        match result {
            Ok(event) => {
                self.dispatch(event);
                Ok(())
            }
            Err(error) => {
                match error.status() {
                    Some(status) => log::warn!("auth operation rejected: op={} status={status}", op.as_str()),
                    None => log::warn!("auth operation failed: op={} error={error}", op.as_str()),
                }
                self.dispatch(AuthEvent::Failed(op));
                Err(error)
            }
        }
    }

    fn flush(&self) {
        if let Err(e) = self.persistor.save(&self.slice()) {
            log::warn!("session write-through failed: {e}");
        }
    }
}
