//! Client session model and auth state machine for the Edwardo web client.
//!
//! This crate is UI-framework agnostic so the Leptos client can consume it
//! directly while every transition, guard, and storage rule stays testable
//! without a browser.
//!
//! FLOW
//! ====
//! A UI action builds an [`gateway::AuthRequest`] and runs it through
//! [`gateway::perform`]. The settled result is handed to
//! [`store::SessionStore::settle`], which runs the pure [`reducer::reduce`]
//! step and writes the whitelisted slice through [`persist::Persistor`].
//! Guards ([`guard`]) and the request authenticator ([`authenticator`]) read
//! the resulting [`state::Session`] on the next render or request.

pub mod authenticator;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod guard;
pub mod persist;
pub mod reducer;
pub mod state;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{AuthError, PersistError, ValidationError};
pub use state::{Session, UserProfile};
pub use store::SessionStore;
