//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the session crate's auth gateway over HTTP.

pub mod api;
