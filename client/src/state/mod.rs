//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `notice`) so components depend on small
//! focused models provided through context.

pub mod auth;
pub mod notice;
