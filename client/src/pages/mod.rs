//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Auth operations go through `util::auth::AuthActions`.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod not_found;
pub mod register;
