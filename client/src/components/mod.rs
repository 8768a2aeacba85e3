//! Reusable UI components shared across pages.

pub mod guards;
pub mod loading;
pub mod navbar;
pub mod toasts;
