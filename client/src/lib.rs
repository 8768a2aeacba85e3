//! # edwardo-web
//!
//! Leptos + WASM front end for Edwardo: landing page, login/registration,
//! and the authenticated dashboard.
//!
//! The session state machine lives in the `session` crate; this crate wires
//! it to the browser (localStorage, `fetch`, router navigation) and renders
//! the pages around it.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    let _ = console_log::init_with_level(level);
    leptos::mount::mount_to_body(app::App);
}
