//! # client
//!
//! Leptos + WASM front end for the expense tracker.
//!
//! Pages, components and reactive state live here together with the browser
//! adapters (localStorage, `document.cookie`, timers, `location.replace`,
//! toasts) that plug into the platform-neutral `session` crate. Browser-only
//! code is gated behind the `csr` feature; native builds compile inert
//! fallbacks so the pure helpers stay unit-testable.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
