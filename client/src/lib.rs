//! # client
//!
//! Leptos + WASM front end for the points center. Pages and components live
//! here; the state machines they drive live in `panels` and `session`.
//!
//! Build with `--features csr` for the browser. Without it every browser
//! call is an inert fallback, so the pure helpers stay unit-testable.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: logging, panic hook, mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"console logger already initialized".into());
    }
    log::info!("points center client starting");
    leptos::mount::mount_to_body(app::App);
}
