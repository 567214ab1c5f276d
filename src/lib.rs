//! # customer-portal
//!
//! Leptos + WASM frontend for the customer-management backend.
//!
//! This crate contains pages, components, reactive state, the browser token
//! store and the `gloo-net` transport. Session lifecycle, routing rules and
//! the REST client live in the `portal` crate; this crate only wires them to
//! the browser and renders.

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
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
