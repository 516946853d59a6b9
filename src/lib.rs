//! Vestibule - Sign-In Screen
//!
//! A single-page login/registration screen that delegates all
//! authentication to an external identity provider, built with Leptos and
//! WebAssembly.

pub mod app;
pub mod core;
pub mod gateway;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
