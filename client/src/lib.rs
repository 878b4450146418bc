//! # portal-client
//!
//! Leptos + WASM frontend for the member portal: plan catalogue, member
//! dashboard, M-Pesa payments, and the admin console.
//!
//! This crate contains pages, components, client-side state, the REST client
//! with token refresh, and the payment status poller. The `ssr` feature lets
//! the host server render it; `hydrate` builds the browser bundle.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: wire logging and panics to the console, then hydrate.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
