//! # client
//!
//! Leptos + WASM frontend for the YouTube comment extractor.
//!
//! This crate contains the single extraction page, its components, browser
//! state, and the wire types shared with the `server` crate. The server
//! depends on it with the `ssr` feature to render the page and to serialize
//! API responses with the same structs the browser decodes.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
