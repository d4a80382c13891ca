#![allow(non_snake_case)]

//! Document library client
//!
//! Browser front end for the article library server: lists downloaded
//! documents, triggers searches and text extraction, and shows parsed text.

pub mod bindings;
pub mod components;
pub mod config;
pub mod error;
pub mod services;
pub mod utils;

mod app;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use app::App;
use config::ClientConfig;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("{} v{} starting", NAME, VERSION);

    // Remove loading spinner
    if let Some(loader) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app-loading"))
    {
        loader.remove();
    }

    let config = ClientConfig::load();
    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
