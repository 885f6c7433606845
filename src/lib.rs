//! Birthday Bash core crate.
//!
//! A full-screen birthday greeting rendered from WASM. Tapping the start button
//! sets off four particle layers (stars, confetti, floating emojis, balloons),
//! flies in a shuffled grid of photos and videos that can be browsed in a
//! lightbox, starts the music and reveals a message panel.
//!
//! Behaviour lives in plain Rust modules (`clock`, `particles`, `media`, `page`)
//! that are driven by timestamps and tested natively. The `web` module owns the
//! canvas, the DOM overlays and the event listeners.

use wasm_bindgen::prelude::*;

pub mod anim;
pub mod clock;
pub mod config;
pub mod media;
pub mod page;
pub mod particles;
mod web;

pub use config::Config;
pub use page::{AudioSink, Page};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Mounts the page with the stock configuration.
#[wasm_bindgen]
pub fn start_celebration() -> Result<(), JsValue> {
    web::mount(Config::default())
}

/// Mounts the page with a JSON configuration; omitted fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_celebration_with_config(json: &str) -> Result<(), JsValue> {
    let config = Config::from_json(json).map_err(|err| {
        gloo::console::warn!("rejected page config", err.to_string());
        JsValue::from_str(&format!("invalid config: {err}"))
    })?;
    web::mount(config)
}
