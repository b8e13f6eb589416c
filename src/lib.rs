//! Folio Motion: the client-side motion layer of a single-page portfolio.
//!
//! The page calls `start_site()` once; from then on each effect runs on its
//! own listeners and timers:
//! - an intro overlay with a synthesized hit, shown once per browser session,
//! - scroll reveals, counting stat numbers and growing skill bars,
//! - a typing tagline cycling through phrases,
//! - a dotted background grid that breathes and bends away from the pointer,
//! - scroll progress, back-to-top, active nav link and the mobile menu.
//!
//! Effect logic lives in plain modules behind the traits in [`surface`] so it
//! runs under `cargo test` on the host; the browser bindings are private.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod grid;
pub mod intro;
pub mod nav;
pub mod reveal;
pub mod schedule;
pub mod surface;
pub mod typing;
mod web;

#[cfg(test)]
mod testing;

pub use config::SiteConfig;
pub use error::SiteError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (hot reload) fails harmlessly.
    console_log::init_with_level(log::Level::Info).ok();
}

/// Start every effect. Safe to call before `DOMContentLoaded`; startup is
/// deferred until the document is parsed.
#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    web::start().map_err(Into::into)
}

/// Show or hide a publication abstract, relabelling `button`. Returns whether
/// the abstract is now visible.
#[wasm_bindgen(js_name = toggleAbstract)]
pub fn toggle_abstract(id: &str, button: Option<web_sys::HtmlElement>) -> Result<bool, JsValue> {
    web::nav::toggle_abstract_by_id(id, button).map_err(Into::into)
}
