//! Ingredient Lens Web App (Leptos + WASM)

mod app;
mod components;
mod timer;

pub use timer::GlooSleeper;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(app::App);
}
