use wasm_bindgen::prelude::*;

pub mod api;
pub mod audio;
pub mod canvas;
pub mod components;
pub mod dsp;
pub mod state;
pub mod types;

use components::app::App;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("songscope v{} starting", env!("CARGO_PKG_VERSION"));

    leptos::mount::mount_to_body(App);
}
