//! Browser front end. Build with `trunk serve` from this directory; the
//! OMDb key is read from `OMDB_API_KEY` at compile time.

mod app;
mod logging;
mod renderer;
mod storage;

use wasm_bindgen::prelude::*;

pub use renderer::{DomRenderer, Page};
pub use storage::{BrowserStorage, StorageArea};

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    leptos::mount::mount_to_body(app::App);
}
