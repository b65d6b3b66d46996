//! Task List Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod remote;
mod store;

use app::App;
use leptos::prelude::*;
use tracing::Level;

fn main() {
    console_error_panic_hook::set_once();
    let max_level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    if let Err(e) = console_logger::init_logger("TaskList", max_level) {
        web_sys::console::error_1(&e.to_string().into());
    }
    mount_to_body(App);
}
