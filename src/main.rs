mod components;
mod config;
mod document;
mod ingest;
mod logging;
mod model;
mod spring;
mod state;

use components::App;
use log::LevelFilter;

fn main() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::init(level);
    log::info!("liquid-text {}", env!("CARGO_PKG_VERSION"));
    yew::Renderer::<App>::new().render();
}
