mod app;
mod config;
mod font;
mod grid;
mod input;
mod layouts;
mod overlay;
mod raster;
mod renderer;
mod session;
mod simulation;
mod timing;

use winit::event_loop::EventLoop;

use crate::config::{Config, EXIT_FONT, EXIT_GPU, EXIT_LAYOUTS};
use crate::font::BitmapFont;
use crate::layouts::LayoutStore;

fn main() {
    env_logger::init();

    log::info!("Conway's Game of Life");
    log::info!("Controls:");
    log::info!("  Space       - Run / Pause");
    log::info!("  Left/Right  - Slower / faster (scroll wheel too)");
    log::info!("  R           - Reset speed");
    log::info!("  C           - Clear grid");
    log::info!("  N           - Step (when paused)");
    log::info!("  Up/Down     - Select layout");
    log::info!("  Left click  - Toggle cell (when paused)");
    log::info!("  Right click - Random blob (when paused)");
    log::info!("  Middle click- Stamp layout (when paused)");
    log::info!("  Escape      - Quit");

    let config = Config::default();

    let font = BitmapFont::load(&config.font_path).unwrap_or_else(|e| {
        log::error!("{e}");
        std::process::exit(EXIT_FONT);
    });
    let layouts = LayoutStore::load(&config.layouts_path).unwrap_or_else(|e| {
        log::error!("{e}");
        std::process::exit(EXIT_LAYOUTS);
    });

    let event_loop = EventLoop::new().unwrap_or_else(|e| {
        log::error!("Failed to create event loop: {e}");
        std::process::exit(EXIT_GPU);
    });
    let mut app = app::App::new(config, font, layouts);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
        std::process::exit(1);
    }
}
