use std::path::PathBuf;
use std::time::Duration;

use crate::raster::Rgba;

/// Grid dimensions in cells.
pub const CELLS_WIDTH: u32 = 125;
pub const CELLS_HEIGHT: u32 = 125;

/// Rendered surface size in pixels. Must be an exact multiple of the grid.
pub const RESOLUTION_WIDTH: u32 = 750;
pub const RESOLUTION_HEIGHT: u32 = 750;

/// Frames per second while paused.
pub const EDITING_FPS: u32 = 30;

/// Step interval (in 10 ms ticks) used at startup and after a speed reset.
pub const DEFAULT_INTERVAL: u32 = 10;

/// How long status messages stay on screen.
pub const OVERLAY_DURATION: Duration = Duration::from_millis(1500);

/// Random blob stamping: Chebyshev radius and 1-in-N fill chance.
pub const BLOB_RADIUS: u32 = 6;
pub const BLOB_DENSITY: u32 = 3;

/// Exit statuses for fatal startup errors.
pub const EXIT_FONT: i32 = 2;
pub const EXIT_LAYOUTS: i32 = 3;
pub const EXIT_GPU: i32 = 4;

/// Startup configuration for the visualizer.
#[derive(Debug, Clone)]
pub struct Config {
    pub cells_width: u32,
    pub cells_height: u32,
    pub resolution_width: u32,
    pub resolution_height: u32,
    pub editing_fps: u32,
    pub default_interval: u32,
    pub overlay_duration: Duration,
    pub blob_radius: u32,
    pub blob_density: u32,
    pub alive_color: Rgba,
    pub dead_color: Rgba,
    pub text_color: Rgba,
    /// Bitmap font used for the overlay and hint line.
    pub font_path: PathBuf,
    /// Preset layouts stamped with the middle mouse button.
    pub layouts_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
        Self {
            cells_width: CELLS_WIDTH,
            cells_height: CELLS_HEIGHT,
            resolution_width: RESOLUTION_WIDTH,
            resolution_height: RESOLUTION_HEIGHT,
            editing_fps: EDITING_FPS,
            default_interval: DEFAULT_INTERVAL,
            overlay_duration: OVERLAY_DURATION,
            blob_radius: BLOB_RADIUS,
            blob_density: BLOB_DENSITY,
            alive_color: Rgba::rgb(0x00, 0x00, 0xFF),
            dead_color: Rgba::rgb(0xFF, 0xFF, 0xFF),
            text_color: Rgba::rgb(0xE0, 0x20, 0x20),
            font_path: assets.join("font.json"),
            layouts_path: assets.join("layouts.json"),
        }
    }
}

impl Config {
    /// Pixels per cell horizontally and vertically.
    pub fn ratio(&self) -> (u32, u32) {
        (
            self.resolution_width / self.cells_width,
            self.resolution_height / self.cells_height,
        )
    }
}
