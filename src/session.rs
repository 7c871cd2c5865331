use std::time::Duration;

use rand::Rng;

use crate::config::Config;
use crate::layouts::Layout;
use crate::overlay::Overlay;
use crate::simulation::Simulation;
use crate::timing::{SimulationClock, TimingController};

/// The rendered surface and its fixed pixels-per-cell ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub ratio_x: u32,
    pub ratio_y: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32, cells_width: u32, cells_height: u32) -> Self {
        debug_assert!(
            width % cells_width == 0 && height % cells_height == 0,
            "surface {width}x{height} is not a multiple of grid {cells_width}x{cells_height}"
        );
        Self {
            width,
            height,
            ratio_x: (width / cells_width).max(1),
            ratio_y: (height / cells_height).max(1),
        }
    }

    /// Cell under a pixel position, or `None` when the point lies outside the
    /// surface.
    pub fn cell_from_pixel(&self, px: f64, py: f64) -> Option<(i32, i32)> {
        if !(px >= 0.0 && py >= 0.0 && px < self.width as f64 && py < self.height as f64) {
            return None;
        }
        let x = px as u32 / self.ratio_x;
        let y = py as u32 / self.ratio_y;
        Some((x as i32, y as i32))
    }
}

/// All mutable visualizer state, owned by the frame loop.
///
/// Editing actions only apply while paused and report whether they did;
/// control actions apply at any time and post an overlay message.
#[derive(Debug, Clone)]
pub struct Session {
    pub simulation: Simulation,
    pub clock: SimulationClock,
    pub timing: TimingController,
    pub overlay: Overlay,
    surface: Surface,
    overlay_duration: Duration,
    selected_layout: usize,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let clock = SimulationClock::new(config.default_interval);
        let timing = TimingController::new(config.editing_fps, &clock);
        Self {
            simulation: Simulation::new(config.cells_width, config.cells_height),
            clock,
            timing,
            overlay: Overlay::new(),
            surface: Surface::new(
                config.resolution_width,
                config.resolution_height,
                config.cells_width,
                config.cells_height,
            ),
            overlay_duration: config.overlay_duration,
            selected_layout: 0,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn selected_layout(&self) -> usize {
        self.selected_layout
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.overlay.show(message, self.overlay_duration);
    }

    /// Flip the cell under a pixel. Paused only.
    pub fn toggle_cell_at(&mut self, px: f64, py: f64) -> bool {
        if self.is_running() {
            return false;
        }
        let Some((x, y)) = self.surface.cell_from_pixel(px, py) else {
            return false;
        };
        self.simulation.toggle(x, y);
        true
    }

    /// Bring cells within `radius` (Chebyshev) of the pixel to life, each
    /// independently with probability `1/density`. Paused only.
    pub fn stamp_random_blob<R: Rng + ?Sized>(
        &mut self,
        px: f64,
        py: f64,
        radius: u32,
        density: u32,
        rng: &mut R,
    ) -> bool {
        if self.is_running() {
            return false;
        }
        let Some((cx, cy)) = self.surface.cell_from_pixel(px, py) else {
            return false;
        };
        let density = density.max(1);
        let r = radius.min(i32::MAX as u32) as i32;
        let grid = self.simulation.current_mut();
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        let ys = cy.saturating_sub(r).max(0)..=cy.saturating_add(r).min(h - 1);
        let xs = cx.saturating_sub(r).max(0)..=cx.saturating_add(r).min(w - 1);
        for y in ys {
            for x in xs.clone() {
                if rng.gen_ratio(1, density) {
                    grid.set(x, y, true);
                }
            }
        }
        true
    }

    /// Write `layout` with its top-left corner on the cell under the pixel,
    /// replacing what was there and dropping anything off the grid. Paused
    /// only.
    pub fn stamp_layout(&mut self, px: f64, py: f64, layout: &Layout) -> bool {
        if self.is_running() {
            return false;
        }
        let Some((ox, oy)) = self.surface.cell_from_pixel(px, py) else {
            return false;
        };
        let grid = self.simulation.current_mut();
        for ly in 0..layout.height {
            for lx in 0..layout.width {
                let x = ox.saturating_add(lx as i32);
                let y = oy.saturating_add(ly as i32);
                grid.set(x, y, layout.get(lx, ly));
            }
        }
        log::info!("Stamped {} at cell ({ox}, {oy})", layout.name);
        true
    }

    /// Advance exactly one generation. Paused only.
    pub fn step_once(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.simulation.step();
        self.notify("STEP");
        true
    }

    /// Advance one generation if running. Called once per frame.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.simulation.step();
        true
    }

    pub fn toggle_running(&mut self) {
        let running = self.clock.toggle_running();
        self.timing.refresh(&self.clock);
        log::info!("Simulation {}", if running { "running" } else { "paused" });
        self.notify(if running { "RUN" } else { "PAUSE" });
    }

    /// Pause and kill every cell.
    pub fn clear_all(&mut self) {
        self.clock.set_running(false);
        self.timing.refresh(&self.clock);
        self.simulation.clear();
        log::info!("Grid cleared");
        self.notify("CLEAR");
    }

    /// Shift the step interval by `delta` ticks (negative = faster).
    pub fn adjust_speed(&mut self, delta: i32) {
        let interval = self.clock.adjust(delta);
        self.timing.refresh(&self.clock);
        log::info!("Speed: {interval}");
        self.notify(format!("Speed {interval}"));
    }

    pub fn reset_speed(&mut self) {
        self.clock.reset();
        self.timing.refresh(&self.clock);
        log::info!("Speed reset to {}", self.clock.interval());
        self.notify("SPEED RESET");
    }

    /// Move the layout selection by `delta`, wrapping over `count` layouts.
    /// Returns the new index.
    pub fn select_layout(&mut self, delta: i32, count: usize, name_of: impl Fn(usize) -> String) -> usize {
        if count == 0 {
            return self.selected_layout;
        }
        let count = count as i64;
        let next = (self.selected_layout as i64 + i64::from(delta)).rem_euclid(count);
        self.selected_layout = next as usize;
        let name = name_of(self.selected_layout);
        log::info!("Layout: {name}");
        self.notify(name);
        self.selected_layout
    }
}
