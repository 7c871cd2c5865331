use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{WindowAttributes, WindowId};

use crate::config::{Config, EXIT_GPU};
use crate::font::BitmapFont;
use crate::input::{self, Action};
use crate::layouts::LayoutStore;
use crate::raster::{Anchor, Frame, Palette};
use crate::renderer::Renderer;
use crate::session::Session;

/// Pixel scale of the overlay message and the hint line.
const OVERLAY_TEXT_SCALE: u32 = 4;
const HINT_TEXT_SCALE: u32 = 1;

/// Application state: the session plus the window-facing collaborators.
pub struct App {
    config: Config,
    session: Session,
    font: BitmapFont,
    layouts: LayoutStore,
    palette: Palette,
    frame: Frame,
    /// GPU resources (created once the event loop resumes).
    renderer: Option<Renderer>,
    /// Last cursor position in window pixels.
    cursor: Option<PhysicalPosition<f64>>,
}

impl App {
    pub fn new(config: Config, font: BitmapFont, layouts: LayoutStore) -> Self {
        let session = Session::new(&config);
        let palette = Palette {
            alive: config.alive_color,
            dead: config.dead_color,
            text: config.text_color,
        };
        let frame = Frame::new(config.resolution_width, config.resolution_height);
        Self {
            config,
            session,
            font,
            layouts,
            palette,
            frame,
            renderer: None,
            cursor: None,
        }
    }

    /// Cursor position translated from window pixels to frame pixels.
    fn cursor_in_frame(&self) -> Option<(f64, f64)> {
        let pos = self.cursor?;
        let (sw, sh) = self.renderer.as_ref()?.surface_size();
        let surface = self.session.surface();
        Some((
            pos.x * f64::from(surface.width) / f64::from(sw.max(1)),
            pos.y * f64::from(surface.height) / f64::from(sh.max(1)),
        ))
    }

    fn layout_name(&self) -> &str {
        self.layouts
            .get(self.session.selected_layout())
            .map_or("-", |l| l.name.as_str())
    }

    fn apply(&mut self, action: Action, event_loop: &ActiveEventLoop) {
        match action {
            Action::ToggleCell => {
                if let Some((x, y)) = self.cursor_in_frame() {
                    self.session.toggle_cell_at(x, y);
                }
            }
            Action::StampBlob => {
                if let Some((x, y)) = self.cursor_in_frame() {
                    self.session.stamp_random_blob(
                        x,
                        y,
                        self.config.blob_radius,
                        self.config.blob_density,
                        &mut rand::thread_rng(),
                    );
                }
            }
            Action::StampLayout => {
                if let (Some((x, y)), Some(layout)) = (
                    self.cursor_in_frame(),
                    self.layouts.get(self.session.selected_layout()),
                ) {
                    self.session.stamp_layout(x, y, layout);
                }
            }
            Action::ToggleRunning => self.session.toggle_running(),
            Action::Clear => self.session.clear_all(),
            Action::AdjustSpeed(delta) => self.session.adjust_speed(delta),
            Action::ResetSpeed => self.session.reset_speed(),
            Action::Step => {
                self.session.step_once();
            }
            Action::SelectLayout(delta) => {
                let layouts = &self.layouts;
                self.session.select_layout(delta, layouts.count(), |i| {
                    layouts.get(i).map_or_else(String::new, |l| l.name.clone())
                });
            }
            Action::Quit => event_loop.exit(),
        }
    }

    /// One frame: step if running, rasterize, present. Redraws the system
    /// asks for between scheduled frames repaint without stepping.
    fn render_frame(&mut self) {
        let now = Instant::now();
        let scheduled = self.session.timing.frame_due(now);
        if scheduled {
            self.session.tick();
        }

        let ratio = self.config.ratio();
        self.frame
            .draw_grid(self.session.simulation.current(), ratio, &self.palette);

        let hint = input::hint(
            self.session.is_running(),
            self.session.clock.interval(),
            self.session.simulation.generation,
            self.layout_name(),
        );
        self.frame.draw_text(
            &self.font,
            &hint,
            Anchor::BottomLeft,
            HINT_TEXT_SCALE,
            self.palette.text,
        );
        if let Some(message) = self.session.overlay.current_message_at(now) {
            self.frame.draw_text(
                &self.font,
                message,
                Anchor::Center,
                OVERLAY_TEXT_SCALE,
                self.palette.text,
            );
        }

        let Some(ref mut renderer) = self.renderer else { return };
        renderer.render(&self.frame);

        let status = if self.session.is_running() { "▶" } else { "⏸" };
        renderer.window().set_title(&format!(
            "Conway's Game of Life | {status} Gen {} | Pop {} | Speed {}",
            self.session.simulation.generation,
            self.session.simulation.current().population(),
            self.session.clock.interval(),
        ));

        if scheduled {
            self.session.timing.frame_done(now);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let attrs = WindowAttributes::default()
            .with_title("Conway's Game of Life")
            .with_inner_size(PhysicalSize::new(
                self.config.resolution_width,
                self.config.resolution_height,
            ))
            .with_resizable(false);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                std::process::exit(EXIT_GPU);
            }
        };

        match Renderer::new(
            window,
            self.config.resolution_width,
            self.config.resolution_height,
        ) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("{e}");
                std::process::exit(EXIT_GPU);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let action = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                None
            }
            WindowEvent::Resized(size) => {
                if let Some(ref mut renderer) = self.renderer {
                    renderer.resize(size.width, size.height);
                }
                None
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput { state, button, .. } => input::button_action(button, state),
            WindowEvent::MouseWheel { delta, .. } => input::scroll_action(delta),
            WindowEvent::KeyboardInput { event, .. } => {
                input::key_action(&event.logical_key, event.state)
            }
            _ => None,
        };

        if let Some(action) = action {
            self.apply(action, event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ref renderer) = self.renderer else { return };
        if self.session.timing.frame_due(Instant::now()) {
            renderer.window().request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.session.timing.next_frame()));
    }
}
