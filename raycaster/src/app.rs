use crate::config::Startup;
use crate::platform::{FrameLimiter, MacroquadCanvas, poll_input};
use crate::ui::UIManager;
use macroquad::prelude::*;
use raycore::{Engine, RenderMode, TickOutcome};

const FPS_TEXT_SIZE: f32 = 24.0;

/// Main application structure for the raycaster.
pub struct RCApp {
    engine: Engine,          // Map, viewpoint and the rays cast this tick.
    ui: UIManager,           // Debug and options panels.
    canvas: MacroquadCanvas, // Draw target handed to the engine.
    limiter: FrameLimiter,   // Caps the loop at the configured tick rate.
}

impl RCApp {
    pub fn new(startup: Startup) -> Self {
        let limiter = FrameLimiter::new(startup.engine.tick_rate);
        let engine = Engine::new(
            startup.engine,
            startup.map,
            startup.viewpoint,
            startup.window.width as f32,
            startup.window.height as f32,
        );
        Self {
            engine,
            ui: UIManager::new(),
            canvas: MacroquadCanvas,
            limiter,
        }
    }

    /// Runs frames until the window is closed or Escape is pressed.
    pub async fn run(&mut self) {
        prevent_quit();

        loop {
            let dt = get_frame_time();

            self.handle_global_shortcuts();
            let ui_consumed_input = self.ui.update(&mut self.engine);
            let input = poll_input(ui_consumed_input);

            if self.engine.tick(&input, dt, &mut self.canvas) == TickOutcome::Quit {
                println!("[raycaster] Quit requested, shutting down.");
                break;
            }

            if self.engine.mode() == RenderMode::FirstPerson {
                self.draw_fps();
            }
            self.ui.render();

            self.limiter.wait();
            next_frame().await;
        }
    }

    fn handle_global_shortcuts(&mut self) {
        let mode = if is_key_pressed(KeyCode::Key1) {
            Some(RenderMode::FreeAim)
        } else if is_key_pressed(KeyCode::Key2) {
            Some(RenderMode::TopDown)
        } else if is_key_pressed(KeyCode::Key3) {
            Some(RenderMode::FirstPerson)
        } else {
            None
        };
        if let Some(mode) = mode {
            if mode != self.engine.mode() {
                println!("[raycaster] Switching to {} mode", mode);
                self.engine.set_mode(mode);
            }
        }

        if is_key_pressed(KeyCode::Tab) {
            self.ui.toggle_visual_options_panel();
        }
        if is_key_pressed(KeyCode::F3) {
            self.ui.toggle_debug_panel();
        }
    }

    fn draw_fps(&self) {
        let text = format!("Running at {} frames per second", get_fps());
        draw_text(&text, 10.0, FPS_TEXT_SIZE, FPS_TEXT_SIZE, YELLOW);
    }
}
