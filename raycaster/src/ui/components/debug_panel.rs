use crate::platform::Timer;
use crate::ui::{BASE_PADDING, BASE_SPACING};
use macroquad::prelude::*;
use new_egui_macroquad::egui;
use egui::Color32;
use raycore::{Engine, RenderMode};

const FPS_REFRESH_INTERVAL: f32 = 0.5;

/// Colour for the FPS readout: green when smooth, red when struggling.
fn fps_color(fps: i32) -> Color32 {
    if fps > 55 {
        Color32::from_rgb(0, 180, 0)
    } else if fps > 30 {
        Color32::from_rgb(220, 180, 70)
    } else {
        Color32::from_rgb(220, 100, 100)
    }
}

/// Debug panel component that displays engine state
pub struct DebugPanel {
    displayed_fps: i32,
    fps_timer: Timer,
    show_debug: bool,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self {
            displayed_fps: get_fps(),
            fps_timer: Timer::new(FPS_REFRESH_INTERVAL),
            show_debug: false,
        }
    }

    /// Refresh the FPS counter twice a second
    pub fn update(&mut self) {
        if self.fps_timer.tick(get_frame_time()) {
            self.displayed_fps = get_fps();
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.show_debug = !self.show_debug;
        self.show_debug
    }

    pub fn draw(&mut self, egui_ctx: &egui::Context, engine: &Engine) {
        if !self.show_debug {
            return;
        }

        egui::Window::new("Debug Info")
            .resizable(false)
            .collapsible(true)
            .default_pos(egui::pos2(screen_width() - 280.0, 32.0))
            .default_size(egui::vec2(260.0, 0.0))
            .show(egui_ctx, |ui| {
                ui.heading("Performance");
                ui.group(|ui| {
                    egui::Grid::new("perf_grid")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .show(ui, |ui| {
                            ui.label("FPS:");
                            ui.colored_label(
                                fps_color(self.displayed_fps),
                                self.displayed_fps.to_string(),
                            );
                            ui.end_row();
                        });
                });

                ui.add_space(BASE_PADDING);
                ui.heading("Viewpoint");
                ui.group(|ui| {
                    let vp = engine.viewpoint;
                    egui::Grid::new("viewpoint_grid")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .show(ui, |ui| {
                            ui.label("Position:");
                            ui.label(format!("({:.1}, {:.1})", vp.x, vp.y));
                            ui.end_row();

                            ui.label("Angle:");
                            ui.label(format!(
                                "{:.2} rad / {:.1} degrees",
                                vp.angle,
                                vp.angle.to_degrees()
                            ));
                            ui.end_row();

                            ui.label("Cell:");
                            match engine.map.cell_of(vp.x, vp.y) {
                                Some((row, col)) => ui.label(format!("row {}, col {}", row, col)),
                                None => ui.label("outside"),
                            };
                            ui.end_row();
                        });
                });

                ui.add_space(BASE_PADDING);
                ui.heading("Rays");
                ui.group(|ui| {
                    let rays = engine.rays();
                    let hits = rays.iter().filter(|(_, hit)| hit.is_hit()).count();
                    egui::Grid::new("ray_grid")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .show(ui, |ui| {
                            ui.label("Hits:");
                            ui.label(format!("{} / {}", hits, rays.len()));
                            ui.end_row();

                            ui.label("Max depth:");
                            ui.label(format!("{:.0}", engine.max_depth()));
                            ui.end_row();

                            ui.label("Marcher:");
                            ui.label(engine.config().marcher.label());
                            ui.end_row();

                            if engine.mode() == RenderMode::FreeAim {
                                ui.label("Aim:");
                                ui.label(if engine.aim_enabled { "on" } else { "off" });
                                ui.end_row();
                            }
                        });
                });

                ui.add_space(BASE_PADDING);
                ui.heading("Map");
                ui.group(|ui| {
                    egui::Grid::new("map_grid")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .show(ui, |ui| {
                            ui.label("Size:");
                            ui.label(format!("{} x {}", engine.map.width, engine.map.height));
                            ui.end_row();

                            ui.label("Cell size:");
                            ui.label(format!("{}", engine.map.cell_size));
                            ui.end_row();

                            ui.label("Walls:");
                            ui.label(engine.map.wall_count().to_string());
                            ui.end_row();
                        });
                });
            });
    }
}
