use crate::ui::BASE_PADDING;
use new_egui_macroquad::egui;
use raycore::{Engine, Marcher, RenderMode};

const MIN_RAYS: usize = 1;
const MAX_RAYS: usize = 120;
const MIN_FOV_DEGREES: f32 = 10.0;
const MAX_FOV_DEGREES: f32 = 170.0;

/// Runtime switches for mode, fan shape and marcher
pub struct VisualOptionsPanel {
    show_visual_options: bool,
}

impl VisualOptionsPanel {
    pub fn new() -> Self {
        Self {
            show_visual_options: false,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.show_visual_options = !self.show_visual_options;
        self.show_visual_options
    }

    pub fn draw(&mut self, egui_ctx: &egui::Context, engine: &mut Engine) {
        if !self.show_visual_options {
            return;
        }
        egui::Window::new("Visual Options")
            .resizable(false)
            .collapsible(true)
            .default_pos(egui::pos2(32.0, 32.0))
            .default_size(egui::vec2(260.0, 0.0))
            .show(egui_ctx, |ui| {
                ui.heading("Mode");
                ui.horizontal(|ui| {
                    for mode in RenderMode::all() {
                        let selected = engine.mode() == *mode;
                        if ui.selectable_label(selected, mode.label()).clicked() && !selected {
                            engine.set_mode(*mode);
                        }
                    }
                });
                ui.add_space(BASE_PADDING);

                ui.heading("Fan");
                let mut ray_count = engine.config().ray_count;
                if ui
                    .add(egui::Slider::new(&mut ray_count, MIN_RAYS..=MAX_RAYS).text("Rays"))
                    .changed()
                {
                    engine.set_ray_count(ray_count);
                }
                let mut fov_degrees = engine.config().fov.to_degrees();
                if ui
                    .add(
                        egui::Slider::new(&mut fov_degrees, MIN_FOV_DEGREES..=MAX_FOV_DEGREES)
                            .text("FOV")
                            .custom_formatter(|n, _decimals| format!("{:.0}°", n)),
                    )
                    .changed()
                {
                    engine.set_fov(fov_degrees.to_radians());
                }
                ui.add_space(BASE_PADDING);

                ui.heading("Marcher");
                let mut marcher = engine.config().marcher;
                ui.radio_value(&mut marcher, Marcher::Fixed, Marcher::Fixed.label());
                ui.radio_value(&mut marcher, Marcher::Grid, Marcher::Grid.label());
                if marcher != engine.config().marcher {
                    engine.set_marcher(marcher);
                }
            });
    }
}
