use catppuccin_egui::set_theme;
use raycore::Engine;

use crate::ui::components::{DebugPanel, VisualOptionsPanel};

pub struct UIManager {
    debug_panel: DebugPanel,
    visual_options_panel: VisualOptionsPanel,
}

impl UIManager {
    pub fn new() -> Self {
        Self {
            debug_panel: DebugPanel::new(),
            visual_options_panel: VisualOptionsPanel::new(),
        }
    }

    /// Builds this frame's panels. Returns true when the pointer is over the
    /// UI, in which case mouse input should not reach the map.
    pub fn update(&mut self, engine: &mut Engine) -> bool {
        self.debug_panel.update();

        let mut input_consumed = false;
        new_egui_macroquad::ui(|egui_ctx| {
            set_theme(egui_ctx, catppuccin_egui::MOCHA);
            self.visual_options_panel.draw(egui_ctx, engine);
            self.debug_panel.draw(egui_ctx, engine);
            input_consumed = egui_ctx.is_pointer_over_area() || egui_ctx.wants_pointer_input();
        });
        input_consumed
    }

    pub fn render(&self) {
        new_egui_macroquad::draw();
    }

    pub fn toggle_debug_panel(&mut self) {
        self.debug_panel.toggle();
    }

    pub fn toggle_visual_options_panel(&mut self) {
        self.visual_options_panel.toggle();
    }
}
