use macroquad::prelude::*;
use raycore::{Canvas, Rgb};

/// Draws engine output straight to the macroquad window.
pub struct MacroquadCanvas;

#[inline(always)]
fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.0, rgb.1, rgb.2, 255)
}

impl Canvas for MacroquadCanvas {
    fn clear(&mut self, color: Rgb) {
        clear_background(to_color(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        draw_rectangle(x, y, width, height, to_color(color));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, thickness: f32) {
        draw_line(x1, y1, x2, y2, thickness, to_color(color));
    }

    fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Rgb) {
        draw_circle(center_x, center_y, radius, to_color(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color_is_opaque() {
        let color = to_color(Rgb(255, 0, 51));
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }
}
