use crate::grid::Cell;
use crate::movement::{Turn, Walk};

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub const fn gray(level: u8) -> Rgb {
        Rgb(level, level, level)
    }
}

/// Draw primitives the engine renders through. Coordinates are screen pixels.
pub trait Canvas {
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, thickness: f32);
    fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Rgb);
}

/// Input state for one tick, already translated from raw devices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub quit: bool,
    pub walk: Walk,
    pub turn: Turn,
    /// Axis-aligned source movement used in free-aim mode, each in -1..=1.
    pub nudge: (f32, f32),
    /// Pointer position in screen pixels.
    pub pointer: (f32, f32),
    /// Flips the free-aim line on or off.
    pub toggle_aim: bool,
    /// Cell state to paint under the pointer this tick.
    pub paint: Option<Cell>,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            quit: false,
            walk: Walk::Still,
            turn: Turn::None,
            nudge: (0.0, 0.0),
            pointer: (0.0, 0.0),
            toggle_aim: false,
            paint: None,
        }
    }
}
