mod canvas;
mod config;
mod engine;
mod grid;
mod movement;
mod projection;
mod ray;

// Re-export key types for easier imports
pub use canvas::{Canvas, FrameInput, Rgb};
pub use config::{EngineConfig, ProjectionConfig};
pub use engine::{Engine, RenderMode, TickOutcome};
pub use grid::{Cell, GridMap};
pub use movement::{Turn, Viewpoint, Walk, is_inside_wall, resolve_move};
pub use projection::{Projection, WallSlice};
pub use ray::{Marcher, RayHit, cast, cast_exact};

// Reference tunables
pub const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_3;
pub const DEFAULT_RAY_COUNT: usize = 30;
pub const DEFAULT_MOVE_SPEED: f32 = 2.0;
pub const DEFAULT_TURN_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_TICK_RATE: u32 = 60;
pub const DEFAULT_STEP_SIZE: f32 = 1.0;
pub const MIN_STEP_SIZE: f32 = 0.001;
/// Longest frame the movement scaling will account for, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.1;

// Projection constants
pub const DEFAULT_PROJECTION_K: f32 = 21000.0;
pub const DEFAULT_PROJECTION_EPSILON: f32 = 0.0001;
pub const SHADE_FALLOFF: f32 = 0.0001;
