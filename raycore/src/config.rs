use anyhow::{Result, bail};
use serde::Deserialize;

use crate::engine::RenderMode;
use crate::ray::Marcher;
use crate::{
    DEFAULT_FOV, DEFAULT_MOVE_SPEED, DEFAULT_PROJECTION_EPSILON, DEFAULT_PROJECTION_K,
    DEFAULT_RAY_COUNT, DEFAULT_STEP_SIZE, DEFAULT_TICK_RATE, DEFAULT_TURN_SENSITIVITY,
    MAX_FRAME_TIME, MIN_STEP_SIZE,
};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectionConfig {
    pub k: f32,
    pub epsilon: f32,
    pub max_slice_height: Option<f32>, // Defaults to the screen width
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_PROJECTION_K,
            epsilon: DEFAULT_PROJECTION_EPSILON,
            max_slice_height: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: RenderMode,
    pub fov: f32, // radians
    pub ray_count: usize,
    pub move_speed: f32,       // world units per tick at `tick_rate`
    pub turn_sensitivity: f32, // radians per tick at `tick_rate`
    pub tick_rate: u32,
    pub step_size: f32,
    pub max_depth: Option<f32>, // Defaults to the longest map side
    pub marcher: Marcher,
    pub frame_time_scaled: bool,
    pub projection: ProjectionConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::FirstPerson,
            fov: DEFAULT_FOV,
            ray_count: DEFAULT_RAY_COUNT,
            move_speed: DEFAULT_MOVE_SPEED,
            turn_sensitivity: DEFAULT_TURN_SENSITIVITY,
            tick_rate: DEFAULT_TICK_RATE,
            step_size: DEFAULT_STEP_SIZE,
            max_depth: None,
            marcher: Marcher::Fixed,
            frame_time_scaled: true,
            projection: ProjectionConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Rejects tunables the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.fov > 0.0 && self.fov < std::f32::consts::PI) {
            bail!("fov must be between 0 and PI radians (got {})", self.fov);
        }
        if self.ray_count == 0 {
            bail!("ray_count must be at least 1");
        }
        if self.tick_rate == 0 {
            bail!("tick_rate must be at least 1");
        }
        if !(self.step_size >= MIN_STEP_SIZE) {
            bail!(
                "step_size must be at least {} (got {})",
                MIN_STEP_SIZE,
                self.step_size
            );
        }
        if !(self.move_speed >= 0.0) || !(self.turn_sensitivity >= 0.0) {
            bail!("move_speed and turn_sensitivity must not be negative");
        }
        if let Some(depth) = self.max_depth {
            if !(depth > 0.0) {
                bail!("max_depth must be positive (got {})", depth);
            }
        }
        if !(self.projection.k > 0.0) || !(self.projection.epsilon > 0.0) {
            bail!("projection k and epsilon must be positive");
        }
        if let Some(height) = self.projection.max_slice_height {
            if !(height >= 0.0) {
                bail!("max_slice_height must not be negative (got {})", height);
            }
        }
        Ok(())
    }

    /// Multiplier that turns per-tick speeds into this frame's deltas.
    /// Frames longer than `MAX_FRAME_TIME` count as `MAX_FRAME_TIME`.
    pub fn tick_scale(&self, dt: f32) -> f32 {
        if self.frame_time_scaled {
            dt.clamp(0.0, MAX_FRAME_TIME) * self.tick_rate as f32
        } else {
            1.0
        }
    }
}
