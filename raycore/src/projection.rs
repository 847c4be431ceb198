use crate::ray::RayHit;
use crate::SHADE_FALLOFF;

/// One vertical strip of the first-person view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSlice {
    pub column: usize,
    /// Depth after fish-eye correction.
    pub corrected_depth: f32,
    /// Slice height in pixels.
    pub height: f32,
    /// Grayscale intensity, darker with distance.
    pub shade: u8,
}

/// Screen-space projection parameters for a fan of `ray_count` rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ray_count: usize,
    /// Apparent wall scale.
    pub k: f32,
    pub epsilon: f32,
    pub max_slice_height: f32,
}

impl Projection {
    /// Width of one slice: half the screen split evenly between the rays.
    pub fn column_width(&self) -> f32 {
        (self.screen_width / 2.0 / self.ray_count.max(1) as f32).floor()
    }

    /// Removes the fish-eye curvature by projecting the ray onto the facing.
    #[inline(always)]
    pub fn correct_depth(depth: f32, angle_offset: f32) -> f32 {
        depth * angle_offset.cos()
    }

    pub fn slice_height(&self, corrected_depth: f32) -> f32 {
        (self.k / (corrected_depth + self.epsilon))
            .min(self.max_slice_height)
            .max(0.0)
    }

    pub fn shade(depth: f32) -> u8 {
        (255.0 / (1.0 + depth * depth * SHADE_FALLOFF)).clamp(0.0, 255.0) as u8
    }

    pub fn project(&self, column: usize, angle_offset: f32, hit: &RayHit) -> WallSlice {
        let corrected_depth = Self::correct_depth(hit.depth, angle_offset);
        WallSlice {
            column,
            corrected_depth,
            height: self.slice_height(corrected_depth),
            shade: Self::shade(hit.depth),
        }
    }

    /// Screen rectangle (x, y, width, height) of a slice, centred vertically
    /// in the right half of the screen.
    pub fn slice_rect(&self, slice: &WallSlice) -> (f32, f32, f32, f32) {
        let scale = self.column_width();
        let half_width = (self.screen_width / 2.0).floor();
        let half_height = (self.screen_height / 2.0).floor();
        (
            half_width + slice.column as f32 * scale,
            half_height - (slice.height / 2.0).floor(),
            scale,
            slice.height.floor(),
        )
    }
}
