use serde::Deserialize;

use crate::grid::GridMap;

/// Outcome of a single cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance travelled along the ray; `max_depth` on a miss.
    pub depth: f32,
    /// (row, col) of the wall that stopped the ray.
    pub cell: Option<(usize, usize)>,
    /// World position of the hit, or of the ray tip on a miss.
    pub endpoint: (f32, f32),
}

impl RayHit {
    pub fn is_hit(&self) -> bool {
        self.cell.is_some()
    }

    fn miss(origin_x: f32, origin_y: f32, angle: f32, max_depth: f32) -> Self {
        Self {
            depth: max_depth,
            cell: None,
            endpoint: point_along(origin_x, origin_y, angle, max_depth),
        }
    }
}

/// How a ray is walked through the grid.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Marcher {
    /// Fixed world-unit increments.
    #[default]
    Fixed,
    /// Exact cell-boundary traversal.
    Grid,
}

impl Marcher {
    pub fn cast(
        self,
        map: &GridMap,
        origin_x: f32,
        origin_y: f32,
        angle: f32,
        max_depth: f32,
        step_size: f32,
    ) -> RayHit {
        match self {
            Marcher::Fixed => cast(map, origin_x, origin_y, angle, max_depth, step_size),
            Marcher::Grid => cast_exact(map, origin_x, origin_y, angle, max_depth),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Marcher::Fixed => "Fixed step",
            Marcher::Grid => "Grid traversal",
        }
    }
}

#[inline(always)]
fn point_along(origin_x: f32, origin_y: f32, angle: f32, depth: f32) -> (f32, f32) {
    let (sin_a, cos_a) = angle.sin_cos();
    (origin_x - sin_a * depth, origin_y + cos_a * depth)
}

/// Marches from the origin in `step_size` increments and stops at the first
/// sample that lands in a wall cell.
///
/// Samples outside the grid never count as hits. Once a ray that started
/// inside the grid has left it, the march stops; the result is the same miss
/// that marching on to `max_depth` would produce.
pub fn cast(
    map: &GridMap,
    origin_x: f32,
    origin_y: f32,
    angle: f32,
    max_depth: f32,
    step_size: f32,
) -> RayHit {
    if !(step_size > 0.0) || !(max_depth > 0.0) {
        return RayHit::miss(origin_x, origin_y, angle, max_depth.max(0.0));
    }

    let (sin_a, cos_a) = angle.sin_cos();
    let mut entered = false;
    let mut step: u64 = 0;

    loop {
        let depth = step as f32 * step_size;
        if depth >= max_depth {
            break;
        }
        let px = origin_x - sin_a * depth;
        let py = origin_y + cos_a * depth;

        match map.cell_of(px, py) {
            Some((row, col)) => {
                entered = true;
                if map.is_wall_at(row, col) {
                    return RayHit {
                        depth,
                        cell: Some((row, col)),
                        endpoint: (px, py),
                    };
                }
            }
            None if entered => break,
            None => {}
        }
        step += 1;
    }

    RayHit::miss(origin_x, origin_y, angle, max_depth)
}

/// Walks the ray cell by cell and reports the exact distance to the first
/// wall boundary it crosses.
pub fn cast_exact(
    map: &GridMap,
    origin_x: f32,
    origin_y: f32,
    angle: f32,
    max_depth: f32,
) -> RayHit {
    if !(max_depth > 0.0) {
        return RayHit::miss(origin_x, origin_y, angle, 0.0);
    }

    let cell_size = map.cell_size;
    let (sin_a, cos_a) = angle.sin_cos();
    // Direction and origin in cell units.
    let dir_x = -sin_a;
    let dir_y = cos_a;
    let ox = origin_x / cell_size;
    let oy = origin_y / cell_size;
    let max_t = max_depth / cell_size;

    let mut map_x = ox.floor() as i64;
    let mut map_y = oy.floor() as i64;

    let in_bounds = |x: i64, y: i64| {
        x >= 0 && y >= 0 && (x as usize) < map.width && (y as usize) < map.height
    };

    if in_bounds(map_x, map_y) && map.is_wall_at(map_y as usize, map_x as usize) {
        return RayHit {
            depth: 0.0,
            cell: Some((map_y as usize, map_x as usize)),
            endpoint: (origin_x, origin_y),
        };
    }

    let step_x: i64 = if dir_x > 0.0 { 1 } else { -1 };
    let step_y: i64 = if dir_y > 0.0 { 1 } else { -1 };

    let t_delta_x = if dir_x.abs() < 1e-6 {
        f32::INFINITY
    } else {
        (1.0 / dir_x).abs()
    };
    let t_delta_y = if dir_y.abs() < 1e-6 {
        f32::INFINITY
    } else {
        (1.0 / dir_y).abs()
    };

    let mut t_max_x = if dir_x.abs() < 1e-6 {
        f32::INFINITY
    } else if dir_x > 0.0 {
        ((map_x as f32 + 1.0) - ox) / dir_x
    } else {
        (map_x as f32 - ox) / dir_x
    };
    let mut t_max_y = if dir_y.abs() < 1e-6 {
        f32::INFINITY
    } else if dir_y > 0.0 {
        ((map_y as f32 + 1.0) - oy) / dir_y
    } else {
        (map_y as f32 - oy) / dir_y
    };

    let mut entered = in_bounds(map_x, map_y);

    loop {
        let t_boundary;
        if t_max_x < t_max_y {
            t_boundary = t_max_x;
            map_x += step_x;
            t_max_x += t_delta_x;
        } else {
            t_boundary = t_max_y;
            map_y += step_y;
            t_max_y += t_delta_y;
        }

        if !(t_boundary < max_t) {
            break;
        }

        if !in_bounds(map_x, map_y) {
            if entered {
                break;
            }
            continue;
        }
        entered = true;

        if map.is_wall_at(map_y as usize, map_x as usize) {
            let depth = t_boundary * cell_size;
            return RayHit {
                depth,
                cell: Some((map_y as usize, map_x as usize)),
                endpoint: point_along(origin_x, origin_y, angle, depth),
            };
        }
    }

    RayHit::miss(origin_x, origin_y, angle, max_depth)
}
