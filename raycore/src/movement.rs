use crate::grid::GridMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Walk {
    #[default]
    Still,
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Turn {
    #[default]
    None,
    Left,
    Right,
}

/// Position and facing of the observer in world units.
///
/// The angle is never normalised; it wraps through the trig functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
}

impl Viewpoint {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self { x, y, angle }
    }

    /// Unit vector the viewpoint looks along.
    #[inline(always)]
    pub fn facing(&self) -> (f32, f32) {
        let (sin_a, cos_a) = self.angle.sin_cos();
        (-sin_a, cos_a)
    }

    pub fn turned(&self, turn: Turn, sensitivity: f32) -> Self {
        let delta = match turn {
            Turn::None => 0.0,
            Turn::Left => -sensitivity,
            Turn::Right => sensitivity,
        };
        Self {
            angle: self.angle + delta,
            ..*self
        }
    }

    /// Moves along the facing vector; strafing is not modelled.
    pub fn walked(&self, walk: Walk, distance: f32) -> Self {
        let sign = match walk {
            Walk::Still => return *self,
            Walk::Forward => 1.0,
            Walk::Backward => -1.0,
        };
        let (fx, fy) = self.facing();
        Self {
            x: self.x + fx * distance * sign,
            y: self.y + fy * distance * sign,
            angle: self.angle,
        }
    }

    /// Axis-aligned move that ignores the facing.
    pub fn nudged(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            angle: self.angle,
        }
    }
}

/// True when the viewpoint's cell is a wall. Positions off the grid are not.
pub fn is_inside_wall(map: &GridMap, viewpoint: &Viewpoint) -> bool {
    match map.cell_of(viewpoint.x, viewpoint.y) {
        Some((row, col)) => map.is_wall_at(row, col),
        None => false,
    }
}

/// Accepts the attempted move unless it ends inside a wall, in which case the
/// position reverts to `from`. The attempted facing is always kept.
///
/// Only the destination cell is checked; fast moves can pass through thin
/// walls.
pub fn resolve_move(map: &GridMap, from: &Viewpoint, to: &Viewpoint) -> Viewpoint {
    if is_inside_wall(map, to) {
        Viewpoint {
            angle: to.angle,
            ..*from
        }
    } else {
        *to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_facing_vector() {
        let (fx, fy) = Viewpoint::new(0.0, 0.0, 0.0).facing();
        assert!(close(fx, 0.0) && close(fy, 1.0));
        let (fx, fy) = Viewpoint::new(0.0, 0.0, FRAC_PI_2).facing();
        assert!(close(fx, -1.0) && close(fy, 0.0));
        let (fx, fy) = Viewpoint::new(0.0, 0.0, PI).facing();
        assert!(close(fx, 0.0) && close(fy, -1.0));
    }

    #[test]
    fn test_walk_forward_and_back() {
        let start = Viewpoint::new(240.0, 240.0, PI);
        let ahead = start.walked(Walk::Forward, 2.0);
        assert!(close(ahead.x, 240.0) && close(ahead.y, 238.0), "{:?}", ahead);
        let back = ahead.walked(Walk::Backward, 2.0);
        assert!(close(back.x, start.x) && close(back.y, start.y), "{:?}", back);
        assert_eq!(start.walked(Walk::Still, 2.0), start);
    }

    #[test]
    fn test_turning() {
        let start = Viewpoint::new(0.0, 0.0, 1.0);
        assert!(close(start.turned(Turn::Left, 0.1).angle, 0.9));
        assert!(close(start.turned(Turn::Right, 0.1).angle, 1.1));
        assert_eq!(start.turned(Turn::None, 0.1), start);
    }

    #[test]
    fn test_nudge_ignores_facing() {
        let moved = Viewpoint::new(10.0, 10.0, 2.0).nudged(-0.4, 0.4);
        assert!(close(moved.x, 9.6) && close(moved.y, 10.4));
        assert_eq!(moved.angle, 2.0);
    }

    #[test]
    fn test_inside_wall() {
        let map = GridMap::bordered(8, 8, 60.0);
        assert!(is_inside_wall(&map, &Viewpoint::new(30.0, 240.0, 0.0)));
        assert!(!is_inside_wall(&map, &Viewpoint::new(240.0, 240.0, 0.0)));
        assert!(
            !is_inside_wall(&map, &Viewpoint::new(-10.0, 240.0, 0.0)),
            "off-grid positions are not walls"
        );
    }

    #[test]
    fn test_resolve_move_reverts_into_wall() {
        let map = GridMap::bordered(8, 8, 60.0);
        let from = Viewpoint::new(90.0, 240.0, FRAC_PI_2);
        let to = from.walked(Walk::Forward, 40.0);
        assert!(is_inside_wall(&map, &to));
        let resolved = resolve_move(&map, &from, &to);
        assert_eq!(resolved, from);
    }

    #[test]
    fn test_resolve_move_keeps_attempted_turn() {
        let map = GridMap::bordered(8, 8, 60.0);
        let from = Viewpoint::new(90.0, 240.0, FRAC_PI_2);
        let to = from.turned(Turn::Right, 0.1).walked(Walk::Forward, 40.0);
        let resolved = resolve_move(&map, &from, &to);
        assert_eq!((resolved.x, resolved.y), (from.x, from.y));
        assert!(close(resolved.angle, FRAC_PI_2 + 0.1));
    }

    #[test]
    fn test_resolve_move_accepts_open_cell() {
        let mut map = GridMap::bordered(8, 8, 60.0);
        map.set_cell(3, 3, Cell::Empty);
        let from = Viewpoint::new(240.0, 240.0, 0.0);
        let to = from.walked(Walk::Forward, 2.0);
        assert_eq!(resolve_move(&map, &from, &to), to);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let map = GridMap::bordered(8, 8, 60.0);
        let from = Viewpoint::new(90.0, 240.0, FRAC_PI_2);
        let to = from.walked(Walk::Forward, 40.0);
        let once = resolve_move(&map, &from, &to);
        // Second pass with no new input: nothing attempted.
        let twice = resolve_move(&map, &once, &once);
        assert_eq!(once, twice);
    }
}
