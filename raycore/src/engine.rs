use serde::Deserialize;
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use crate::canvas::{Canvas, FrameInput, Rgb};
use crate::config::EngineConfig;
use crate::grid::{Cell, GridMap};
use crate::movement::{Viewpoint, resolve_move};
use crate::projection::Projection;
use crate::ray::RayHit;

// Free-aim palette
const AIM_BACKGROUND: Rgb = Rgb::WHITE;
const AIM_EMPTY: Rgb = Rgb::BLACK;
const AIM_WALL: Rgb = Rgb(0, 0, 255);
const AIM_LINE: Rgb = Rgb::WHITE;
const AIM_SOURCE: Rgb = Rgb(255, 0, 0);
const AIM_TARGET: Rgb = Rgb(0, 255, 0);
const AIM_HIT: Rgb = Rgb(50, 255, 50);
const AIM_MARKER_RADIUS: f32 = 7.0;
const AIM_LINE_THICKNESS: f32 = 3.0;

// Fan palette
const FAN_BACKGROUND: Rgb = Rgb::BLACK;
const FAN_WALL: Rgb = Rgb::gray(200);
const FAN_EMPTY: Rgb = Rgb::gray(100);
const FAN_RAY: Rgb = Rgb(50, 255, 50);
const FAN_VIEWPOINT: Rgb = Rgb(255, 50, 50);
const FAN_VIEWPOINT_RADIUS: f32 = 8.0;
const FAN_RAY_THICKNESS: f32 = 3.0;
const FLOOR_COLOR: Rgb = Rgb::gray(100);
const CEILING_COLOR: Rgb = Rgb::gray(200);

/// Which view the engine casts and draws.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// One ray from a movable source toward the pointer; walls can be painted.
    FreeAim,
    /// Fan of rays drawn over the map.
    TopDown,
    /// Fan of rays projected as shaded wall slices next to the map.
    #[default]
    FirstPerson,
}

impl RenderMode {
    pub fn all() -> &'static [RenderMode] {
        &[
            RenderMode::FreeAim,
            RenderMode::TopDown,
            RenderMode::FirstPerson,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RenderMode::FreeAim => "Free aim",
            RenderMode::TopDown => "Top-down",
            RenderMode::FirstPerson => "First person",
        }
    }

    pub fn resolves_collisions(&self) -> bool {
        matches!(self, RenderMode::FirstPerson)
    }

    /// Fraction of the screen width given to the map.
    pub fn map_area_fraction(&self) -> f32 {
        match self {
            RenderMode::FreeAim => 1.0,
            RenderMode::TopDown | RenderMode::FirstPerson => 0.5,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderMode::FreeAim => "free-aim",
            RenderMode::TopDown => "top-down",
            RenderMode::FirstPerson => "first-person",
        };
        f.write_str(name)
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free-aim" | "freeaim" | "aim" => Ok(RenderMode::FreeAim),
            "top-down" | "topdown" | "2d" => Ok(RenderMode::TopDown),
            "first-person" | "firstperson" | "3d" => Ok(RenderMode::FirstPerson),
            other => Err(format!(
                "unknown mode '{}' (expected free-aim, top-down or first-person)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Owns the map and viewpoint and drives one tick at a time.
pub struct Engine {
    config: EngineConfig,
    pub map: GridMap,
    pub viewpoint: Viewpoint,
    /// Free-aim target in world units.
    pub target: (f32, f32),
    pub aim_enabled: bool,
    screen_width: f32,
    screen_height: f32,
    /// (angle offset, hit) for every ray cast this tick.
    rays: Vec<(f32, RayHit)>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        map: GridMap,
        viewpoint: Viewpoint,
        screen_width: f32,
        screen_height: f32,
    ) -> Self {
        let (map_w, map_h) = map.world_size();
        let mut engine = Self {
            config,
            map,
            viewpoint,
            target: (map_w / 2.0, map_h / 4.0),
            aim_enabled: false,
            screen_width,
            screen_height,
            rays: Vec::new(),
        };
        engine.cast_rays();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mode(&self) -> RenderMode {
        self.config.mode
    }

    pub fn rays(&self) -> &[(f32, RayHit)] {
        &self.rays
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.config.mode = mode;
        self.cast_rays();
    }

    pub fn set_ray_count(&mut self, ray_count: usize) {
        self.config.ray_count = ray_count.max(1);
        self.cast_rays();
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.config.fov = fov.clamp(0.01, std::f32::consts::PI - 0.01);
        self.cast_rays();
    }

    pub fn set_marcher(&mut self, marcher: crate::ray::Marcher) {
        self.config.marcher = marcher;
        self.cast_rays();
    }

    /// Longest map side unless configured otherwise.
    pub fn max_depth(&self) -> f32 {
        self.config.max_depth.unwrap_or_else(|| {
            let (w, h) = self.map.world_size();
            w.max(h)
        })
    }

    pub fn projection(&self) -> Projection {
        Projection {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            ray_count: self.config.ray_count,
            k: self.config.projection.k,
            epsilon: self.config.projection.epsilon,
            max_slice_height: self
                .config
                .projection
                .max_slice_height
                .unwrap_or(self.screen_width),
        }
    }

    /// Screen pixels per world unit for the top-down map. The map shrinks to
    /// fit the current mode's map area and is never enlarged.
    pub fn map_scale(&self) -> f32 {
        let (map_w, map_h) = self.map.world_size();
        let area_w = self.screen_width * self.config.mode.map_area_fraction();
        (area_w / map_w).min(self.screen_height / map_h).min(1.0)
    }

    #[inline(always)]
    fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        let scale = self.map_scale();
        (x * scale, y * scale)
    }

    fn to_world(&self, pos: (f32, f32)) -> (f32, f32) {
        let scale = self.map_scale();
        (pos.0 / scale, pos.1 / scale)
    }

    /// Offset of ray `index` from the facing direction.
    pub fn ray_offset(&self, index: usize) -> f32 {
        let fov = self.config.fov;
        -fov / 2.0 + index as f32 * (fov / self.config.ray_count as f32)
    }

    /// Applies one tick of input. Nothing changes once quit is requested.
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> TickOutcome {
        if input.quit {
            return TickOutcome::Quit;
        }

        let scale = self.config.tick_scale(dt);
        match self.config.mode {
            RenderMode::FreeAim => {
                if input.toggle_aim {
                    self.aim_enabled = !self.aim_enabled;
                }
                let speed = self.config.move_speed * scale;
                self.viewpoint = self
                    .viewpoint
                    .nudged(input.nudge.0 * speed, input.nudge.1 * speed);
                self.target = self.to_world(input.pointer);
                if let Some(cell) = input.paint {
                    self.paint_at(self.target, cell);
                }
            }
            RenderMode::TopDown | RenderMode::FirstPerson => {
                let turned = self
                    .viewpoint
                    .turned(input.turn, self.config.turn_sensitivity * scale);
                let moved = turned.walked(input.walk, self.config.move_speed * scale);
                self.viewpoint = if self.config.mode.resolves_collisions() {
                    resolve_move(&self.map, &turned, &moved)
                } else {
                    moved
                };
            }
        }

        self.cast_rays();
        TickOutcome::Continue
    }

    /// Sets the cell under a world position. Returns false off the grid.
    pub fn paint_at(&mut self, pos: (f32, f32), cell: Cell) -> bool {
        match self.map.cell_of(pos.0, pos.1) {
            Some((row, col)) => self.map.set_cell(row, col, cell),
            None => false,
        }
    }

    /// Update followed by render; the caller presents the frame.
    pub fn tick<C: Canvas>(&mut self, input: &FrameInput, dt: f32, canvas: &mut C) -> TickOutcome {
        let outcome = self.update(input, dt);
        if outcome == TickOutcome::Continue {
            self.render(canvas);
        }
        outcome
    }

    fn cast_rays(&mut self) {
        self.rays.clear();
        let marcher = self.config.marcher;
        let step = self.config.step_size;
        let vp = self.viewpoint;

        match self.config.mode {
            RenderMode::FreeAim => {
                if !self.aim_enabled {
                    return;
                }
                let dx = self.target.0 - vp.x;
                let dy = self.target.1 - vp.y;
                let angle = dy.atan2(dx) - FRAC_PI_2;
                let max_depth = (dx * dx + dy * dy).sqrt();
                let hit = marcher.cast(&self.map, vp.x, vp.y, angle, max_depth, step);
                self.rays.push((0.0, hit));
            }
            RenderMode::TopDown | RenderMode::FirstPerson => {
                let max_depth = self.max_depth();
                for i in 0..self.config.ray_count {
                    let offset = self.ray_offset(i);
                    let hit =
                        marcher.cast(&self.map, vp.x, vp.y, vp.angle + offset, max_depth, step);
                    self.rays.push((offset, hit));
                }
            }
        }
    }

    pub fn render<C: Canvas>(&self, canvas: &mut C) {
        match self.config.mode {
            RenderMode::FreeAim => self.render_free_aim(canvas),
            RenderMode::TopDown => {
                canvas.clear(FAN_BACKGROUND);
                self.draw_fan_map(canvas);
                self.draw_fan_rays(canvas);
            }
            RenderMode::FirstPerson => {
                canvas.clear(FAN_BACKGROUND);
                self.draw_backdrop(canvas);
                self.draw_fan_map(canvas);
                self.draw_fan_rays(canvas);
                self.draw_slices(canvas);
            }
        }
    }

    fn draw_cells<C: Canvas>(&self, canvas: &mut C, wall: Rgb, empty: Rgb) {
        let size = self.map.cell_size * self.map_scale();
        for (row, col, cell) in self.map.cells() {
            let color = match cell {
                Cell::Wall => wall,
                Cell::Empty => empty,
            };
            canvas.fill_rect(col as f32 * size, row as f32 * size, size - 1.0, size - 1.0, color);
        }
    }

    fn render_free_aim<C: Canvas>(&self, canvas: &mut C) {
        canvas.clear(AIM_BACKGROUND);
        self.draw_cells(canvas, AIM_WALL, AIM_EMPTY);

        let (source_x, source_y) = self.to_screen(self.viewpoint.x, self.viewpoint.y);
        let (target_x, target_y) = self.to_screen(self.target.0, self.target.1);
        if self.aim_enabled {
            canvas.line(
                source_x,
                source_y,
                target_x,
                target_y,
                AIM_LINE,
                AIM_LINE_THICKNESS,
            );
        }
        canvas.fill_circle(source_x, source_y, AIM_MARKER_RADIUS, AIM_SOURCE);
        canvas.fill_circle(target_x, target_y, AIM_MARKER_RADIUS, AIM_TARGET);

        for (_, hit) in self.rays.iter().filter(|(_, hit)| hit.is_hit()) {
            let (hit_x, hit_y) = self.to_screen(hit.endpoint.0, hit.endpoint.1);
            canvas.fill_circle(hit_x, hit_y, AIM_MARKER_RADIUS, AIM_HIT);
        }
    }

    fn draw_backdrop<C: Canvas>(&self, canvas: &mut C) {
        let half_w = (self.screen_width / 2.0).floor();
        let half_h = (self.screen_height / 2.0).floor();
        canvas.fill_rect(half_w, half_h, half_w, self.screen_height, FLOOR_COLOR);
        canvas.fill_rect(half_w, -half_h, half_w, self.screen_height, CEILING_COLOR);
    }

    fn draw_fan_map<C: Canvas>(&self, canvas: &mut C) {
        self.draw_cells(canvas, FAN_WALL, FAN_EMPTY);
        let (x, y) = self.to_screen(self.viewpoint.x, self.viewpoint.y);
        canvas.fill_circle(x, y, FAN_VIEWPOINT_RADIUS, FAN_VIEWPOINT);
    }

    fn draw_fan_rays<C: Canvas>(&self, canvas: &mut C) {
        let size = self.map.cell_size * self.map_scale();
        let (vp_x, vp_y) = self.to_screen(self.viewpoint.x, self.viewpoint.y);
        for (_, hit) in &self.rays {
            if let Some((row, col)) = hit.cell {
                canvas.fill_rect(
                    col as f32 * size,
                    row as f32 * size,
                    size - 2.0,
                    size - 2.0,
                    FAN_RAY,
                );
            }
            let (end_x, end_y) = self.to_screen(hit.endpoint.0, hit.endpoint.1);
            canvas.line(vp_x, vp_y, end_x, end_y, FAN_RAY, FAN_RAY_THICKNESS);
        }
    }

    fn draw_slices<C: Canvas>(&self, canvas: &mut C) {
        let projection = self.projection();
        for (column, (offset, hit)) in self.rays.iter().enumerate() {
            if !hit.is_hit() {
                continue;
            }
            let slice = projection.project(column, *offset, hit);
            let (x, y, w, h) = projection.slice_rect(&slice);
            canvas.fill_rect(x, y, w, h, Rgb::gray(slice.shade));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{Turn, Walk};
    use crate::ray::Marcher;
    use std::f32::consts::PI;

    #[derive(Debug, Clone, PartialEq)]
    enum DrawCmd {
        Clear(Rgb),
        Rect(f32, f32, f32, f32, Rgb),
        Line(f32, f32, f32, f32, Rgb),
        Circle(f32, f32, f32, Rgb),
    }

    #[derive(Default)]
    struct RecordingCanvas {
        cmds: Vec<DrawCmd>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, color: Rgb) {
            self.cmds.push(DrawCmd::Clear(color));
        }
        fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
            self.cmds.push(DrawCmd::Rect(x, y, width, height, color));
        }
        fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, _thickness: f32) {
            self.cmds.push(DrawCmd::Line(x1, y1, x2, y2, color));
        }
        fn fill_circle(&mut self, center_x: f32, center_y: f32, radius: f32, color: Rgb) {
            self.cmds.push(DrawCmd::Circle(center_x, center_y, radius, color));
        }
    }

    fn fixed_step_config(mode: RenderMode) -> EngineConfig {
        EngineConfig {
            mode,
            frame_time_scaled: false,
            ..Default::default()
        }
    }

    fn bordered_engine(mode: RenderMode) -> Engine {
        Engine::new(
            fixed_step_config(mode),
            GridMap::bordered(8, 8, 60.0),
            Viewpoint::new(240.0, 240.0, PI),
            960.0,
            480.0,
        )
    }

    #[test]
    fn test_fan_is_spread_over_fov() {
        let engine = bordered_engine(RenderMode::TopDown);
        let rays = engine.rays();
        assert_eq!(rays.len(), 30);
        let half_fov = engine.config().fov / 2.0;
        assert!((rays[0].0 + half_fov).abs() < 1e-6);
        let step = engine.config().fov / 30.0;
        for pair in rays.windows(2) {
            assert!((pair[1].0 - pair[0].0 - step).abs() < 1e-5);
        }
        assert!(rays.iter().all(|(offset, _)| offset.abs() <= half_fov));
        assert!(rays.iter().all(|(_, hit)| hit.is_hit()), "bordered map stops every ray");
    }

    #[test]
    fn test_first_person_draws_one_slice_per_hit() {
        let engine = bordered_engine(RenderMode::FirstPerson);
        let mut canvas = RecordingCanvas::default();
        engine.render(&mut canvas);

        assert_eq!(canvas.cmds[0], DrawCmd::Clear(Rgb::BLACK));
        let right_half_rects = canvas
            .cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Rect(x, ..) if *x >= 480.0))
            .count();
        // Floor and ceiling plus one slice per ray.
        assert_eq!(right_half_rects, 2 + 30);

        let lines = canvas
            .cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Line(..)))
            .count();
        assert_eq!(lines, 30);
    }

    #[test]
    fn test_top_down_draws_no_slices() {
        let engine = bordered_engine(RenderMode::TopDown);
        let mut canvas = RecordingCanvas::default();
        engine.render(&mut canvas);
        assert!(
            !canvas
                .cmds
                .iter()
                .any(|cmd| matches!(cmd, DrawCmd::Rect(x, ..) if *x >= 480.0)),
            "top-down view keeps to the map area"
        );
    }

    #[test]
    fn test_quit_leaves_state_untouched() {
        let mut engine = bordered_engine(RenderMode::FirstPerson);
        let before = engine.viewpoint;
        let input = FrameInput {
            quit: true,
            walk: Walk::Forward,
            ..Default::default()
        };
        let mut canvas = RecordingCanvas::default();
        assert_eq!(engine.tick(&input, 1.0 / 60.0, &mut canvas), TickOutcome::Quit);
        assert_eq!(engine.viewpoint, before);
        assert!(canvas.cmds.is_empty(), "no frame is drawn after quit");
    }

    #[test]
    fn test_turn_then_walk() {
        let mut engine = bordered_engine(RenderMode::TopDown);
        let input = FrameInput {
            turn: Turn::Right,
            walk: Walk::Forward,
            ..Default::default()
        };
        engine.update(&input, 1.0 / 60.0);
        let angle = PI + 0.1;
        assert!((engine.viewpoint.angle - angle).abs() < 1e-5);
        assert!((engine.viewpoint.x - (240.0 - angle.sin() * 2.0)).abs() < 1e-3);
        assert!((engine.viewpoint.y - (240.0 + angle.cos() * 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_first_person_reverts_move_into_wall() {
        let mut engine = Engine::new(
            EngineConfig {
                move_speed: 40.0,
                ..fixed_step_config(RenderMode::FirstPerson)
            },
            GridMap::bordered(8, 8, 60.0),
            Viewpoint::new(240.0, 90.0, PI),
            960.0,
            480.0,
        );
        let input = FrameInput {
            walk: Walk::Forward,
            ..Default::default()
        };
        engine.update(&input, 1.0 / 60.0);
        assert_eq!((engine.viewpoint.x, engine.viewpoint.y), (240.0, 90.0));

        // No new input: the viewpoint stays put.
        engine.update(&FrameInput::default(), 1.0 / 60.0);
        assert_eq!((engine.viewpoint.x, engine.viewpoint.y), (240.0, 90.0));
    }

    #[test]
    fn test_top_down_ignores_collisions() {
        let mut engine = Engine::new(
            EngineConfig {
                move_speed: 40.0,
                ..fixed_step_config(RenderMode::TopDown)
            },
            GridMap::bordered(8, 8, 60.0),
            Viewpoint::new(240.0, 90.0, PI),
            960.0,
            480.0,
        );
        let input = FrameInput {
            walk: Walk::Forward,
            ..Default::default()
        };
        engine.update(&input, 1.0 / 60.0);
        assert!((engine.viewpoint.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_time_scaled_walk() {
        let mut engine = Engine::new(
            EngineConfig::default(),
            GridMap::bordered(8, 8, 60.0),
            Viewpoint::new(240.0, 240.0, PI),
            960.0,
            480.0,
        );
        let input = FrameInput {
            walk: Walk::Forward,
            ..Default::default()
        };
        // Half the reference rate moves twice as far per tick.
        engine.update(&input, 1.0 / 30.0);
        assert!((engine.viewpoint.y - 236.0).abs() < 1e-3, "{:?}", engine.viewpoint);
    }

    #[test]
    fn test_free_aim_paint_then_hit() {
        let mut engine = Engine::new(
            fixed_step_config(RenderMode::FreeAim),
            GridMap::open(10, 10, 60.0),
            Viewpoint::new(300.0, 330.0, 0.0),
            600.0,
            600.0,
        );
        assert!(engine.rays().is_empty(), "aim line starts disabled");

        let aim = FrameInput {
            pointer: (90.0, 330.0),
            toggle_aim: true,
            ..Default::default()
        };
        engine.update(&aim, 1.0 / 60.0);
        assert!(engine.aim_enabled);
        assert_eq!(engine.rays().len(), 1);
        assert!(!engine.rays()[0].1.is_hit());

        let paint = FrameInput {
            pointer: (90.0, 330.0),
            paint: Some(Cell::Wall),
            ..Default::default()
        };
        engine.update(&paint, 1.0 / 60.0);
        let hit = engine.rays()[0].1;
        assert_eq!(hit.cell, Some((5, 1)));
        assert!((hit.depth - 180.5).abs() <= 1.0, "depth was {}", hit.depth);

        let mut canvas = RecordingCanvas::default();
        engine.render(&mut canvas);
        assert_eq!(canvas.cmds[0], DrawCmd::Clear(Rgb::WHITE));
        assert!(canvas.cmds.contains(&DrawCmd::Rect(60.0, 300.0, 59.0, 59.0, AIM_WALL)));
        assert!(
            canvas
                .cmds
                .iter()
                .any(|cmd| matches!(cmd, DrawCmd::Circle(_, _, _, color) if *color == AIM_HIT))
        );
    }

    #[test]
    fn test_free_aim_nudge_without_collision() {
        let mut engine = Engine::new(
            EngineConfig {
                move_speed: 0.4,
                ..fixed_step_config(RenderMode::FreeAim)
            },
            GridMap::bordered(10, 10, 60.0),
            Viewpoint::new(62.0, 300.0, 0.0),
            600.0,
            600.0,
        );
        let input = FrameInput {
            nudge: (-1.0, 0.0),
            ..Default::default()
        };
        for _ in 0..10 {
            engine.update(&input, 1.0 / 60.0);
        }
        assert!((engine.viewpoint.x - 58.0).abs() < 1e-3, "free-aim source walks into walls");
    }

    #[test]
    fn test_paint_outside_grid_is_rejected() {
        let mut engine = bordered_engine(RenderMode::FreeAim);
        assert!(!engine.paint_at((700.0, 10.0), Cell::Wall));
        assert!(engine.paint_at((100.0, 100.0), Cell::Wall));
        assert!(engine.map.is_wall_at(1, 1));
    }

    #[test]
    fn test_runtime_switches_recast() {
        let mut engine = bordered_engine(RenderMode::TopDown);
        engine.set_ray_count(12);
        assert_eq!(engine.rays().len(), 12);
        engine.set_ray_count(0);
        assert_eq!(engine.rays().len(), 1);

        engine.set_marcher(Marcher::Grid);
        assert!(engine.rays().iter().all(|(_, hit)| hit.is_hit()));

        engine.set_mode(RenderMode::FreeAim);
        assert!(engine.rays().is_empty());
    }

    #[test]
    fn test_switch_to_first_person_shrinks_map_to_left_half() {
        // Laid out for free-aim: the map fills the whole 600x600 window.
        let mut engine = Engine::new(
            fixed_step_config(RenderMode::FreeAim),
            GridMap::bordered(10, 10, 60.0),
            Viewpoint::new(300.0, 300.0, 0.0),
            600.0,
            600.0,
        );
        assert_eq!(engine.map_scale(), 1.0);

        engine.set_mode(RenderMode::FirstPerson);
        assert_eq!(engine.map_scale(), 0.5);
        assert!(engine.rays().iter().all(|(_, hit)| hit.is_hit()));

        let mut canvas = RecordingCanvas::default();
        engine.render(&mut canvas);

        let cells: Vec<_> = canvas
            .cmds
            .iter()
            .filter(|cmd| matches!(cmd, DrawCmd::Rect(_, _, w, ..) if *w == 29.0))
            .collect();
        assert_eq!(cells.len(), 100, "one rect per map cell");
        for cmd in cells {
            if let DrawCmd::Rect(x, y, w, h, _) = cmd {
                assert!(x + w <= 300.0, "map cell at x {} overlaps the projection", x);
                assert!(y + h <= 600.0);
            }
        }
        for cmd in &canvas.cmds {
            match cmd {
                DrawCmd::Line(x1, _, x2, _, _) => assert!(*x1 <= 300.0 && *x2 <= 300.0),
                DrawCmd::Circle(x, y, _, _) => assert_eq!((*x, *y), (150.0, 150.0)),
                _ => {}
            }
        }

        // World coordinates are untouched by the switch.
        assert_eq!((engine.viewpoint.x, engine.viewpoint.y), (300.0, 300.0));
        assert_eq!(engine.map.cell_size, 60.0);
    }

    #[test]
    fn test_free_aim_pointer_maps_back_to_world() {
        // A first-person layout shown in free-aim keeps its scale.
        let mut engine = bordered_engine(RenderMode::FirstPerson);
        engine.set_mode(RenderMode::FreeAim);
        assert_eq!(engine.map_scale(), 1.0);

        // Map wider than its area: screen positions are scaled back up.
        let mut wide = Engine::new(
            fixed_step_config(RenderMode::FreeAim),
            GridMap::open(20, 20, 60.0),
            Viewpoint::new(600.0, 600.0, 0.0),
            600.0,
            600.0,
        );
        assert_eq!(wide.map_scale(), 0.5);
        let input = FrameInput {
            pointer: (100.0, 50.0),
            paint: Some(Cell::Wall),
            ..Default::default()
        };
        wide.update(&input, 1.0 / 60.0);
        assert_eq!(wide.target, (200.0, 100.0));
        assert!(wide.map.is_wall_at(1, 3));
    }

    #[test]
    fn test_stalled_frame_cannot_tunnel_through_wall() {
        // One-cell wall 30 units ahead; a one-second frame must not carry
        // the viewpoint past it.
        let mut map = GridMap::open(8, 8, 60.0);
        for col in 0..8 {
            map.set_cell(2, col, Cell::Wall);
        }
        let mut engine = Engine::new(
            EngineConfig::default(),
            map,
            Viewpoint::new(240.0, 90.0, 0.0),
            960.0,
            480.0,
        );
        let input = FrameInput {
            walk: Walk::Forward,
            ..Default::default()
        };
        engine.update(&input, 1.0);
        assert!((engine.viewpoint.y - 102.0).abs() < 1e-3, "{:?}", engine.viewpoint);

        for _ in 0..10 {
            engine.update(&input, 1.0);
        }
        assert!(engine.viewpoint.y < 120.0, "walked through the wall: {:?}", engine.viewpoint);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("free-aim".parse::<RenderMode>(), Ok(RenderMode::FreeAim));
        assert_eq!("2D".parse::<RenderMode>(), Ok(RenderMode::TopDown));
        assert_eq!("first-person".parse::<RenderMode>(), Ok(RenderMode::FirstPerson));
        assert!("sideways".parse::<RenderMode>().is_err());
        for mode in RenderMode::all() {
            assert_eq!(mode.to_string().parse::<RenderMode>(), Ok(*mode));
        }
    }
}
