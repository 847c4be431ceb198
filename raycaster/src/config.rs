use anyhow::{Context, Result, bail};
use macroquad::prelude::Conf;
use raycore::{EngineConfig, GridMap, RenderMode, Viewpoint, is_inside_wall};
use serde::Deserialize;
use std::f32::consts::PI;
use std::path::Path;

// Window constants
pub const DEFAULT_WINDOW_WIDTH: u32 = 960;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 480;
pub const FREE_AIM_WINDOW_SIZE: u32 = 600;
pub const DEFAULT_WINDOW_TITLE: &str = "Raycasting";

// Built-in layouts
pub const FREE_AIM_MAP_SIZE: usize = 10;
pub const TOP_DOWN_LAYOUT: [&str; 8] = [
    "11111111", "1..1...1", "1..1...1", "1....111", "1......1", "1...1..1", "1...1..1",
    "11111111",
];
pub const FIRST_PERSON_LAYOUT: [&str; 8] = [
    "11111111", "1..1...1", "1......1", "111..111", "111....1", "1...1..1", "1...1..1",
    "11111111",
];

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl WindowConfig {
    pub fn default_for(mode: RenderMode) -> Self {
        let (width, height) = match mode {
            RenderMode::FreeAim => (FREE_AIM_WINDOW_SIZE, FREE_AIM_WINDOW_SIZE),
            RenderMode::TopDown | RenderMode::FirstPerson => {
                (DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
            }
        };
        Self {
            width,
            height,
            title: DEFAULT_WINDOW_TITLE.to_owned(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::default_for(RenderMode::FirstPerson)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: Option<f32>, // Defaults to what fits the map area
    pub layout: Vec<String>,
    pub spawn: Option<[f32; 2]>, // Defaults to the map centre
    #[serde(default)]
    pub angle: f32,
}

impl MapConfig {
    pub fn default_for(mode: RenderMode) -> Self {
        match mode {
            RenderMode::FreeAim => Self {
                width: FREE_AIM_MAP_SIZE,
                height: FREE_AIM_MAP_SIZE,
                cell_size: None,
                layout: vec![".".repeat(FREE_AIM_MAP_SIZE); FREE_AIM_MAP_SIZE],
                spawn: None,
                angle: 0.0,
            },
            RenderMode::TopDown => Self::from_rows(&TOP_DOWN_LAYOUT, PI),
            RenderMode::FirstPerson => Self::from_rows(&FIRST_PERSON_LAYOUT, PI),
        }
    }

    fn from_rows(rows: &[&str], angle: f32) -> Self {
        Self {
            width: rows.first().map_or(0, |row| row.len()),
            height: rows.len(),
            cell_size: None,
            layout: rows.iter().map(|row| row.to_string()).collect(),
            spawn: None,
            angle,
        }
    }
}

/// Everything read from the TOML file. Missing sections fall back to the
/// defaults of the selected mode.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AppConfig {
    pub window: Option<WindowConfig>,
    #[serde(default)]
    pub engine: EngineConfig,
    pub map: Option<MapConfig>,
}

/// Validated settings the application starts from.
pub struct Startup {
    pub window: WindowConfig,
    pub engine: EngineConfig,
    pub map: GridMap,
    pub viewpoint: Viewpoint,
}

impl AppConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(&mut self, mode: Option<RenderMode>, rays: Option<usize>) {
        if let Some(mode) = mode {
            self.engine.mode = mode;
        }
        if let Some(rays) = rays {
            self.engine.ray_count = rays;
        }
    }

    /// Validates the configuration and builds the map and viewpoint.
    pub fn resolve(self) -> Result<Startup> {
        let mode = self.engine.mode;
        self.engine.validate().context("invalid [engine] settings")?;

        let window = self.window.unwrap_or_else(|| WindowConfig::default_for(mode));
        if window.width == 0 || window.height == 0 {
            bail!("window size must be at least 1x1");
        }
        let map_config = self.map.unwrap_or_else(|| MapConfig::default_for(mode));
        if map_config.width == 0 || map_config.height == 0 {
            bail!("map dimensions must be at least 1x1");
        }

        let cell_size = map_config.cell_size.unwrap_or_else(|| {
            let area_width = window.width as f32 * mode.map_area_fraction();
            (area_width / map_config.width as f32)
                .min(window.height as f32 / map_config.height as f32)
                .floor()
        });

        let map = GridMap::from_layout(
            &map_config.layout,
            map_config.width,
            map_config.height,
            cell_size,
        )
        .context("invalid [map] layout")?;

        let (map_w, map_h) = map.world_size();
        let [x, y] = map_config.spawn.unwrap_or([map_w / 2.0, map_h / 2.0]);
        let viewpoint = Viewpoint::new(x, y, map_config.angle);
        if mode.resolves_collisions() && is_inside_wall(&map, &viewpoint) {
            eprintln!(
                "[raycaster] Warning: spawn point ({:.1}, {:.1}) is inside a wall",
                x, y
            );
        }

        Ok(Startup {
            window,
            engine: self.engine,
            map,
            viewpoint,
        })
    }
}

pub fn window_conf(window: &WindowConfig) -> Conf {
    Conf {
        window_title: window.title.clone(),
        window_width: window.width as i32,
        window_height: window.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}
