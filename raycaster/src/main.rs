mod app;
mod config;
mod platform;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::RCApp;
use clap::Parser;
use config::{AppConfig, Startup, window_conf};
use raycore::RenderMode;

/// Command-line arguments for the raycaster.
#[derive(Parser)]
#[command(name = "Raycaster", version, about = "Grid raycasting demo")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rendering mode: free-aim, top-down or first-person.
    #[arg(short, long)]
    mode: Option<RenderMode>,

    /// Number of rays in the fan.
    #[arg(short, long)]
    rays: Option<usize>,
}

/// Loads the configuration from a TOML file or uses defaults.
fn load_config(path: Option<PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            let config = AppConfig::from_file(&path)?;
            println!("[raycaster] Loaded config from '{}'", path.display());
            Ok(config)
        }
        None => {
            println!("[raycaster] No config file provided, using defaults.");
            Ok(AppConfig::default())
        }
    }
}

fn startup(cli: Cli) -> Result<Startup> {
    let mut config = load_config(cli.config)?;
    config.apply_overrides(cli.mode, cli.rays);
    config.resolve()
}

/// Validates everything before the window opens, then hands over to macroquad.
fn main() {
    let startup = match startup(Cli::parse()) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("[raycaster][error] {:#}", e);
            std::process::exit(1);
        }
    };

    println!(
        "[raycaster] Starting in {} mode: {}x{} map, cell size {}, {} rays",
        startup.engine.mode,
        startup.map.width,
        startup.map.height,
        startup.map.cell_size,
        startup.engine.ray_count
    );

    let conf = window_conf(&startup.window);
    macroquad::Window::from_config(conf, async move {
        let mut app = RCApp::new(startup);
        app.run().await;
    });
}
