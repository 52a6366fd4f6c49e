/// duel3d terminal frontend
///
/// Runs either the two-robot fight or the rotating cubes in the terminal.
/// Controls:
///   - fight: player 1 arrows, player 2 WASD (left/right move, up attack, down defend)
///   - cube: 1 orthographic, 2 perspective
///   - Q/ESC: Quit
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use duel3d_core::{random_face_colors, Arena, Config, CubeViewer, ProjectionMode, ViewerSettings};
use duel3d_terminal::{CubeDemo, Demo, FightDemo, TerminalApp};
use tracing::info;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "duel3d-terminal", version, about = "Robot duel and cube viewer in the terminal")]
struct Cli {
    /// Configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Write logs here; without it logs are discarded since the screen is in use
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Two-player robot fight
    Fight,
    /// Four cubes orbiting the y axis
    Cube {
        /// Start in perspective projection
        #[arg(long)]
        perspective: bool,

        /// Seed for the face colours
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let writer = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = Config::parse(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    let config = load_config(cli.config.as_ref())?;

    let demo: Box<dyn Demo> = match cli.command {
        Command::Fight => {
            info!("starting fight");
            Box::new(FightDemo::new(Arena::new(config.rules, config.bindings)))
        }
        Command::Cube { perspective, seed } => {
            let seed = seed.unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_secs())
                    .unwrap_or_default()
            });
            let settings = ViewerSettings {
                mode: if perspective {
                    ProjectionMode::Perspective
                } else {
                    config.viewer.mode
                },
                ..config.viewer
            };
            info!(seed, mode = ?settings.mode, "starting cube viewer");
            let viewer = CubeViewer::new(config.camera, config.clip, settings, &random_face_colors(seed));
            Box::new(CubeDemo::new(viewer))
        }
    };

    let mut app = TerminalApp::new(demo).context("failed to query terminal size")?;
    app.run().context("terminal session failed")?;
    Ok(())
}
