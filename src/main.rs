use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{self, Config, GridSize, THEME_CLASSIC};
use grid_snake::error::Result;
use grid_snake::input::InputHandler;
use grid_snake::renderer;
use grid_snake::session::Session;
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Upper bound on how long one input poll blocks, so frames keep flowing.
const FRAME_POLL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply_overrides(&self, mut config: Config) -> Config {
        config.grid = GridSize {
            width: self.width.unwrap_or(config.grid.width),
            height: self.height.unwrap_or(config.grid.height),
        };
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let config = cli.apply_overrides(config);
    config.validate()?;

    let log_path = cli.log_file.clone().unwrap_or_else(config::log_path);
    init_tracing(&log_path)?;
    install_panic_hook();

    run(config)
}

fn init_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

fn run(config: Config) -> Result<()> {
    let mut terminal_session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut session = Session::new(config, Instant::now());

    loop {
        terminal_session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, session.state(), &THEME_CLASSIC))?;

        let now = Instant::now();
        let timeout = session
            .ticker()
            .time_until_due(now)
            .map_or(FRAME_POLL, |left| left.min(FRAME_POLL));

        match input.poll_input(timeout) {
            Ok(Some(game_input)) => {
                if !session.handle_input(game_input, Instant::now()) {
                    break;
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "input poll failed");
                return Err(error.into());
            }
        }

        session.update(Instant::now());
    }

    info!("exiting");
    Ok(())
}
