use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_FILE_NAME: &str = "grid-snake.log";

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Minimum accepted tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Smallest grid edge that still fits the starting snake.
pub const MIN_GRID_EDGE: u16 = 4;

/// Score granted for each food eaten.
pub const FOOD_REWARD: u32 = 10;

/// Number of segments the snake starts with.
pub const INITIAL_SNAKE_LEN: usize = 3;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Runtime settings for one game process.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridSize,
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Config {
    /// Loads config from the platform config directory.
    ///
    /// Returns defaults when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&config_path())
    }

    /// Loads config from `path`; a missing file yields defaults.
    ///
    /// Values are not validated here so CLI overrides can still replace
    /// them; call [`Config::validate`] on the merged result.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let config: Self =
            serde_json::from_str(&raw).map_err(|source| SnakeError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config)
    }

    /// Rejects grids too small for the starting snake and too-fast ticks.
    pub fn validate(&self) -> Result<()> {
        if self.grid.width < MIN_GRID_EDGE || self.grid.height < MIN_GRID_EDGE {
            return Err(SnakeError::InvalidConfig(format!(
                "grid must be at least {MIN_GRID_EDGE}x{MIN_GRID_EDGE}, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }

        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(SnakeError::InvalidConfig(format!(
                "tick interval must be at least {MIN_TICK_INTERVAL_MS} ms, got {}",
                self.tick_interval_ms
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Returns the default log file path.
#[must_use]
pub fn log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub grid_bg: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_score: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake, red food, close to the classic browser look.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    grid_bg: Color::Black,
    border_fg: Color::Gray,
    hud_label: Color::DarkGray,
    hud_score: Color::White,
    menu_title: Color::Red,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Each grid cell is drawn two terminal columns wide so cells look square.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "◆ ";
