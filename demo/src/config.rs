use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gridpath_core::{Cell, Grid, Point};
use gridpath_editor::{EditorConfig, ObstacleDensity};
use log::LevelFilter;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub obstacles: ObstaclesConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
}

/// Endpoint positions as `[x, y]`. Unset endpoints are placed at random.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default)]
    pub source: Option<[i32; 2]>,
    #[serde(default)]
    pub target: Option<[i32; 2]>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObstaclesConfig {
    #[serde(default = "default_min_density")]
    pub min_density: f64,
    #[serde(default = "default_max_density")]
    pub max_density: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub solvable: bool,
    #[serde(default = "default_attempts")]
    pub attempts: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    #[serde(default = "default_hold_result")]
    pub hold_result: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_width() -> i32 { 40 }
fn default_height() -> i32 { 30 }
fn default_min_density() -> f64 { 0.4 }
fn default_max_density() -> f64 { 0.5 }
fn default_attempts() -> usize { 100 }
fn default_step_delay_ms() -> u64 { 50 }
fn default_hold_result() -> bool { true }
fn default_log_path() -> PathBuf { PathBuf::from("gridpath.log") }
fn default_log_level() -> String { "info".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for ObstaclesConfig {
    fn default() -> Self {
        Self {
            min_density: default_min_density(),
            max_density: default_max_density(),
            seed: None,
            solvable: false,
            attempts: default_attempts(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: default_step_delay_ms(),
            hold_result: default_hold_result(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            endpoints: EndpointsConfig::default(),
            obstacles: ObstaclesConfig::default(),
            animation: AnimationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    InvalidLevel(String),
    EndpointOutOfRange { x: i32, y: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "parsing {}: {source}", path.display()),
            Self::InvalidLevel(level) => write!(f, "unknown log level {level:?}"),
            Self::EndpointOutOfRange { x, y } => {
                write!(f, "endpoint ({x}, {y}) is outside the grid")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or use defaults if the file doesn't
    /// exist. A file that exists but fails to parse is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            width: self.grid.width,
            height: self.grid.height,
            density: ObstacleDensity::new(self.obstacles.min_density, self.obstacles.max_density),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| ConfigError::InvalidLevel(self.level.clone()))
    }
}

/// Resolve an `[x, y]` endpoint on `grid`.
pub fn endpoint_cell(grid: &Grid, xy: [i32; 2]) -> Result<Cell, ConfigError> {
    let [x, y] = xy;
    grid.cell_at(Point::new(x, y))
        .ok_or(ConfigError::EndpointOutOfRange { x, y })
}
