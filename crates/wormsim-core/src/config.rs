//! Configuration loading and typed config structures for the worms
//! simulation.
//!
//! The configuration lives in `wormsim-config.yaml` next to the binary's
//! working directory. Every field has a default, so an empty file, a
//! partial file, or no file at all are all valid.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};
use wormsim_types::{BoardSize, MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH};
use wormsim_world::Population;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "wormsim-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `wormsim-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Board limits and seeding.
    #[serde(default)]
    pub board: BoardConfig,

    /// Initial population of each run.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Step pacing of the terminal display.
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Log level and destination.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `WORMSIM_SEED` overrides `board.seed`
    /// - `WORMSIM_SLOWNESS_MS` overrides `pacing.slowness_ms`
    /// - `WORMSIM_LOG_FILE` overrides `logging.file`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults (still
    /// subject to environment overrides).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::from_file(path)?;
            info!(path = %path.display(), "configuration loaded");
            return Ok(config);
        }
        info!(path = %path.display(), "no configuration file, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value. Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("WORMSIM_SEED") {
            match val.trim().parse() {
                Ok(seed) => self.board.seed = Some(seed),
                Err(_) => warn!(value = %val, "ignoring invalid WORMSIM_SEED"),
            }
        }
        if let Some(val) = lookup("WORMSIM_SLOWNESS_MS") {
            match val.trim().parse() {
                Ok(ms) => self.pacing.slowness_ms = ms,
                Err(_) => warn!(value = %val, "ignoring invalid WORMSIM_SLOWNESS_MS"),
            }
        }
        if let Some(val) = lookup("WORMSIM_LOG_FILE") {
            self.logging.file = PathBuf::from(val);
        }
    }
}

/// Board limits and seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Widest board to use, however wide the terminal is.
    #[serde(default = "default_max_width")]
    pub max_width: u16,

    /// Tallest board to use, however tall the terminal is.
    #[serde(default = "default_max_height")]
    pub max_height: u16,

    /// Fixed RNG seed for reproducible runs. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BoardConfig {
    /// Board size for an available area of `width` x `height` cells.
    pub fn board_size(&self, width: u16, height: u16) -> BoardSize {
        BoardSize::clamped(width.min(self.max_width), height.min(self.max_height))
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
            seed: None,
        }
    }
}

/// Initial population of each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Worms every run starts with.
    #[serde(default = "default_min_worms")]
    pub min_worms: usize,

    /// Extra worms drawn uniformly from `0..worm_variation`.
    #[serde(default = "default_worm_variation")]
    pub worm_variation: usize,
}

impl PopulationConfig {
    /// The arena's view of these settings.
    pub const fn population(&self) -> Population {
        Population {
            min_worms: self.min_worms,
            worm_variation: self.worm_variation,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            min_worms: default_min_worms(),
            worm_variation: default_worm_variation(),
        }
    }
}

/// Step pacing of the terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PacingConfig {
    /// Initial extra delay between steps, in milliseconds.
    #[serde(default = "default_slowness_ms")]
    pub slowness_ms: u64,

    /// Granularity of input polling while waiting, in milliseconds.
    #[serde(default = "default_delay_quantum_ms")]
    pub delay_quantum_ms: u64,

    /// How much `+` and `-` change the slowness, in milliseconds.
    #[serde(default = "default_slowness_step_ms")]
    pub slowness_step_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            slowness_ms: default_slowness_ms(),
            delay_quantum_ms: default_delay_quantum_ms(),
            slowness_step_ms: default_slowness_step_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// File receiving log output. The terminal belongs to the display.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_max_width() -> u16 {
    MAX_BOARD_WIDTH
}

const fn default_max_height() -> u16 {
    MAX_BOARD_HEIGHT
}

const fn default_min_worms() -> usize {
    3
}

const fn default_worm_variation() -> usize {
    6
}

const fn default_slowness_ms() -> u64 {
    10
}

const fn default_delay_quantum_ms() -> u64 {
    10
}

const fn default_slowness_step_ms() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("wormsim.log")
}
