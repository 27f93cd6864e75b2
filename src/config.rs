//! Game configuration, read from `config.toml` in the user config directory.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{Error, GridInt, Result};

const APP_DIR: &str = "snake";
const CONFIG_FILE: &str = "config.toml";
const MAX_GRID_SIZE: GridInt = 100;

/// Rules of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid, in cells.
    pub grid_size: GridInt,
    /// Steps per second at the start of a round.
    pub initial_speed: u32,
    /// Steps per second the snake never exceeds.
    pub max_speed: u32,
    /// Speed goes up by one each time the score reaches a multiple of this.
    pub speed_up_every: u32,
    /// Growth credits granted per apple.
    pub growth_per_apple: u32,
    /// Seed for apple placement. Random when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_speed: 8,
            max_speed: 18,
            speed_up_every: 5,
            growth_per_apple: 2,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_grid_size(mut self, size: GridInt) -> Self {
        self.grid_size = size;
        self
    }

    #[must_use]
    pub const fn with_speed(mut self, initial: u32, max: u32) -> Self {
        self.initial_speed = initial;
        self.max_speed = max;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects values the game loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(Error::InvalidConfig(format!(
                "grid_size must be between 2 and {}, got {}",
                MAX_GRID_SIZE, self.grid_size
            )));
        }
        if self.initial_speed == 0 {
            return Err(Error::InvalidConfig("initial_speed must be positive".into()));
        }
        if self.max_speed < self.initial_speed {
            return Err(Error::InvalidConfig(format!(
                "max_speed ({}) is below initial_speed ({})",
                self.max_speed, self.initial_speed
            )));
        }
        if self.speed_up_every == 0 {
            return Err(Error::InvalidConfig("speed_up_every must be positive".into()));
        }
        let cells = self.grid_size as u32 * self.grid_size as u32;
        if self.growth_per_apple > cells {
            return Err(Error::InvalidConfig(format!(
                "growth_per_apple ({}) exceeds the {} cells of the grid",
                self.growth_per_apple, cells
            )));
        }
        Ok(())
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How often the frame loop wakes up to poll input and maybe step.
    pub frame_interval_ms: u64,
    pub game: GameConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self { frame_interval_ms: 5, game: GameConfig::default() }
    }
}

impl Config {
    /// Loads `config.toml` from the user config directory, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = match std::fs::read_to_string(path) {
            Ok(contents) => {
                info!("loading config from {}", path.display());
                toml::from_str(&contents)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Config::default()
            }
            Err(e) => return Err(e.into()),
        };

        config.game.validate()?;
        Ok(config)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// Directory holding the score file and the log.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.game.grid_size, 20);
        assert_eq!(config.game.initial_speed, 8);
        assert_eq!(config.game.max_speed, 18);
        assert_eq!(config.game.speed_up_every, 5);
        assert_eq!(config.game.growth_per_apple, 2);
        assert_eq!(config.game.seed, None);
        assert_eq!(config.frame_interval_ms, 5);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[game]\ngrid_size = 12\nseed = 7\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.game.grid_size, 12);
        assert_eq!(config.game.seed, Some(7));
        assert_eq!(config.game.initial_speed, 8);
        assert_eq!(config.frame_interval_ms, 5);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[game\ngrid_size = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }

    #[test]
    fn rejects_unplayable_values() {
        assert!(GameConfig::new().with_grid_size(1).validate().is_err());
        assert!(GameConfig::new().with_grid_size(101).validate().is_err());
        assert!(GameConfig::new().with_speed(0, 10).validate().is_err());
        assert!(GameConfig::new().with_speed(10, 5).validate().is_err());
        assert!(GameConfig::new().with_speed(4, 4).validate().is_ok());

        let mut rules = GameConfig::new();
        rules.speed_up_every = 0;
        assert!(matches!(rules.validate(), Err(Error::InvalidConfig(_))));

        let mut rules = GameConfig::new().with_grid_size(10);
        rules.growth_per_apple = u32::MAX;
        assert!(matches!(rules.validate(), Err(Error::InvalidConfig(_))));
        rules.growth_per_apple = 100;
        assert!(rules.validate().is_ok());
        rules.growth_per_apple = 101;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config { frame_interval_ms: 16, game: GameConfig::new().with_seed(42) };
        let toml_str = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }
}
