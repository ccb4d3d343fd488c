use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::Difficulty;
use crate::store::{self, StoreError};

/// Board side length used when none is given.
pub const DEFAULT_GRID: u16 = 18;

/// Smallest board that fits the starting snake with room to turn.
pub const MIN_GRID: u16 = 5;

/// Largest board the terminal front-end accepts.
pub const MAX_GRID: u16 = 64;

/// Extra ticks of tail retention granted per apple.
pub const DEFAULT_GROWTH_QUANTUM: u32 = 2;

/// Number of finished runs kept in the history.
pub const RUN_HISTORY_LIMIT: usize = 50;

/// Number of runs listed on the start screen.
pub const TOP_RUNS_SHOWN: usize = 5;

/// Swipe threshold for terminal mouse drags, in cells.
pub const TERMINAL_SWIPE_THRESHOLD: i32 = 2;

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Rejected game configuration.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid size {0} is outside the supported range {min}..={max}", min = MIN_GRID, max = MAX_GRID)]
    GridOutOfRange(u16),
    #[error("growth quantum must be at least 1")]
    ZeroGrowthQuantum,
}

/// Rules for one run, fixed at reset time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    /// Board side length; the board is `grid`×`grid`. Must be at least
    /// [`MIN_GRID`], which the engine assumes without checking.
    pub grid: u16,
    pub difficulty: Difficulty,
    pub wrap_walls: bool,
    pub growth_quantum: u32,
    /// Shrinks the tick interval every few apples.
    pub speed_up: bool,
}

impl GameConfig {
    #[must_use]
    pub fn new(grid: u16, difficulty: Difficulty, wrap_walls: bool) -> Self {
        Self {
            grid,
            difficulty,
            wrap_walls,
            growth_quantum: DEFAULT_GROWTH_QUANTUM,
            speed_up: false,
        }
    }

    #[must_use]
    pub fn with_speed_up(mut self, speed_up: bool) -> Self {
        self.speed_up = speed_up;
        self
    }

    #[must_use]
    pub fn with_growth_quantum(mut self, growth_quantum: u32) -> Self {
        self.growth_quantum = growth_quantum;
        self
    }

    /// Checks the preconditions the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID..=MAX_GRID).contains(&self.grid) {
            return Err(ConfigError::GridOutOfRange(self.grid));
        }
        if self.growth_quantum == 0 {
            return Err(ConfigError::ZeroGrowthQuantum);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRID, Difficulty::Normal, false)
    }
}

/// Player preferences remembered between sessions.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub wrap_walls: bool,
    pub speed_up: bool,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            wrap_walls: false,
            speed_up: false,
            theme: crate::theme::DEFAULT_THEME_ID.to_owned(),
        }
    }
}

/// Per-launch changes to the saved [`Settings`]. `None` keeps the saved value.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SettingsOverrides {
    pub difficulty: Option<Difficulty>,
    pub wrap_walls: Option<bool>,
    pub speed_up: Option<bool>,
}

impl Settings {
    /// Applies command-line choices on top of the saved settings.
    #[must_use]
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(difficulty) = overrides.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(wrap_walls) = overrides.wrap_walls {
            self.wrap_walls = wrap_walls;
        }
        if let Some(speed_up) = overrides.speed_up {
            self.speed_up = speed_up;
        }
        self
    }

    /// Builds the run configuration for a board of side `grid`.
    #[must_use]
    pub fn game_config(&self, grid: u16) -> GameConfig {
        GameConfig::new(grid, self.difficulty, self.wrap_walls).with_speed_up(self.speed_up)
    }

    /// Loads settings, returning defaults when none were saved yet.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        Ok(store::load_json(path)?.unwrap_or_default())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        store::save_json(path, self)
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    store::data_dir().join(SETTINGS_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, GameConfig, Settings, SettingsOverrides, DEFAULT_GROWTH_QUANTUM, MIN_GRID,
    };
    use crate::scoring::Difficulty;
    use crate::store::test_support::TempPath;

    #[test]
    fn new_config_uses_default_knobs() {
        let config = GameConfig::new(12, Difficulty::Hard, true);

        assert_eq!(config.growth_quantum, DEFAULT_GROWTH_QUANTUM);
        assert!(!config.speed_up);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let config = GameConfig::new(MIN_GRID - 1, Difficulty::Normal, false);

        assert_eq!(
            config.validate(),
            Err(ConfigError::GridOutOfRange(MIN_GRID - 1))
        );
    }

    #[test]
    fn zero_growth_quantum_is_rejected() {
        let config = GameConfig::default().with_growth_quantum(0);

        assert_eq!(config.validate(), Err(ConfigError::ZeroGrowthQuantum));
    }

    #[test]
    fn settings_round_trip_through_disk() {
        let path = TempPath::new("settings");
        let settings = Settings {
            difficulty: Difficulty::Easy,
            wrap_walls: true,
            speed_up: true,
            theme: "neon".to_owned(),
        };

        settings.save_to(path.as_path()).expect("save should succeed");
        let loaded = Settings::load_from(path.as_path()).expect("load should succeed");

        assert_eq!(loaded, settings);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"wrap_walls":true}"#).expect("partial json parses");

        assert!(settings.wrap_walls);
        assert_eq!(settings.difficulty, Difficulty::Normal);
    }

    #[test]
    fn settings_map_to_game_config() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            speed_up: true,
            ..Settings::default()
        };

        let config = settings.game_config(20);

        assert_eq!(config.grid, 20);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert!(config.speed_up);
    }

    #[test]
    fn overrides_can_switch_saved_toggles_off() {
        let saved: Settings =
            serde_json::from_str(r#"{"wrap_walls":true,"speed_up":true}"#).expect("json parses");

        let settings = saved.with_overrides(SettingsOverrides {
            wrap_walls: Some(false),
            ..SettingsOverrides::default()
        });

        assert!(!settings.wrap_walls);
        assert!(settings.speed_up);
    }

    #[test]
    fn unset_overrides_keep_saved_values() {
        let saved = Settings {
            difficulty: Difficulty::Easy,
            wrap_walls: true,
            ..Settings::default()
        };

        let settings = saved.clone().with_overrides(SettingsOverrides {
            difficulty: Some(Difficulty::Hard),
            ..SettingsOverrides::default()
        });

        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.wrap_walls, saved.wrap_walls);
        assert_eq!(settings.theme, saved.theme);
    }
}
