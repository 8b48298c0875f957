//! Driver settings
//!
//! Read from a JSON file; every field is optional and falls back to its
//! default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::NUM_LEVELS;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the terminal driver runs a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory of `levelN.txt` files, or a `.json` catalog
    pub levels: PathBuf,
    /// Number of level files to read from a directory
    pub level_count: usize,
    /// First level to play (0-based)
    pub start_level: usize,
    /// Driver turns between gravity ticks (0 = never)
    pub gravity_every: u32,
    /// Driver turns between pursuit ticks (0 = never)
    pub pursuit_every: u32,
    /// Let the seeded autopilot play instead of reading stdin
    pub autoplay_seed: Option<u64>,
    /// Stop after this many turns
    pub max_turns: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            levels: PathBuf::from("levels"),
            level_count: NUM_LEVELS,
            start_level: 0,
            gravity_every: 1,
            pursuit_every: 2,
            autoplay_seed: None,
            max_turns: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from `path`; a missing file means defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Whether driver turn `turn` (1-based) runs a gravity tick
    pub fn gravity_turn(&self, turn: u32) -> bool {
        self.gravity_every > 0 && turn % self.gravity_every == 0
    }

    /// Whether driver turn `turn` (1-based) runs a pursuit tick
    pub fn pursuit_turn(&self, turn: u32) -> bool {
        self.pursuit_every > 0 && turn % self.pursuit_every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "start_level": 3, "autoplay_seed": 7 }"#)
            .expect("valid settings");
        assert_eq!(settings.start_level, 3);
        assert_eq!(settings.autoplay_seed, Some(7));
        assert_eq!(settings.level_count, NUM_LEVELS);
        assert_eq!(settings.levels, PathBuf::from("levels"));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json(r#"{ "gravity_every": "often" }"#),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("mummy-maze-no-such-settings.json");
        assert_eq!(Settings::load(&path).expect("defaults"), Settings::default());
    }

    #[test]
    fn test_tick_cadence() {
        let settings = Settings {
            gravity_every: 1,
            pursuit_every: 3,
            ..Default::default()
        };
        assert!(settings.gravity_turn(1));
        assert!(settings.gravity_turn(2));
        assert!(!settings.pursuit_turn(1));
        assert!(settings.pursuit_turn(3));
        assert!(settings.pursuit_turn(6));

        let never = Settings {
            gravity_every: 0,
            ..Default::default()
        };
        assert!(!never.gravity_turn(1));
    }
}
