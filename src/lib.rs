//! Mummy Maze - rules engine for a tile-grid push puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (board, gravity, pushing, explosions, mummies, session)
//! - `level`: Level catalog and the glyph-grid level format
//! - `settings`: Driver configuration

pub mod level;
pub mod settings;
pub mod sim;

pub use level::{LevelCatalog, LevelError};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Board rows
    pub const HEIGHT: usize = 12;
    /// Board columns
    pub const WIDTH: usize = 18;
    /// Levels shipped with the game
    pub const NUM_LEVELS: usize = 20;
}
