//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Discrete, externally triggered steps only
//! - Seeded RNG only (autoplay)
//! - Stable iteration order (row-major board scans)
//! - No rendering, input or file dependencies

pub mod autoplay;
pub mod board;
pub mod explosion;
pub mod gravity;
pub mod movement;
pub mod pursuit;
pub mod state;
pub mod tick;
pub mod tile;

pub use autoplay::Autopilot;
pub use board::{Board, BoardParseError};
pub use explosion::explode;
pub use pursuit::best_move;
pub use state::{GameEvent, GamePhase, LossCause, Playfield, Session};
pub use tick::{TickInput, tick};
pub use tile::{Blast, Direction, Pos, Tile, TileKind};
