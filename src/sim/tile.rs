//! Tile kinds, grid positions and directions
//!
//! A cell's content is a plain `TileKind`. `Tile` pairs a kind with the
//! position it was read from, so the two can never disagree.

use serde::{Deserialize, Serialize};

use crate::consts::{HEIGHT, WIDTH};

/// Closed set of cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    /// Empty space
    #[default]
    Background,
    HardSand,
    SoftSand,
    Granite,
    Bomb,
    Orb,
    Rock,
    Portal,
    Player,
    Mummy,
}

/// What a neighboring detonation does to a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blast {
    /// Cleared to background
    Destroyed,
    /// Left untouched
    Resists,
    /// An orb caught in a blast: it stays, but the goal is lost and the run ends
    GoalLost,
}

impl TileKind {
    pub const ALL: [TileKind; 10] = [
        TileKind::Background,
        TileKind::HardSand,
        TileKind::SoftSand,
        TileKind::Granite,
        TileKind::Bomb,
        TileKind::Orb,
        TileKind::Rock,
        TileKind::Portal,
        TileKind::Player,
        TileKind::Mummy,
    ];

    /// Single-character glyph used by the level text format
    pub fn glyph(self) -> char {
        match self {
            TileKind::Background => '0',
            TileKind::HardSand => 'H',
            TileKind::SoftSand => 'S',
            TileKind::Granite => 'G',
            TileKind::Bomb => 'B',
            TileKind::Orb => 'O',
            TileKind::Rock => 'R',
            TileKind::Portal => 'P',
            TileKind::Player => 'U',
            TileKind::Mummy => 'M',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        TileKind::ALL.into_iter().find(|k| k.glyph() == c)
    }

    /// Falls one row per gravity tick when the cell below is empty
    pub fn is_gravity_affected(self) -> bool {
        matches!(self, TileKind::Bomb | TileKind::Rock | TileKind::Orb)
    }

    /// The player can never step onto these
    pub fn blocks_player(self) -> bool {
        matches!(self, TileKind::HardSand | TileKind::Granite | TileKind::Portal)
    }

    /// A mummy may step onto empty space or onto the player
    pub fn mummy_can_enter(self) -> bool {
        matches!(self, TileKind::Background | TileKind::Player)
    }

    /// Effect of a neighboring detonation on this kind
    pub fn blast(self) -> Blast {
        match self {
            TileKind::Granite
            | TileKind::SoftSand
            | TileKind::Bomb
            | TileKind::Rock
            | TileKind::Mummy => Blast::Destroyed,
            TileKind::Orb => Blast::GoalLost,
            TileKind::Background
            | TileKind::HardSand
            | TileKind::Portal
            | TileKind::Player => Blast::Resists,
        }
    }
}

/// A cell coordinate, always inside the board once constructed through `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position shifted by `(d_row, d_col)`, or `None` if it leaves the board
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Pos> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < HEIGHT && col < WIDTH).then_some(Pos { row, col })
    }

    /// Step one cell in `dir`
    pub fn step(self, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        self.offset(dr, dc)
    }
}

/// One of the four orthogonal unit moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(d_row, d_col)`
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn from_delta(d_row: isize, d_col: isize) -> Option<Self> {
        Direction::ALL.into_iter().find(|d| d.delta() == (d_row, d_col))
    }
}

/// A cell's content together with where it sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub pos: Pos,
}
