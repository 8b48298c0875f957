//! Level catalog
//!
//! Ordered, read-only seed boards, one per level. Boards come from glyph-grid
//! text files (`level1.txt`, `level2.txt`, ...) or a single JSON catalog:
//!
//! ```json
//! { "levels": [["U00000000000000000", "..."], ...] }
//! ```
//!
//! Every level is validated on load, so the session can start any of them
//! without further checks.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Board, BoardParseError, Playfield, TileKind};

/// Why a level catalog could not be built
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("level {}: {source}", .index + 1)]
    Parse {
        index: usize,
        #[source]
        source: BoardParseError,
    },
    #[error("level {}: expected exactly one player, found {found}", .index + 1)]
    PlayerCount { index: usize, found: usize },
    #[error("level catalog is empty")]
    Empty,
    #[error("no level {}", .0 + 1)]
    NoSuchLevel(usize),
    #[error("invalid level catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk JSON shape
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    levels: Vec<Vec<String>>,
}

/// Validated seed boards, in play order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Playfield>,
}

impl LevelCatalog {
    /// Validate and wrap `boards`; each must hold exactly one player
    pub fn from_boards(boards: Vec<Board>) -> Result<Self, LevelError> {
        if boards.is_empty() {
            return Err(LevelError::Empty);
        }
        let levels = boards
            .into_iter()
            .enumerate()
            .map(|(index, board)| Self::validate(index, board))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    fn validate(index: usize, board: Board) -> Result<Playfield, LevelError> {
        let found = board.count(TileKind::Player);
        if found != 1 {
            return Err(LevelError::PlayerCount { index, found });
        }
        Playfield::new(board).ok_or(LevelError::PlayerCount { index, found: 0 })
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let boards = file
            .levels
            .iter()
            .enumerate()
            .map(|(index, rows)| {
                Board::from_rows(rows).map_err(|source| LevelError::Parse { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_boards(boards)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        let file = CatalogFile {
            levels: self.levels.iter().map(|f| f.board.rows()).collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Read `level1.txt` through `level{count}.txt` from `dir`
    pub fn load_dir(dir: &Path, count: usize) -> Result<Self, LevelError> {
        let mut boards = Vec::with_capacity(count);
        for index in 0..count {
            let path = dir.join(format!("level{}.txt", index + 1));
            let text = read(&path)?;
            let board = text.parse::<Board>().map_err(|source| {
                log::warn!("Rejected {}: {}", path.display(), source);
                LevelError::Parse { index, source }
            })?;
            boards.push(board);
        }
        let catalog = Self::from_boards(boards)?;
        log::info!("Loaded {} levels from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    /// Load a `.json` catalog file, or a directory of level text files
    pub fn load(path: &Path, count: usize) -> Result<Self, LevelError> {
        if path.extension().is_some_and(|ext| ext == "json") {
            let catalog = Self::from_json(&read(path)?)?;
            log::info!("Loaded {} levels from {}", catalog.len(), path.display());
            Ok(catalog)
        } else {
            Self::load_dir(path, count)
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Seed board for `index` (0-based)
    pub fn board(&self, index: usize) -> Option<&Board> {
        self.levels.get(index).map(|f| &f.board)
    }

    /// Fresh working copy of level `index`
    pub fn playfield(&self, index: usize) -> Option<Playfield> {
        self.levels.get(index).cloned()
    }

    /// Fresh working copy of the first level
    pub fn first_playfield(&self) -> Playfield {
        self.levels[0].clone()
    }
}

fn read(path: &Path) -> Result<String, LevelError> {
    fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })
}
