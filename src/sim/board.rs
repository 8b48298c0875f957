//! Fixed-size tile grid
//!
//! The board is the whole mutable world for one level. Every cell always
//! holds some `TileKind`; `Background` is the empty kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::{Pos, Tile, TileKind};
use crate::consts::{HEIGHT, WIDTH};

/// Failure to read a board from its glyph-grid text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("wrong number of rows: {0}")]
    RowCount(usize),
    #[error("row {row}: wrong number of cells: {found}")]
    RowWidth { row: usize, found: usize },
    #[error("row {row}, col {col}: unknown tile glyph {glyph:?}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
}

/// `HEIGHT x WIDTH` grid of tile kinds
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    cells: [[TileKind; WIDTH]; HEIGHT],
}

impl Board {
    /// Board with every cell set to `kind`
    pub fn filled(kind: TileKind) -> Self {
        Self {
            cells: [[kind; WIDTH]; HEIGHT],
        }
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> TileKind {
        self.cells[pos.row][pos.col]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, kind: TileKind) {
        self.cells[pos.row][pos.col] = kind;
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        Tile {
            kind: self.get(pos),
            pos,
        }
    }

    /// Every tile in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..HEIGHT).flat_map(move |row| (0..WIDTH).map(move |col| self.tile(Pos::new(row, col))))
    }

    /// Row-major positions of every cell whose kind satisfies `pred`
    pub fn positions_of(&self, pred: impl Fn(TileKind) -> bool) -> Vec<Pos> {
        self.tiles()
            .filter(|t| pred(t.kind))
            .map(|t| t.pos)
            .collect()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles().filter(|t| t.kind == kind).count()
    }

    /// Last player tile in row-major order
    pub fn find_player(&self) -> Option<Pos> {
        self.positions_of(|k| k == TileKind::Player).pop()
    }

    /// One string of glyphs per row
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|k| k.glyph()).collect())
            .collect()
    }

    /// Glyph grid with row and column indices, for debugging
    pub fn annotated(&self) -> String {
        let mut out = String::from("    ");
        for col in 0..WIDTH {
            out.push(char::from_digit((col % 10) as u32, 10).unwrap_or(' '));
        }
        for (i, row) in self.rows().iter().enumerate() {
            out.push_str(&format!("\n{i:>2}  {row}"));
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::filled(TileKind::Background)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows().join("\n"))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.rows() {
            writeln!(f, "    {row}")?;
        }
        write!(f, "}}")
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `HEIGHT` non-blank lines of `WIDTH` glyphs; surrounding whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        Board::from_rows(&lines)
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = BoardParseError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Board::from_rows(&rows)
    }
}

impl Board {
    /// Builds a board from exactly `HEIGHT` rows of `WIDTH` glyphs
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardParseError> {
        if rows.len() != HEIGHT {
            return Err(BoardParseError::RowCount(rows.len()));
        }
        let mut board = Board::default();
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != WIDTH {
                return Err(BoardParseError::RowWidth { row, found });
            }
            for (col, glyph) in line.chars().enumerate() {
                let kind = TileKind::from_glyph(glyph)
                    .ok_or(BoardParseError::UnknownGlyph { row, col, glyph })?;
                board.set(Pos::new(row, col), kind);
            }
        }
        Ok(board)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> String {
        let mut rows = vec!["0".repeat(WIDTH); HEIGHT];
        rows[0] = format!("U{}", "H".repeat(WIDTH - 1));
        rows[HEIGHT - 1] = format!("{}PO", "G".repeat(WIDTH - 2));
        rows.join("\n")
    }

    #[test]
    fn test_parse_and_display() {
        let text = sample_text();
        let board: Board = text.parse().expect("valid board");
        assert_eq!(board.get(Pos::new(0, 0)), TileKind::Player);
        assert_eq!(board.get(Pos::new(0, 1)), TileKind::HardSand);
        assert_eq!(board.get(Pos::new(HEIGHT - 1, WIDTH - 1)), TileKind::Orb);
        assert_eq!(board.get(Pos::new(5, 5)), TileKind::Background);
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn test_parse_ignores_blank_lines_and_indent() {
        let text = sample_text()
            .lines()
            .map(|l| format!("  {l}  \n"))
            .collect::<String>();
        let board: Board = format!("\n\n{text}\n").parse().expect("valid board");
        assert_eq!(board.find_player(), Some(Pos::new(0, 0)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("U".parse::<Board>(), Err(BoardParseError::RowCount(1)));

        let mut rows = vec!["0".repeat(WIDTH); HEIGHT];
        rows[3] = "0".repeat(WIDTH - 1);
        assert_eq!(
            rows.join("\n").parse::<Board>(),
            Err(BoardParseError::RowWidth { row: 3, found: WIDTH - 1 })
        );

        rows[3] = format!("{}x", "0".repeat(WIDTH - 1));
        assert_eq!(
            rows.join("\n").parse::<Board>(),
            Err(BoardParseError::UnknownGlyph { row: 3, col: WIDTH - 1, glyph: 'x' })
        );
    }

    #[test]
    fn test_scans_are_row_major() {
        let mut board = Board::default();
        board.set(Pos::new(4, 1), TileKind::Rock);
        board.set(Pos::new(2, 7), TileKind::Bomb);
        board.set(Pos::new(2, 3), TileKind::Orb);
        let found = board.positions_of(TileKind::is_gravity_affected);
        assert_eq!(found, vec![Pos::new(2, 3), Pos::new(2, 7), Pos::new(4, 1)]);
        assert_eq!(board.count(TileKind::Orb), 1);
        assert_eq!(board.count(TileKind::Background), HEIGHT * WIDTH - 3);
    }

    #[test]
    fn test_serde_as_rows() {
        let board: Board = sample_text().parse().expect("valid board");
        let json = serde_json::to_string(&board).expect("serialize");
        assert!(json.starts_with("[\"UHHH"));
        let back: Board = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, board);

        let bad = serde_json::from_str::<Board>("[\"000\"]");
        assert!(bad.is_err());
    }
}
