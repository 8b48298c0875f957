//! One-row-per-tick gravity
//!
//! Bombs, rocks and orbs fall into empty cells. A falling bomb that lands on
//! something breakable (or on hard sand) detonates; a falling rock that lands
//! on a bomb sets it off.

use super::board::Board;
use super::explosion::{explode, hit};
use super::state::{GameEvent, Playfield};
use super::tile::{Blast, Direction, Pos, TileKind};

/// Row-major positions of every gravity-affected tile
pub fn watch_list(board: &Board) -> Vec<Pos> {
    board.positions_of(TileKind::is_gravity_affected)
}

/// Advance every watched tile by one gravity step, in list order
///
/// Each watched cell is re-read before it moves; cells emptied earlier in the
/// same tick (by a blast) are skipped. If another gravity tile has fallen into
/// a watched cell during the tick, that tile is moved again from there.
pub fn advance(field: &mut Playfield, watch: &[Pos], out: &mut Vec<GameEvent>) {
    for &from in watch {
        let kind = field.board.get(from);
        if !kind.is_gravity_affected() {
            continue;
        }
        let Some(to) = from.step(Direction::Down) else {
            continue;
        };
        if field.board.get(to) != TileKind::Background {
            continue;
        }

        field.board.set(from, TileKind::Background);
        field.board.set(to, kind);
        out.push(GameEvent::Fell { kind, from, to });

        let Some(below) = to.step(Direction::Down) else {
            continue;
        };
        let under = field.board.get(below);
        match kind {
            TileKind::Bomb => {
                let triggers =
                    hit(field, below, under, out) == Blast::Destroyed || under == TileKind::HardSand;
                if triggers {
                    field.board.set(to, TileKind::Background);
                    explode(field, to, out);
                }
            }
            TileKind::Rock if under == TileKind::Bomb => explode(field, below, out),
            _ => {}
        }
    }
}
