//! Mummy pursuit
//!
//! Each tick every mummy takes the single orthogonal step that brings it
//! closest (straight-line) to the player.

use glam::DVec2;

use super::board::Board;
use super::state::{GameEvent, LossCause, Playfield};
use super::tile::{Pos, TileKind};

/// Row-major positions of every mummy
pub fn watch_list(board: &Board) -> Vec<Pos> {
    board.positions_of(|k| k == TileKind::Mummy)
}

fn center(pos: Pos) -> DVec2 {
    DVec2::new(pos.row as f64, pos.col as f64)
}

/// Where the mummy at `mummy` should step next
///
/// Candidates are visited row offset outer, column offset inner (up, left,
/// right, down); the first strictly closer candidate wins ties. With no legal
/// neighbor the mummy stays put.
pub fn best_move(board: &Board, player: Pos, mummy: Pos) -> Pos {
    let goal = center(player);
    let mut best = mummy;
    let mut min_distance = f64::INFINITY;
    for dr in -1isize..=1 {
        for dc in -1isize..=1 {
            if dr.abs() + dc.abs() != 1 {
                continue;
            }
            let Some(candidate) = mummy.offset(dr, dc) else {
                continue;
            };
            if !board.get(candidate).mummy_can_enter() {
                continue;
            }
            let distance = center(candidate).distance(goal);
            if distance < min_distance {
                min_distance = distance;
                best = candidate;
            }
        }
    }
    best
}

/// Move every watched mummy once, in list order
pub fn advance(field: &mut Playfield, watch: &[Pos], out: &mut Vec<GameEvent>) {
    for &from in watch {
        if field.board.get(from) != TileKind::Mummy {
            continue;
        }
        let to = best_move(&field.board, field.player, from);
        field.board.set(from, TileKind::Background);
        if field.board.get(to) == TileKind::Player {
            field.lose(LossCause::CaughtByMummy, out);
            continue;
        }
        field.board.set(to, TileKind::Mummy);
        if to != from {
            out.push(GameEvent::MummyMoved { from, to });
        }
    }
}
