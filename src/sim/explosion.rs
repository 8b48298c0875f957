//! Detonations and chain reactions
//!
//! A detonation clears its own cell, then hits the eight surrounding cells.
//! Bombs among them are cleared first and then detonate in turn, so no cell
//! can trigger twice.

use super::state::{GameEvent, LossCause, Playfield};
use super::tile::{Blast, Pos, TileKind};

/// Neighbor offsets in blast order: row above left to right, sides, row below
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Detonate at `origin`
///
/// Recursion depth is bounded by the number of bombs on the board.
pub fn explode(field: &mut Playfield, origin: Pos, out: &mut Vec<GameEvent>) {
    field.board.set(origin, TileKind::Background);
    out.push(GameEvent::Detonated { at: origin });
    log::debug!("Detonation at {:?}", origin);

    for (dr, dc) in NEIGHBORS {
        let Some(pos) = origin.offset(dr, dc) else {
            continue;
        };
        let kind = field.board.get(pos);
        if kind == TileKind::Player {
            field.lose(LossCause::CaughtInBlast, out);
            continue;
        }
        if hit(field, pos, kind, out) == Blast::Destroyed {
            field.board.set(pos, TileKind::Background);
            if kind == TileKind::Bomb {
                explode(field, pos, out);
            }
        }
    }
}

/// Classify `kind` at `pos` for a blast, applying the orb penalty
///
/// An orb resists the blast itself but costs its goal and ends the run.
pub(crate) fn hit(field: &mut Playfield, pos: Pos, kind: TileKind, out: &mut Vec<GameEvent>) -> Blast {
    let blast = kind.blast();
    if blast == Blast::GoalLost {
        field.remaining_goals -= 1;
        out.push(GameEvent::OrbLost {
            at: pos,
            remaining: field.remaining_goals,
        });
        field.lose(LossCause::OrbDestroyed, out);
    }
    blast
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::Board;

    fn field_with(tiles: &[(usize, usize, TileKind)]) -> Playfield {
        let mut board = Board::default();
        board.set(Pos::new(11, 17), TileKind::Player);
        for &(row, col, kind) in tiles {
            board.set(Pos::new(row, col), kind);
        }
        Playfield::new(board).expect("player present")
    }

    #[test]
    fn test_corner_bomb_clears_neighbors() {
        let mut field = field_with(&[
            (0, 0, TileKind::Bomb),
            (0, 1, TileKind::SoftSand),
            (1, 0, TileKind::SoftSand),
        ]);
        let mut events = Vec::new();
        explode(&mut field, Pos::new(0, 0), &mut events);

        for pos in [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0)] {
            assert_eq!(field.board.get(pos), TileKind::Background);
        }
        assert_eq!(events, vec![GameEvent::Detonated { at: Pos::new(0, 0) }]);
    }

    #[test]
    fn test_blast_clears_explodable_and_spares_others() {
        let mut field = field_with(&[
            (5, 5, TileKind::Bomb),
            (4, 4, TileKind::HardSand),
            (4, 5, TileKind::Portal),
            (4, 6, TileKind::Granite),
            (5, 4, TileKind::Rock),
            (5, 6, TileKind::Mummy),
            (6, 5, TileKind::SoftSand),
        ]);
        let mut events = Vec::new();
        explode(&mut field, Pos::new(5, 5), &mut events);

        assert_eq!(field.board.get(Pos::new(4, 4)), TileKind::HardSand);
        assert_eq!(field.board.get(Pos::new(4, 5)), TileKind::Portal);
        for pos in [Pos::new(4, 6), Pos::new(5, 4), Pos::new(5, 6), Pos::new(6, 5)] {
            assert_eq!(field.board.get(pos), TileKind::Background);
        }
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_chain_reaction_detonates_each_bomb_once() {
        let mut field = field_with(&[
            (5, 5, TileKind::Bomb),
            (5, 6, TileKind::Bomb),
            (5, 8, TileKind::Rock),
            (5, 9, TileKind::Rock),
        ]);
        let mut events = Vec::new();
        explode(&mut field, Pos::new(5, 5), &mut events);

        assert_eq!(
            events,
            vec![
                GameEvent::Detonated { at: Pos::new(5, 5) },
                GameEvent::Detonated { at: Pos::new(5, 6) },
            ]
        );
        // (5,7) is empty, so the chain stops short of (5,8)
        assert_eq!(field.board.get(Pos::new(5, 8)), TileKind::Rock);
        assert_eq!(field.board.get(Pos::new(5, 9)), TileKind::Rock);
    }

    #[test]
    fn test_player_in_blast_ends_game() {
        let mut field = field_with(&[(10, 16, TileKind::Bomb)]);
        let mut events = Vec::new();
        explode(&mut field, Pos::new(10, 16), &mut events);

        assert!(events.contains(&GameEvent::GameOver(LossCause::CaughtInBlast)));
        assert_eq!(field.board.get(Pos::new(11, 17)), TileKind::Player);
    }

    #[test]
    fn test_orb_in_blast_is_lost() {
        let mut field = field_with(&[(3, 3, TileKind::Bomb), (3, 4, TileKind::Orb)]);
        assert_eq!(field.remaining_goals, 1);
        let mut events = Vec::new();
        explode(&mut field, Pos::new(3, 3), &mut events);

        assert_eq!(field.remaining_goals, 0);
        assert_eq!(field.board.get(Pos::new(3, 4)), TileKind::Orb);
        assert!(events.contains(&GameEvent::OrbLost {
            at: Pos::new(3, 4),
            remaining: 0
        }));
        assert!(events.contains(&GameEvent::GameOver(LossCause::OrbDestroyed)));
    }
}
