//! Player movement and pushing
//!
//! Resolution order for a move into the target cell (first match wins):
//! 1. off the board, hard sand, granite or portal: nothing happens
//! 2. mummy: the player is caught
//! 3. soft sand or background: the player steps forward
//! 4. bomb, rock or orb: push it into an empty cell beyond, or deliver an
//!    orb into a portal beyond; otherwise the push is blocked

use super::state::{GameEvent, LossCause, Playfield};
use super::tile::{Direction, Pos, TileKind};

/// Resolve one directional player action against the playfield
pub fn resolve(field: &mut Playfield, dir: Direction, out: &mut Vec<GameEvent>) {
    let Some(target) = field.player.step(dir) else {
        return;
    };
    let target_kind = field.board.get(target);
    if target_kind.blocks_player() {
        return;
    }

    match target_kind {
        TileKind::Mummy => field.lose(LossCause::CaughtByMummy, out),
        TileKind::SoftSand | TileKind::Background => step_player(field, target, out),
        TileKind::Bomb | TileKind::Rock | TileKind::Orb => push(field, dir, target, target_kind, out),
        TileKind::Player | TileKind::HardSand | TileKind::Granite | TileKind::Portal => {
            unreachable!("player cannot move onto {target_kind:?} at {target:?}")
        }
    }
}

fn push(field: &mut Playfield, dir: Direction, target: Pos, kind: TileKind, out: &mut Vec<GameEvent>) {
    let Some(beyond) = target.step(dir) else {
        return;
    };
    match field.board.get(beyond) {
        TileKind::Background => {
            field.board.set(beyond, kind);
            out.push(GameEvent::Pushed {
                kind,
                from: target,
                to: beyond,
            });
            log::debug!("Pushed {:?} {:?} -> {:?}", kind, target, beyond);
            step_player(field, target, out);
        }
        TileKind::Portal if kind == TileKind::Orb => {
            // The orb vanishes; the portal cell is left as it was
            step_player(field, target, out);
            field.remaining_goals -= 1;
            out.push(GameEvent::OrbCollected {
                remaining: field.remaining_goals,
            });
            log::debug!("Orb delivered, {} remaining", field.remaining_goals);
            if field.remaining_goals <= 0 {
                out.push(GameEvent::LevelComplete);
            }
        }
        _ => {}
    }
}

fn step_player(field: &mut Playfield, to: Pos, out: &mut Vec<GameEvent>) {
    let from = field.player;
    field.board.set(from, TileKind::Background);
    field.board.set(to, TileKind::Player);
    field.player = to;
    out.push(GameEvent::PlayerMoved { from, to });
}
