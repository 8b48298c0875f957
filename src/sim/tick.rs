//! Driver-facing step
//!
//! One call per discrete game step: the player's move (if any), then a
//! gravity tick, then a pursuit tick. The step stops early once the run ends
//! or the level changes.

use super::state::{GameEvent, Session};
use super::tile::Direction;

/// Input commands for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Player move this step
    pub direction: Option<Direction>,
    /// Run a gravity tick after the move
    pub gravity: bool,
    /// Run a pursuit tick after gravity
    pub pursuit: bool,
}

fn interrupted(session: &Session, level: usize) -> bool {
    session.phase().is_terminal() || session.level_index() != level
}

/// Advance the session by one step
pub fn tick(session: &mut Session, input: &TickInput) -> Vec<GameEvent> {
    let level = session.level_index();
    let mut events = Vec::new();

    if let Some(dir) = input.direction {
        events.extend(session.move_player(dir));
        if interrupted(session, level) {
            return events;
        }
    }
    if input.gravity {
        events.extend(session.gravity_tick());
        if interrupted(session, level) {
            return events;
        }
    }
    if input.pursuit {
        events.extend(session.pursuit_tick());
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelCatalog;
    use crate::sim::autoplay::Autopilot;
    use crate::sim::board::Board;
    use crate::sim::state::{GamePhase, LossCause};
    use crate::sim::tile::{Pos, TileKind};

    fn session_with(tiles: &[(usize, usize, TileKind)]) -> Session {
        let mut board = Board::default();
        for &(row, col, kind) in tiles {
            board.set(Pos::new(row, col), kind);
        }
        Session::new(LevelCatalog::from_boards(vec![board]).expect("valid catalog"))
    }

    #[test]
    fn test_tick_runs_phases_in_order() {
        let mut session = session_with(&[
            (5, 5, TileKind::Player),
            (1, 9, TileKind::Rock),
            (5, 0, TileKind::Mummy),
        ]);
        let events = tick(
            &mut session,
            &TickInput {
                direction: Some(Direction::Down),
                gravity: true,
                pursuit: true,
            },
        );
        assert!(matches!(events[0], GameEvent::PlayerMoved { .. }));
        assert!(matches!(events[1], GameEvent::Fell { .. }));
        assert!(matches!(events[2], GameEvent::MummyMoved { .. }));
        assert_eq!(session.player_position(), Pos::new(6, 5));
        assert_eq!(session.board().get(Pos::new(2, 9)), TileKind::Rock);
    }

    #[test]
    fn test_tick_stops_at_game_over() {
        let mut session = session_with(&[
            (5, 5, TileKind::Player),
            (5, 6, TileKind::Mummy),
            (1, 9, TileKind::Rock),
        ]);
        let events = tick(
            &mut session,
            &TickInput {
                direction: Some(Direction::Right),
                gravity: true,
                pursuit: true,
            },
        );
        assert_eq!(events, vec![GameEvent::GameOver(LossCause::CaughtByMummy)]);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.board().get(Pos::new(1, 9)), TileKind::Rock);
    }

    #[test]
    fn test_determinism() {
        let tiles = [
            (6, 6, TileKind::Player),
            (2, 3, TileKind::Bomb),
            (4, 3, TileKind::SoftSand),
            (7, 7, TileKind::Rock),
            (9, 12, TileKind::Orb),
            (10, 12, TileKind::Portal),
            (0, 15, TileKind::Mummy),
        ];
        let mut session1 = session_with(&tiles);
        let mut session2 = session_with(&tiles);
        let mut pilot1 = Autopilot::new(99999);
        let mut pilot2 = Autopilot::new(99999);

        for turn in 0..60 {
            let input1 = pilot1.input(true, turn % 2 == 0);
            let input2 = pilot2.input(true, turn % 2 == 0);
            assert_eq!(tick(&mut session1, &input1), tick(&mut session2, &input2));
        }
        assert_eq!(session1.board(), session2.board());
        assert_eq!(session1.phase(), session2.phase());
    }
}
