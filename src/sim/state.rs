//! Session state, events and level transitions
//!
//! Engine steps report what happened as a list of `GameEvent`s. The session
//! is the only place that turns those into terminal transitions.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::tile::{Direction, Pos, TileKind};
use super::{gravity, movement, pursuit};
use crate::level::{LevelCatalog, LevelError};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Player walked into a mummy or a mummy reached the player
    CaughtByMummy,
    /// Player stood next to a detonation
    CaughtInBlast,
    /// An orb was caught in a detonation
    OrbDestroyed,
}

/// Something that happened during one engine step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayerMoved { from: Pos, to: Pos },
    Pushed { kind: TileKind, from: Pos, to: Pos },
    Fell { kind: TileKind, from: Pos, to: Pos },
    Detonated { at: Pos },
    /// An orb was delivered into a portal
    OrbCollected { remaining: i32 },
    /// An orb was caught in a blast
    OrbLost { at: Pos, remaining: i32 },
    MummyMoved { from: Pos, to: Pos },
    GameOver(LossCause),
    /// Last goal of the level delivered
    LevelComplete,
    LevelAdvanced { level: usize },
    GameWon,
}

impl GameEvent {
    /// True for the one-shot notifications a driver switches screens on
    pub fn is_notification(&self) -> bool {
        matches!(
            self,
            GameEvent::GameOver(_) | GameEvent::LevelAdvanced { .. } | GameEvent::GameWon
        )
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
    Won,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Playing
    }
}

/// The mutable world for one level: the board plus what is derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub board: Board,
    pub player: Pos,
    /// Orbs still to deliver. Can drop below zero when orbs are lost to blasts.
    pub remaining_goals: i32,
}

impl Playfield {
    /// Returns `None` when the board has no player
    pub fn new(board: Board) -> Option<Self> {
        let player = board.find_player()?;
        let remaining_goals = board.count(TileKind::Orb) as i32;
        Some(Self {
            board,
            player,
            remaining_goals,
        })
    }

    pub(crate) fn lose(&self, cause: LossCause, out: &mut Vec<GameEvent>) {
        log::debug!("Loss at player {:?}: {:?}", self.player, cause);
        out.push(GameEvent::GameOver(cause));
    }
}

/// A play session over a level catalog
#[derive(Debug, Clone)]
pub struct Session {
    catalog: LevelCatalog,
    level_index: usize,
    field: Playfield,
    phase: GamePhase,
}

impl Session {
    /// Start at the first level
    pub fn new(catalog: LevelCatalog) -> Self {
        let field = catalog.first_playfield();
        log::info!("Level 1 of {} loaded ({} orbs)", catalog.len(), field.remaining_goals);
        Self {
            catalog,
            level_index: 0,
            field,
            phase: GamePhase::Playing,
        }
    }

    /// Start at `level` (0-based)
    pub fn with_start_level(catalog: LevelCatalog, level: usize) -> Result<Self, LevelError> {
        let field = catalog.playfield(level).ok_or(LevelError::NoSuchLevel(level))?;
        log::info!("Level {} of {} loaded ({} orbs)", level + 1, catalog.len(), field.remaining_goals);
        Ok(Self {
            catalog,
            level_index: level,
            field,
            phase: GamePhase::Playing,
        })
    }

    pub fn board(&self) -> &Board {
        &self.field.board
    }

    pub fn playfield(&self) -> &Playfield {
        &self.field
    }

    pub fn player_position(&self) -> Pos {
        self.field.player
    }

    pub fn remaining_goals(&self) -> i32 {
        self.field.remaining_goals
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Full scan for orbs on the current board
    pub fn count_orbs(&self) -> usize {
        self.field.board.count(TileKind::Orb)
    }

    /// Cells that currently need gravity handling
    pub fn gravity_watch_list(&self) -> Vec<Pos> {
        gravity::watch_list(&self.field.board)
    }

    /// Cells that currently hold a mummy
    pub fn pursuer_watch_list(&self) -> Vec<Pos> {
        pursuit::watch_list(&self.field.board)
    }

    /// Apply one player action
    pub fn move_player(&mut self, dir: Direction) -> Vec<GameEvent> {
        if self.phase.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();
        movement::resolve(&mut self.field, dir, &mut events);
        self.settle(events)
    }

    /// Let every unsupported bomb, rock and orb fall one row
    pub fn gravity_tick(&mut self) -> Vec<GameEvent> {
        if self.phase.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();
        let watch = self.gravity_watch_list();
        gravity::advance(&mut self.field, &watch, &mut events);
        self.settle(events)
    }

    /// Move every mummy one step toward the player
    pub fn pursuit_tick(&mut self) -> Vec<GameEvent> {
        if self.phase.is_terminal() {
            return Vec::new();
        }
        let mut events = Vec::new();
        let watch = self.pursuer_watch_list();
        pursuit::advance(&mut self.field, &watch, &mut events);
        self.settle(events)
    }

    /// Load the next level, or finish the game after the last one
    pub fn advance_level(&mut self) -> GameEvent {
        let next = self.level_index + 1;
        match self.catalog.playfield(next) {
            Some(field) => {
                self.level_index = next;
                self.field = field;
                self.phase = GamePhase::Playing;
                log::info!(
                    "Level {} of {} loaded ({} orbs)",
                    next + 1,
                    self.catalog.len(),
                    self.field.remaining_goals
                );
                GameEvent::LevelAdvanced { level: next }
            }
            None => {
                self.phase = GamePhase::Won;
                log::info!("All {} levels cleared", self.catalog.len());
                GameEvent::GameWon
            }
        }
    }

    /// Reload the current level from the catalog and resume play
    pub fn restart_level(&mut self) {
        if let Some(field) = self.catalog.playfield(self.level_index) {
            self.field = field;
            self.phase = GamePhase::Playing;
            log::info!("Level {} restarted", self.level_index + 1);
        }
    }

    /// Back to the first level
    pub fn new_game(&mut self) {
        self.level_index = 0;
        self.field = self.catalog.first_playfield();
        self.phase = GamePhase::Playing;
        log::info!("New game");
    }

    /// Turn a step's events into session transitions
    ///
    /// Only the first loss of a step is reported; later ones are dropped.
    fn settle(&mut self, mut events: Vec<GameEvent>) -> Vec<GameEvent> {
        let mut lost = None;
        events.retain(|e| match e {
            GameEvent::GameOver(cause) if lost.is_none() => {
                lost = Some(*cause);
                true
            }
            GameEvent::GameOver(_) => false,
            _ => true,
        });

        if let Some(cause) = lost {
            log::info!("Game over on level {}: {:?}", self.level_index + 1, cause);
            self.phase = GamePhase::GameOver;
        } else if events.contains(&GameEvent::LevelComplete) {
            log::info!("Level {} complete", self.level_index + 1);
            let next = self.advance_level();
            events.push(next);
        }
        events
    }
}
