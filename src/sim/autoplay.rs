//! Seeded idle player
//!
//! Picks directions from a PCG stream, so the same seed on the same level
//! always plays out the same way.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::tick::TickInput;
use super::tile::Direction;

#[derive(Debug, Clone)]
pub struct Autopilot {
    seed: u64,
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn next_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.random_range(0..Direction::ALL.len())]
    }

    /// Input for one driver turn with an autopilot move
    pub fn input(&mut self, gravity: bool, pursuit: bool) -> TickInput {
        TickInput {
            direction: Some(self.next_direction()),
            gravity,
            pursuit,
        }
    }
}
