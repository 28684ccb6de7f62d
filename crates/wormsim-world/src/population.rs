//! How many worms a run starts with, and snapshots of who is alive.

use serde::Serialize;
use wormsim_agents::{KindRegistry, WormKind};

/// Initial population of a run: `min_worms` plus a random extra in
/// `0..worm_variation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Population {
    /// Worms every run starts with.
    pub min_worms: usize,
    /// Upper bound (exclusive) on the random extra worms.
    pub worm_variation: usize,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            min_worms: 3,
            worm_variation: 6,
        }
    }
}

/// Live counts per kind plus the slot high-water mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulationStats {
    /// Living vegetarians.
    pub vegetarians: u32,
    /// Living scissorheads.
    pub scissorheads: u32,
    /// Living cannibals.
    pub cannibals: u32,
    /// Most worm slots in use at once during the run.
    pub high_water_mark: usize,
}

impl PopulationStats {
    /// Snapshot `kinds` together with a high-water mark.
    pub fn capture(kinds: &KindRegistry, high_water_mark: usize) -> Self {
        Self {
            vegetarians: kinds.count(WormKind::Vegetarian),
            scissorheads: kinds.count(WormKind::Scissorhead),
            cannibals: kinds.count(WormKind::Cannibal),
            high_water_mark,
        }
    }

    /// Living worms of `kind`.
    pub const fn count(&self, kind: WormKind) -> u32 {
        match kind {
            WormKind::Vegetarian => self.vegetarians,
            WormKind::Scissorhead => self.scissorheads,
            WormKind::Cannibal => self.cannibals,
        }
    }

    /// Living worms of every kind.
    pub const fn total(&self) -> u32 {
        self.vegetarians
            .saturating_add(self.scissorheads)
            .saturating_add(self.cannibals)
    }
}
