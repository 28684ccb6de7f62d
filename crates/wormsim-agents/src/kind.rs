//! Worm kinds and the per-kind live counters.
//!
//! The kind set is closed: every worm is a vegetarian, a scissorhead, or a
//! cannibal. Each kind carries a fixed table of constants and one eating
//! behavior. All kinds graze carrots; scissorheads first try to slice the
//! worm under their head, and cannibals first try to devour it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wormsim_types::Attr;

use crate::habitat::Habitat;
use crate::worm::Worm;

/// Food gained from eating one carrot.
pub const CARROT_FOOD_VALUE: i32 = 2;

/// What a hungry worm does with its turn.
pub type Behavior = fn(&mut Worm, &mut dyn Habitat);

// ---------------------------------------------------------------------------
// WormKind
// ---------------------------------------------------------------------------

/// The three worm kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WormKind {
    /// Eats carrots only.
    Vegetarian,
    /// Slices other worms in two, then eats carrots.
    Scissorhead,
    /// Devours other living worms, then eats carrots.
    Cannibal,
}

impl WormKind {
    /// Number of kinds.
    pub const COUNT: usize = 3;

    /// Every kind, in counter order.
    pub const ALL: [Self; Self::COUNT] = [Self::Vegetarian, Self::Scissorhead, Self::Cannibal];

    /// Food a single segment of this kind can store.
    pub const fn capacity(self) -> i32 {
        match self {
            Self::Vegetarian => 3,
            Self::Scissorhead => 4,
            Self::Cannibal => 5,
        }
    }

    /// Food a single segment of this kind yields when devoured.
    pub const fn food_value(self) -> i32 {
        match self {
            Self::Vegetarian => 3,
            Self::Scissorhead => 5,
            Self::Cannibal => 4,
        }
    }

    /// Display attribute for a living worm of this kind.
    pub const fn attr(self) -> Attr {
        match self {
            Self::Vegetarian => Attr::Vegetarian,
            Self::Scissorhead => Attr::Scissorhead,
            Self::Cannibal => Attr::Cannibal,
        }
    }

    /// Eating behavior run whenever a worm of this kind is hungry.
    pub const fn behavior(self) -> Behavior {
        match self {
            Self::Vegetarian => graze,
            Self::Scissorhead => slice_then_graze,
            Self::Cannibal => devour_then_graze,
        }
    }

    /// Kind at `index`, wrapping past the last kind.
    pub const fn from_index(index: usize) -> Self {
        match index % Self::COUNT {
            0 => Self::Vegetarian,
            1 => Self::Scissorhead,
            _ => Self::Cannibal,
        }
    }

    /// A uniformly chosen kind.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_index(rng.random_range(0..Self::COUNT))
    }

    const fn slot(self) -> usize {
        match self {
            Self::Vegetarian => 0,
            Self::Scissorhead => 1,
            Self::Cannibal => 2,
        }
    }
}

impl core::fmt::Display for WormKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Vegetarian => write!(f, "vegetarian"),
            Self::Scissorhead => write!(f, "scissorhead"),
            Self::Cannibal => write!(f, "cannibal"),
        }
    }
}

fn graze(worm: &mut Worm, habitat: &mut dyn Habitat) {
    if habitat.try_to_eat_carrot_at(worm.head().position) {
        worm.feed(CARROT_FOOD_VALUE);
    }
}

fn slice_then_graze(worm: &mut Worm, habitat: &mut dyn Habitat) {
    habitat.slice_victim_for(worm);
    graze(worm, habitat);
}

fn devour_then_graze(worm: &mut Worm, habitat: &mut dyn Habitat) {
    let gained = habitat.eat_victim_for(worm);
    worm.feed(gained);
    graze(worm, habitat);
}

// ---------------------------------------------------------------------------
// KindRegistry
// ---------------------------------------------------------------------------

/// Number of living worms of each kind.
///
/// Counters move only through worm lifecycle transitions: construction
/// records a birth, and the first transition out of `Alive` records a
/// loss. A counter can never go below zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindRegistry {
    live: [u32; WormKind::COUNT],
}

impl KindRegistry {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            live: [0; WormKind::COUNT],
        }
    }

    /// Living worms of `kind`.
    pub fn count(&self, kind: WormKind) -> u32 {
        self.live.get(kind.slot()).copied().unwrap_or(0)
    }

    /// Living worms of every kind.
    pub fn total(&self) -> u32 {
        self.live.iter().fold(0_u32, |sum, n| sum.saturating_add(*n))
    }

    /// Zero every counter, ahead of a fresh population.
    pub const fn reset(&mut self) {
        self.live = [0; WormKind::COUNT];
    }

    pub(crate) fn record_birth(&mut self, kind: WormKind) {
        if let Some(count) = self.live.get_mut(kind.slot()) {
            *count = count.saturating_add(1);
        }
    }

    pub(crate) fn record_loss(&mut self, kind: WormKind) {
        if let Some(count) = self.live.get_mut(kind.slot()) {
            assert!(*count > 0, "live {kind} counter would drop below zero");
            *count = count.saturating_sub(1);
        }
    }
}
