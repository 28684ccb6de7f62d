//! Board grids, worm storage, and the interaction rules between worms.
//!
//! The [`Arena`] owns everything shared: the passive grid of carrots and
//! remains, the screen grid handed to displays, the worm slots, the live
//! counters, and the random number generator. Worms reach into it only
//! through the [`Habitat`] view the arena builds for each acting worm.
//!
//! # Modules
//!
//! - [`arena`] -- Worm slots, victim lookup, slicing, eating, and the
//!   per-step update
//! - [`grid`] -- A board-sized grid of [`Cell`]s
//! - [`population`] -- Run sizing and population snapshots
//! - [`sayings`] -- Built-in sayings carried by new worms
//!
//! [`Cell`]: wormsim_types::Cell
//! [`Habitat`]: wormsim_agents::Habitat

pub mod arena;
pub mod grid;
pub mod population;
pub mod sayings;

pub use arena::Arena;
pub use grid::Grid;
pub use population::{Population, PopulationStats};
pub use sayings::SAYINGS;
