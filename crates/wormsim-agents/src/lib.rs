//! Worm kinds, live counters, and the worm lifecycle.
//!
//! This crate owns everything a single worm does to itself: moving,
//! spending food, deciding when it is hungry, and transitioning between
//! `Alive`, `Dead`, and `Eaten`. Anything that touches shared state (the
//! carrot grid, other worms) goes through the [`Habitat`] trait, which the
//! arena implements.
//!
//! # Modules
//!
//! - [`kind`] -- The closed set of worm kinds, their eating behaviors, and
//!   the [`KindRegistry`] of live counters
//! - [`habitat`] -- The [`Habitat`] capability a worm lives in
//! - [`worm`] -- [`Worm`] and [`Segment`]

pub mod habitat;
pub mod kind;
pub mod worm;

pub use habitat::Habitat;
pub use kind::{Behavior, CARROT_FOOD_VALUE, KindRegistry, WormKind};
pub use worm::{Segment, Worm};
