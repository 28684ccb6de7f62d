//! Shared value types for the worms simulation.
//!
//! Every crate in the workspace speaks in these types: board coordinates
//! and dimensions, compass directions, worm status, and the cells that make
//! up the passive and screen grids.
//!
//! # Modules
//!
//! - [`geometry`] -- [`Position`], [`BoardSize`], and toroidal movement
//! - [`enums`] -- [`Direction`], the turn table, and [`WormStatus`]
//! - [`cell`] -- [`Cell`], display attribute tags ([`Attr`]), and glyphs

pub mod cell;
pub mod enums;
pub mod geometry;

// Re-export all public types at crate root for convenience.
pub use cell::{Attr, CARROT_GLYPH, Cell, SENTINEL_GLYPH};
pub use enums::{Direction, TURN_TABLE, WormStatus};
pub use geometry::{BoardSize, MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH, Position};
