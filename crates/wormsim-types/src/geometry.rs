//! Board coordinates and dimensions.
//!
//! The board is a torus: stepping off one edge re-enters on the opposite
//! edge, independently per axis. Segment contiguity is judged with the same
//! wraparound in mind, so a segment on column 0 is a neighbour of a segment
//! on the last column.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// Largest board width any arena will allocate.
pub const MAX_BOARD_WIDTH: u16 = 100;

/// Largest board height any arena will allocate.
pub const MAX_BOARD_HEIGHT: u16 = 100;

/// A cell coordinate on the board. `x` grows east, `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, `0..width`.
    pub x: u16,
    /// Row, `0..height`.
    pub y: u16,
}

impl Position {
    /// Create a position from a column and a row.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The position one cell away in `direction`, wrapping each axis
    /// independently at the board edges.
    pub fn stepped(self, direction: Direction, size: BoardSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: wrap_axis(self.x, dx, size.width),
            y: wrap_axis(self.y, dy, size.height),
        }
    }

    /// Whether `self` and `other` may be adjacent body segments.
    ///
    /// Each axis may differ by at most one cell, or by a full wraparound
    /// jump (`extent - 1`). Identical positions count as contiguous since a
    /// freshly created worm stacks every segment on one cell.
    pub const fn touches(self, other: Self, size: BoardSize) -> bool {
        axis_touches(self.x.abs_diff(other.x), size.width)
            && axis_touches(self.y.abs_diff(other.y), size.height)
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Actual dimensions of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSize {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
}

impl BoardSize {
    /// Create a board size, clamping each axis to `1..=MAX_BOARD_*`.
    pub fn clamped(width: u16, height: u16) -> Self {
        Self {
            width: width.clamp(1, MAX_BOARD_WIDTH),
            height: height.clamp(1, MAX_BOARD_HEIGHT),
        }
    }

    /// Whether `at` lies inside the board.
    pub const fn contains(self, at: Position) -> bool {
        at.x < self.width && at.y < self.height
    }

    /// Number of cells on the board.
    pub fn area(self) -> usize {
        usize::from(self.width).saturating_mul(usize::from(self.height))
    }
}

fn wrap_axis(value: u16, delta: i8, extent: u16) -> u16 {
    match delta.signum() {
        -1 => value
            .checked_sub(1)
            .unwrap_or_else(|| extent.saturating_sub(1)),
        1 => {
            let next = value.saturating_add(1);
            if next >= extent { 0 } else { next }
        }
        _ => value,
    }
}

const fn axis_touches(delta: u16, extent: u16) -> bool {
    delta <= 1 || delta >= extent.saturating_sub(1)
}
