//! Board cells: a glyph plus a display attribute tag.
//!
//! The simulation never decides how a cell looks on screen. It only tags
//! each cell with an [`Attr`] and leaves the mapping to colours or styles
//! to whichever display strategy is drawing the board.

use serde::{Deserialize, Serialize};

/// Glyph of an uneaten carrot.
pub const CARROT_GLYPH: char = '.';

/// Glyph carried by body index 0 of every worm; it blanks the cell the
/// tail has just left.
pub const SENTINEL_GLYPH: char = ' ';

/// Display attribute tag attached to every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attr {
    /// Carrots and empty ground.
    Ground,
    /// A live vegetarian worm.
    Vegetarian,
    /// A live scissorhead worm.
    Scissorhead,
    /// A live cannibal worm.
    Cannibal,
    /// Remains of a dead or eaten worm.
    Remains,
    /// The worm picked out by the operator.
    Highlight,
}

/// One square of a board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Character shown in the square.
    pub glyph: char,
    /// Display attribute tag.
    pub attr: Attr,
}

impl Cell {
    /// A fresh carrot.
    pub const CARROT: Self = Self {
        glyph: CARROT_GLYPH,
        attr: Attr::Ground,
    };

    /// Bare ground left behind once a carrot is eaten.
    pub const EMPTY: Self = Self {
        glyph: SENTINEL_GLYPH,
        attr: Attr::Ground,
    };

    /// Create a cell from a glyph and an attribute.
    pub const fn new(glyph: char, attr: Attr) -> Self {
        Self { glyph, attr }
    }

    /// Whether this cell holds an uneaten carrot.
    ///
    /// Remains that happen to carry a `.` glyph are not carrots.
    pub fn is_carrot(self) -> bool {
        self == Self::CARROT
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::CARROT
    }
}
