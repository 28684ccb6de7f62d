//! Enumeration types for the worms simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight compass directions a worm head can travel in.
///
/// The discriminants run clockwise from north, so turning by `n` steps is
/// `(index + n) % 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Up the screen.
    North,
    /// Up and to the right.
    NorthEast,
    /// To the right.
    East,
    /// Down and to the right.
    SouthEast,
    /// Down the screen.
    South,
    /// Down and to the left.
    SouthWest,
    /// To the left.
    West,
    /// Up and to the left.
    NorthWest,
}

/// Turn offsets a worm draws from at every step, uniformly by index.
///
/// Straight ahead appears 8 times, 45 degrees either way 3 times each,
/// and 90 degrees either way once each (7 and 6 are -1 and -2 mod 8).
pub const TURN_TABLE: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 7, 7, 7, 2, 6];

impl Direction {
    /// Number of compass directions.
    pub const COUNT: u8 = 8;

    /// All directions in clockwise order starting at north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Clockwise index of this direction, `0..8`.
    pub const fn index(self) -> u8 {
        match self {
            Self::North => 0,
            Self::NorthEast => 1,
            Self::East => 2,
            Self::SouthEast => 3,
            Self::South => 4,
            Self::SouthWest => 5,
            Self::West => 6,
            Self::NorthWest => 7,
        }
    }

    /// Direction for a clockwise index; indexes wrap modulo 8.
    pub const fn from_index(index: u8) -> Self {
        match index % Self::COUNT {
            0 => Self::North,
            1 => Self::NorthEast,
            2 => Self::East,
            3 => Self::SouthEast,
            4 => Self::South,
            5 => Self::SouthWest,
            6 => Self::West,
            _ => Self::NorthWest,
        }
    }

    /// The direction reached by turning `offset` eighths clockwise.
    pub const fn turned(self, offset: u8) -> Self {
        Self::from_index(self.index().wrapping_add(offset % Self::COUNT))
    }

    /// Column and row change for one step in this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }
}

// ---------------------------------------------------------------------------
// Worm status
// ---------------------------------------------------------------------------

/// Lifecycle state of a worm. `Dead` and `Eaten` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WormStatus {
    /// Moving, eating, and counted in its kind's live counter.
    Alive,
    /// Starved or reduced to a single segment.
    Dead,
    /// Consumed whole by a cannibal.
    Eaten,
}

impl core::fmt::Display for WormStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Alive => write!(f, "alive"),
            Self::Dead => write!(f, "dead"),
            Self::Eaten => write!(f, "eaten"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_direction() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_index(direction.index()), direction);
        }
    }

    #[test]
    fn turning_wraps_past_north_west() {
        assert_eq!(Direction::NorthWest.turned(1), Direction::North);
        assert_eq!(Direction::North.turned(7), Direction::NorthWest);
        assert_eq!(Direction::North.turned(6), Direction::West);
        assert_eq!(Direction::East.turned(0), Direction::East);
    }

    #[test]
    fn turn_table_is_skewed_towards_straight() {
        let count = |offset: u8| TURN_TABLE.iter().filter(|&&o| o == offset).count();
        assert_eq!(count(0), 8);
        assert_eq!(count(1), 3);
        assert_eq!(count(7), 3);
        assert_eq!(count(2), 1);
        assert_eq!(count(6), 1);
    }

    #[test]
    fn opposite_directions_cancel() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.turned(4).delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn status_display() {
        assert_eq!(WormStatus::Alive.to_string(), "alive");
        assert_eq!(WormStatus::Dead.to_string(), "dead");
        assert_eq!(WormStatus::Eaten.to_string(), "eaten");
    }
}
