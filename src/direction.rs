//! Move directions and the axis parameters they map to.
//!
//! A direction is a pure classifier: it tells the grid which axis is being
//! compacted (columns for Up/Down, rows for Left/Right) and which end of
//! each line tiles travel toward (index 0 for Up/Left). All slide logic
//! lives in [`grid`](crate::grid); this module only names the four cases.

use std::fmt;
use std::str::FromStr;

/// One of the four moves a player can make.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    /// All four directions, in a fixed order. Used for "any move left?"
    /// scans and for random move selection.
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Up,
        MoveDirection::Down,
        MoveDirection::Left,
        MoveDirection::Right,
    ];

    /// True when the lines being compacted are columns (Up/Down),
    /// false when they are rows (Left/Right).
    pub fn slides_along_columns(self) -> bool {
        matches!(self, MoveDirection::Up | MoveDirection::Down)
    }

    /// True when tiles travel toward index 0 of their line (Up/Left),
    /// false when they travel toward the far end (Down/Right).
    pub fn toward_index_zero(self) -> bool {
        matches!(self, MoveDirection::Up | MoveDirection::Left)
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
        };
        write!(f, "{name}")
    }
}

/// Error returned when a direction string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction: {:?}", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for MoveDirection {
    type Err = ParseDirectionError;

    /// Parses a direction from its full name or first letter,
    /// case-insensitively: "up"/"u", "down"/"d", "left"/"l", "right"/"r".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(MoveDirection::Up),
            "down" | "d" => Ok(MoveDirection::Down),
            "left" | "l" => Ok(MoveDirection::Left),
            "right" | "r" => Ok(MoveDirection::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}
