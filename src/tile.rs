//! Tile values: the powers of two that live on the board.
//!
//! A tile is a plain value. Two tiles compare equal iff they hold the same
//! number, and merging two equal tiles produces the successor of either one
//! (double the value). There is no identity beyond the numeric value, so
//! tiles are `Copy` and cheap to pass around.

use std::fmt;

/// A single board tile holding a power of two (2, 4, 8, ...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(u64);

impl Tile {
    /// The lowest tile, spawned nine times out of ten by
    /// [`Grid::add_random_tile`](crate::grid::Grid::add_random_tile).
    pub const TWO: Tile = Tile(2);

    /// The tile spawned roughly one time in ten.
    pub const FOUR: Tile = Tile(4);

    /// The largest representable tile. [`Tile::next`] saturates here
    /// instead of overflowing.
    pub const MAX: Tile = Tile(1 << 63);

    /// Creates a tile from a raw value.
    ///
    /// Returns `None` unless `value` is a power of two >= 2.
    pub fn from_value(value: u64) -> Option<Tile> {
        if value >= 2 && value.is_power_of_two() {
            Some(Tile(value))
        } else {
            None
        }
    }

    /// The numeric value of this tile.
    pub fn value(self) -> u64 {
        self.0
    }

    /// The tile produced when two copies of this tile merge: double the
    /// value, saturating at [`Tile::MAX`].
    pub fn next(self) -> Tile {
        if self == Tile::MAX {
            self
        } else {
            Tile(self.0 << 1)
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
