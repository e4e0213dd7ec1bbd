//! Board state and the slide/merge algorithm.
//!
//! This module provides the core game logic for the sliding-tile puzzle:
//! - Square board of optional tiles with validated configuration
//! - Compact-and-merge moves along rows or columns, in either direction
//! - Move legality queries used for game-over detection
//! - Random tile insertion with an injectable, seedable RNG
//!
//! The board is one canonical row-major `Vec<Option<Tile>>`; column access
//! is strided over the same storage, so the row view and the column view
//! can never disagree.

use std::fmt;

use crate::direction::MoveDirection;
use crate::tile::Tile;

/// Configuration and operation failures.
///
/// Every variant is a precondition violation at the call that introduced
/// it; no variant represents a recoverable in-game condition. Running out
/// of legal moves or reaching the goal are reported by boolean queries,
/// never as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Board side length below the minimum of 2.
    LengthTooSmall { length: usize },
    /// Board too small for the goal tile to ever be assembled.
    LengthTooSmallForGoal {
        length: usize,
        goal: u64,
        minimum: usize,
    },
    /// Goal value is not a power of two, or is below 8.
    InvalidGoalValue { goal: u64 },
    /// Goal value exceeds what a board of this length can produce.
    GoalTooLargeForLength { goal: u64, length: usize },
    /// `add_random_tile` called with no empty cell left.
    BoardFilled,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::LengthTooSmall { length } => {
                write!(f, "length {length} is too small to slide tiles (minimum 2)")
            }
            GridError::LengthTooSmallForGoal {
                length,
                goal,
                minimum,
            } => write!(
                f,
                "length {length} is too small to reach a goal tile of {goal} \
                 (minimum {minimum})"
            ),
            GridError::InvalidGoalValue { goal } => {
                write!(f, "goal tile value {goal} must be a power of two >= 8")
            }
            GridError::GoalTooLargeForLength { goal, length } => write!(
                f,
                "goal tile value {goal} is too large for a board of length {length}"
            ),
            GridError::BoardFilled => {
                write!(f, "cannot add a random tile to a filled board")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Smallest `m` with `m * m >= n`.
fn ceil_sqrt(n: usize) -> usize {
    let root = n.isqrt();
    if root * root < n { root + 1 } else { root }
}

/// Checks a `(length, goal)` pair against every configuration invariant.
///
/// Called before any state is touched, so a failed reconfiguration leaves
/// the previous valid state intact.
fn validate(length: usize, goal_tile_value: u64) -> Result<(), GridError> {
    if length < 2 {
        return Err(GridError::LengthTooSmall { length });
    }
    if goal_tile_value < 8 || !goal_tile_value.is_power_of_two() {
        return Err(GridError::InvalidGoalValue {
            goal: goal_tile_value,
        });
    }

    // A goal of 2^k needs k merges chained from 2's, which needs at least
    // ceil(sqrt(k - 1)) cells per side.
    let exponent = goal_tile_value.trailing_zeros() as usize;
    let minimum = ceil_sqrt(exponent - 1);
    if length < minimum {
        return Err(GridError::LengthTooSmallForGoal {
            length,
            goal: goal_tile_value,
            minimum,
        });
    }

    // Upper bound: the goal must stay below the value of every cell's worth
    // of 2's merged into a single tile. Boards of length >= 8 can produce
    // any representable tile.
    let cells = length * length;
    if cells < u64::BITS as usize && goal_tile_value >= 1u64 << cells {
        return Err(GridError::GoalTooLargeForLength {
            goal: goal_tile_value,
            length,
        });
    }

    Ok(())
}

/// A square board of sliding tiles.
///
/// The grid is the sole mutator of board state. A surrounding application
/// drives it through a narrow contract: query a cell, check move legality,
/// execute a move, insert a random tile, poll for the terminal conditions.
pub struct Grid {
    length: usize,
    goal_tile_value: u64,
    /// Row-major board: `cells[row * length + column]`.
    cells: Vec<Option<Tile>>,
    goal_tile_created: bool,
    rng: fastrand::Rng,
}

impl Default for Grid {
    /// The classic configuration: 4x4 up to 2048.
    fn default() -> Self {
        Self {
            length: Self::DEFAULT_LENGTH,
            goal_tile_value: Self::DEFAULT_GOAL,
            cells: vec![None; Self::DEFAULT_LENGTH * Self::DEFAULT_LENGTH],
            goal_tile_created: false,
            rng: fastrand::Rng::new(),
        }
    }
}

impl Grid {
    pub const DEFAULT_LENGTH: usize = 4;
    pub const DEFAULT_GOAL: u64 = 2048;

    /// Creates an empty grid, validating the configuration first.
    pub fn new(length: usize, goal_tile_value: u64) -> Result<Grid, GridError> {
        Self::with_rng(length, goal_tile_value, fastrand::Rng::new())
    }

    /// Creates an empty grid with an explicit random source.
    ///
    /// Pass a seeded `fastrand::Rng` to make `add_random_tile` fully
    /// deterministic and reproducible.
    pub fn with_rng(
        length: usize,
        goal_tile_value: u64,
        rng: fastrand::Rng,
    ) -> Result<Grid, GridError> {
        validate(length, goal_tile_value)?;
        Ok(Grid {
            length,
            goal_tile_value,
            cells: vec![None; length * length],
            goal_tile_created: false,
            rng,
        })
    }

    /// The side dimension of the board.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Reconfigures the side dimension. Validates against the current goal
    /// value before touching anything, then reallocates and clears.
    pub fn set_length(&mut self, length: usize) -> Result<(), GridError> {
        validate(length, self.goal_tile_value)?;
        self.length = length;
        self.cells = vec![None; length * length];
        self.goal_tile_created = false;
        Ok(())
    }

    /// The tile value that ends the game in a win when assembled.
    pub fn goal_tile_value(&self) -> u64 {
        self.goal_tile_value
    }

    /// Reconfigures the goal value. Validates against the current length
    /// before touching anything, then clears the board.
    pub fn set_goal_tile_value(&mut self, goal_tile_value: u64) -> Result<(), GridError> {
        validate(self.length, goal_tile_value)?;
        self.goal_tile_value = goal_tile_value;
        self.clear();
        Ok(())
    }

    /// True once a merge has produced the goal tile; latched until
    /// [`Grid::clear`].
    pub fn goal_tile_created(&self) -> bool {
        self.goal_tile_created
    }

    fn idx(&self, column: usize, row: usize) -> usize {
        assert!(
            column < self.length && row < self.length,
            "cell ({column}, {row}) out of range on a {len}x{len} board",
            len = self.length
        );
        row * self.length + column
    }

    /// The tile at the given cell, or `None` for an empty cell.
    ///
    /// # Panics
    /// Out-of-range indices are a programming error and panic.
    pub fn tile_at(&self, column: usize, row: usize) -> Option<Tile> {
        self.cells[self.idx(column, row)]
    }

    /// Sets a cell directly. Used to arrange positions in tests.
    #[cfg(test)]
    pub(crate) fn set_tile(&mut self, column: usize, row: usize, tile: Option<Tile>) {
        let i = self.idx(column, row);
        self.cells[i] = tile;
    }

    /// Empties every cell and resets the win flag.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
        self.goal_tile_created = false;
    }

    /// True iff every cell holds a tile.
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Places a tile on a uniformly random empty cell: value 2 with
    /// probability 9/10, value 4 with probability 1/10.
    ///
    /// Samples directly over the empty cells, so the cost stays bounded
    /// even on a nearly full board.
    pub fn add_random_tile(&mut self) -> Result<(), GridError> {
        let empty: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.is_none().then_some(i))
            .collect();
        if empty.is_empty() {
            return Err(GridError::BoardFilled);
        }

        let cell = empty[self.rng.usize(..empty.len())];
        let tile = if self.rng.u32(0..10) == 0 {
            Tile::FOUR
        } else {
            Tile::TWO
        };
        self.cells[cell] = Some(tile);
        Ok(())
    }

    /// True iff sliding in `direction` would change at least one cell.
    /// Pure query, no mutation.
    pub fn can_slide_tiles(&self, direction: MoveDirection) -> bool {
        (0..self.length).any(|index| self.can_slide_line(direction, index))
    }

    /// True iff at least one of the four directions is a legal move.
    /// Combined with [`Grid::is_filled`] this is the "no moves left" check.
    pub fn can_slide_in_any_direction(&self) -> bool {
        MoveDirection::ALL
            .iter()
            .any(|&direction| self.can_slide_tiles(direction))
    }

    /// Executes a move: every line along the direction's axis is compacted
    /// toward the travel end and adjacent equal tiles are merged pairwise.
    ///
    /// Returns the sum of the values of all newly created merged tiles.
    /// Calling this when [`Grid::can_slide_tiles`] is false is a safe
    /// no-op returning 0.
    pub fn slide_tiles(&mut self, direction: MoveDirection) -> u64 {
        (0..self.length)
            .map(|index| self.slide_line(direction, index))
            .sum()
    }

    /// Reads line `index` (a column when `along_columns`, else a row) as a
    /// contiguous sequence, index 0 first.
    fn line(&self, along_columns: bool, index: usize) -> Vec<Option<Tile>> {
        (0..self.length)
            .map(|i| {
                if along_columns {
                    self.cells[i * self.length + index]
                } else {
                    self.cells[index * self.length + i]
                }
            })
            .collect()
    }

    /// Writes a full line back, mirroring the access order of [`Grid::line`].
    fn store_line(&mut self, along_columns: bool, index: usize, line: &[Option<Tile>]) {
        for (i, &tile) in line.iter().enumerate() {
            let cell = if along_columns {
                i * self.length + index
            } else {
                index * self.length + i
            };
            self.cells[cell] = tile;
        }
    }

    /// Legality scan for a single line: the same walk as [`Grid::slide_line`]
    /// but it stops at the first tile that would move or merge, and writes
    /// nothing.
    fn can_slide_line(&self, direction: MoveDirection, index: usize) -> bool {
        let mut line = self.line(direction.slides_along_columns(), index);
        if !direction.toward_index_zero() {
            line.reverse();
        }

        // `settled` counts tiles already at their final travel-order slot.
        let mut settled = 0;
        let mut last: Option<Tile> = None;
        for (position, &cell) in line.iter().enumerate() {
            if let Some(tile) = cell {
                if last == Some(tile) || position != settled {
                    return true;
                }
                last = Some(tile);
                settled += 1;
            }
        }
        false
    }

    /// Compacts and merges one line in travel order.
    ///
    /// Single greedy pass: each non-empty source tile either merges into
    /// the previously written slot (once per slot, no chained merges) or
    /// is written at the cursor. Cells past the cursor end up empty.
    fn slide_line(&mut self, direction: MoveDirection, index: usize) -> u64 {
        let along_columns = direction.slides_along_columns();
        let mut line = self.line(along_columns, index);
        if !direction.toward_index_zero() {
            line.reverse();
        }

        let mut slid: Vec<Option<Tile>> = vec![None; self.length];
        let mut sum = 0;
        let mut write = 0;
        let mut may_merge = false;
        for cell in line {
            if let Some(tile) = cell {
                if may_merge && slid[write - 1] == Some(tile) {
                    let merged = tile.next();
                    slid[write - 1] = Some(merged);
                    sum += merged.value();
                    // One merge per output slot: a merged tile cannot
                    // absorb a second source tile in the same move.
                    may_merge = false;
                    if merged.value() == self.goal_tile_value {
                        self.goal_tile_created = true;
                    }
                } else {
                    slid[write] = Some(tile);
                    write += 1;
                    may_merge = true;
                }
            }
        }

        if !direction.toward_index_zero() {
            slid.reverse();
        }
        self.store_line(along_columns, index, &slid);
        sum
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.length {
            for column in 0..self.length {
                match self.tile_at(column, row) {
                    Some(tile) => write!(f, "{:>6} ", tile.value())?,
                    None => write!(f, "{:>6} ", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
