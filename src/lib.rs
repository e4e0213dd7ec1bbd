//! Slide-Rust: a sliding-tile merge puzzle engine (2048 family).
//!
//! This crate provides the grid/tile core of the puzzle: the board data
//! model, the compact-and-merge move algorithm, win and dead-board
//! detection, and seeded random tile insertion. Rendering, input handling,
//! and persistence are left to the surrounding application.
//!
//! ## Modules
//!
//! - [`tile`] - Tile values (powers of two) and their successor relation
//! - [`direction`] - The four move directions and their axis parameters
//! - [`grid`] - Board state, slide/merge algorithm, legality queries
//! - [`game`] - Score keeping and the move/spawn/terminal cycle
//!
//! ## Example
//!
//! ```
//! use slide_rust::direction::MoveDirection;
//! use slide_rust::grid::Grid;
//!
//! // A 4x4 board played up to the 2048 tile, with a fixed seed.
//! let mut grid = Grid::with_rng(4, 2048, fastrand::Rng::with_seed(1)).unwrap();
//! grid.add_random_tile().unwrap();
//! grid.add_random_tile().unwrap();
//!
//! for direction in MoveDirection::ALL {
//!     if grid.can_slide_tiles(direction) {
//!         let points = grid.slide_tiles(direction);
//!         println!("slid {direction}, scored {points}");
//!         break;
//!     }
//! }
//! ```

pub mod direction;
pub mod game;
pub mod grid;
pub mod tile;
