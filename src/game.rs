//! Game orchestration: score keeping and the move/spawn/terminal cycle.
//!
//! [`Game`] wraps a [`Grid`] and drives the standard round: check the move
//! is legal, slide, accumulate score, detect win or dead board, spawn a
//! random tile, re-check for a dead board. Presentation, timers, and
//! persistence of the high score belong to the surrounding application;
//! only the in-memory state lives here.

use crate::direction::MoveDirection;
use crate::grid::{Grid, GridError};

/// A running game on top of a [`Grid`].
pub struct Game {
    grid: Grid,
    score: u64,
    high_score: u64,
    game_over: bool,
    game_won: bool,
}

impl Game {
    /// Starts a game on the given grid: the board is cleared and two
    /// random tiles are placed.
    pub fn new(mut grid: Grid) -> Game {
        grid.clear();
        let mut game = Game {
            grid,
            score: 0,
            high_score: 0,
            game_over: false,
            game_won: false,
        };
        game.start();
        game
    }

    fn start(&mut self) {
        self.game_over = false;
        self.game_won = false;
        self.score = 0;
        // A cleared board has at least 4 cells, so two spawns cannot fail.
        self.grid.add_random_tile().ok();
        self.grid.add_random_tile().ok();
    }

    /// Attempts a move. Returns false (and changes nothing) when the game
    /// is over or the move would not change the board.
    ///
    /// A successful move slides the tiles, adds the merge sum to the
    /// score, then either ends the game (goal reached, or no direction
    /// slidable) or spawns a random tile and re-checks for a dead board.
    pub fn make_move(&mut self, direction: MoveDirection) -> bool {
        if self.game_over || !self.grid.can_slide_tiles(direction) {
            return false;
        }

        let move_score = self.grid.slide_tiles(direction);
        self.add_score(move_score);

        if self.grid.goal_tile_created() || !self.grid.can_slide_in_any_direction() {
            self.game_won = self.grid.goal_tile_created();
            self.game_over = true;
        } else {
            // A legal slide always frees at least one cell.
            self.grid.add_random_tile().ok();
            if !self.grid.can_slide_in_any_direction() {
                self.game_over = true;
            }
        }

        true
    }

    fn add_score(&mut self, points: u64) {
        if points != 0 {
            self.score += points;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
        }
    }

    /// Clears the board and starts over. The high score survives.
    pub fn new_game(&mut self) {
        self.grid.clear();
        self.start();
    }

    /// Reconfigures the board length and starts a new game.
    pub fn set_length(&mut self, length: usize) -> Result<(), GridError> {
        self.grid.set_length(length)?;
        self.new_game();
        Ok(())
    }

    /// Reconfigures the goal tile value and starts a new game.
    pub fn set_goal_tile_value(&mut self, goal_tile_value: u64) -> Result<(), GridError> {
        self.grid.set_goal_tile_value(goal_tile_value)?;
        self.new_game();
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Points accumulated this game: the sum of every merged tile's value.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Best score across all games played on this instance.
    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// True when the game ended by assembling the goal tile.
    pub fn is_won(&self) -> bool {
        self.game_won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    fn seeded_game(length: usize, goal: u64, seed: u64) -> Game {
        Game::new(Grid::with_rng(length, goal, fastrand::Rng::with_seed(seed)).unwrap())
    }

    fn tile_count(grid: &Grid) -> usize {
        let mut count = 0;
        for row in 0..grid.length() {
            for column in 0..grid.length() {
                if grid.tile_at(column, row).is_some() {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_new_game_starts_with_two_tiles_and_zero_score() {
        let game = seeded_game(4, 2048, 1);
        assert_eq!(tile_count(game.grid()), 2);
        assert_eq!(game.score(), 0);
        assert!(!game.is_over());
        assert!(!game.is_won());
    }

    #[test]
    fn test_move_against_a_wall_with_nothing_to_slide_is_rejected() {
        let mut game = seeded_game(4, 2048, 1);
        let mut rejected = None;
        for direction in MoveDirection::ALL {
            if !game.grid().can_slide_tiles(direction) {
                rejected = Some(direction);
                break;
            }
        }
        // Two tiles on a 4x4 board cannot block every direction, but some
        // layouts settle against a wall; only assert when one exists.
        if let Some(direction) = rejected {
            let before = game.score();
            assert!(!game.make_move(direction));
            assert_eq!(game.score(), before);
        }
    }

    #[test]
    fn test_successful_move_spawns_a_tile() {
        let mut game = seeded_game(4, 2048, 1);
        let direction = MoveDirection::ALL
            .into_iter()
            .find(|&d| game.grid().can_slide_tiles(d))
            .unwrap();

        let before = tile_count(game.grid());
        assert!(game.make_move(direction));

        // Tiles merged (count drops) or just moved (count steady), then
        // exactly one tile spawned.
        assert!(tile_count(game.grid()) <= before + 1);
        assert!(tile_count(game.grid()) >= 2);
    }

    #[test]
    fn test_high_score_survives_new_game() {
        let mut game = seeded_game(2, 8, 3);
        play_until_over(&mut game);
        let high = game.high_score();

        game.new_game();
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), high);
        assert!(!game.is_over());
        assert_eq!(tile_count(game.grid()), 2);
    }

    #[test]
    fn test_game_reaches_a_consistent_terminal_state() {
        let mut game = seeded_game(2, 8, 5);
        play_until_over(&mut game);

        assert!(game.is_over());
        if game.is_won() {
            assert!(game.grid().goal_tile_created());
        } else {
            // Not won and no move left: the board must be jammed full.
            assert!(game.grid().is_filled());
            assert!(!game.grid().can_slide_in_any_direction());
        }

        // No move is accepted once the game is over.
        for direction in MoveDirection::ALL {
            assert!(!game.make_move(direction));
        }
    }

    #[test]
    fn test_score_equals_total_merge_sum() {
        let mut game = seeded_game(4, 2048, 11);
        play_until_over(&mut game);

        // The score is a sum of merged tile values, each of which is at
        // least 4 and even.
        assert!(game.score() % 2 == 0);
        assert_eq!(game.score(), game.high_score());

        // Total board value must be explainable by spawns of 2's and 4's.
        let mut total = 0;
        for row in 0..4 {
            for column in 0..4 {
                total += game.grid().tile_at(column, row).map_or(0, Tile::value);
            }
        }
        assert!(total % 2 == 0);
    }

    #[test]
    fn test_reconfiguring_restarts_the_game() {
        let mut game = seeded_game(4, 2048, 1);
        play_moves(&mut game, 5);

        game.set_length(5).unwrap();
        assert_eq!(game.grid().length(), 5);
        assert_eq!(game.score(), 0);
        assert_eq!(tile_count(game.grid()), 2);

        game.set_goal_tile_value(1024).unwrap();
        assert_eq!(game.grid().goal_tile_value(), 1024);
        assert_eq!(tile_count(game.grid()), 2);
    }

    #[test]
    fn test_invalid_reconfiguration_is_rejected_and_game_continues() {
        let mut game = seeded_game(4, 2048, 1);
        assert!(game.set_length(2).is_err());
        assert_eq!(game.grid().length(), 4);
        assert!(!game.is_over());
    }

    fn play_moves(game: &mut Game, count: usize) {
        let mut rng = fastrand::Rng::with_seed(99);
        let mut played = 0;
        while played < count && !game.is_over() {
            let direction = MoveDirection::ALL[rng.usize(..4)];
            if game.make_move(direction) {
                played += 1;
            }
        }
    }

    fn play_until_over(game: &mut Game) {
        let mut rng = fastrand::Rng::with_seed(99);
        let mut stalled = 0;
        while !game.is_over() && stalled < 10_000 {
            let direction = MoveDirection::ALL[rng.usize(..4)];
            if game.make_move(direction) {
                stalled = 0;
            } else {
                stalled += 1;
            }
        }
        assert!(game.is_over(), "random play should reach a terminal state");
    }
}
