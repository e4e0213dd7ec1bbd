//! Slide-Rust: a sliding-tile merge puzzle engine.
//!
//! ## Usage
//!
//! - `slide-rust` - Play a short scripted demo game
//! - `slide-rust demo --moves "l,u,l,d"` - Demo with a custom move script
//! - `slide-rust selfplay --games 100 --seed 7` - Seeded random games with
//!   score statistics

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use slide_rust::direction::MoveDirection;
use slide_rust::game::Game;
use slide_rust::grid::Grid;

/// Slide-Rust: a sliding-tile merge puzzle engine
#[derive(Parser)]
#[command(name = "slide-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scripted sequence of moves on a seeded board
    Demo {
        /// Comma-separated moves: up/down/left/right or u/d/l/r
        #[arg(long, default_value = "left,down,left,up,right,down")]
        moves: String,
        /// RNG seed for tile spawns
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
    /// Play seeded random games and report statistics
    Selfplay {
        /// Number of games to play
        #[arg(long, default_value_t = 10)]
        games: u32,
        /// Base RNG seed; game i uses seed + i
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Board side length
        #[arg(long, default_value_t = 4)]
        length: usize,
        /// Goal tile value
        #[arg(long, default_value_t = 2048)]
        goal: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Demo { moves, seed }) => run_demo(&moves, seed),
        Some(Commands::Selfplay {
            games,
            seed,
            length,
            goal,
        }) => run_selfplay(games, seed, length, goal),
        None => run_demo("left,down,left,up,right,down", 7),
    }
}

fn run_demo(moves: &str, seed: u64) -> Result<()> {
    println!("Slide-Rust: sliding-tile merge puzzle engine\n");

    let grid = Grid::with_rng(4, 2048, fastrand::Rng::with_seed(seed))?;
    let mut game = Game::new(grid);

    println!("Starting board (seed {seed}):");
    println!("{}", game.grid());

    for token in moves.split(',') {
        let direction: MoveDirection = token
            .trim()
            .parse()
            .with_context(|| format!("bad move script entry {token:?}"))?;

        if game.make_move(direction) {
            println!("Slid {direction}, score {}:", game.score());
            println!("{}", game.grid());
        } else {
            println!("Cannot slide {direction}, skipping.");
        }

        if game.is_over() {
            break;
        }
    }

    if game.is_won() {
        println!("Goal tile reached! Final score: {}", game.score());
    } else if game.is_over() {
        println!("No moves left. Final score: {}", game.score());
    } else {
        println!("Script finished. Score so far: {}", game.score());
    }
    Ok(())
}

fn run_selfplay(games: u32, seed: u64, length: usize, goal: u64) -> Result<()> {
    println!("Playing {games} random games on a {length}x{length} board up to {goal}...");

    let mut wins = 0u32;
    let mut best_score = 0u64;
    let mut best_tile = 0u64;
    let mut total_score = 0u64;

    for i in 0..games {
        let game_seed = seed + u64::from(i);
        let grid = Grid::with_rng(length, goal, fastrand::Rng::with_seed(game_seed))
            .context("invalid board configuration")?;
        let mut game = Game::new(grid);
        let mut chooser = fastrand::Rng::with_seed(game_seed ^ 0x5eed);

        while !game.is_over() {
            let legal: Vec<MoveDirection> = MoveDirection::ALL
                .into_iter()
                .filter(|&d| game.grid().can_slide_tiles(d))
                .collect();
            // A running game always has a legal move; make_move re-checks.
            game.make_move(legal[chooser.usize(..legal.len())]);
        }

        if game.is_won() {
            wins += 1;
        }
        total_score += game.score();
        best_score = best_score.max(game.score());
        best_tile = best_tile.max(max_tile(game.grid()));
    }

    println!("Games:       {games}");
    println!("Wins:        {wins}");
    println!("Best tile:   {best_tile}");
    println!("Best score:  {best_score}");
    println!("Mean score:  {:.1}", total_score as f64 / f64::from(games));
    Ok(())
}

fn max_tile(grid: &Grid) -> u64 {
    let mut best = 0;
    for row in 0..grid.length() {
        for column in 0..grid.length() {
            if let Some(tile) = grid.tile_at(column, row) {
                best = best.max(tile.value());
            }
        }
    }
    best
}
