//! Checkers-Rust: a checkers (draughts) rules engine.
//!
//! This crate implements the rules of checkers on a rectangular board of
//! any size from 3x5 up, together with the turn state machine that drives a
//! game between two players to its end.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, move offsets and timing defaults
//! - [`piece`] - Sides and piece values
//! - [`board`] - Board state, move legality, captures and promotion
//! - [`game`] - Turn state machine and the [`game::Player`] trait
//! - [`player`] - Click-driven human and random computer players
//! - [`driver`] - Fixed-timestep and headless game loops
//! - [`terminal`] - Text frontend for playing in a terminal
//!
//! ## Example
//!
//! ```
//! use checkers_rust::board::Board;
//! use checkers_rust::driver::run_headless;
//! use checkers_rust::game::{Game, GameOptions};
//! use checkers_rust::piece::Side;
//! use checkers_rust::player::RandomPlayer;
//!
//! let mut game = Game::new(
//!     Board::new(8, 8).unwrap(),
//!     Box::new(RandomPlayer::instant(Side::White, 1)),
//!     Box::new(RandomPlayer::instant(Side::Black, 2)),
//!     GameOptions::default(),
//! );
//! let winner = run_headless(&mut game, 100_000).unwrap();
//! println!("{winner:?} after {} moves", game.state().moves_played());
//! ```

pub mod board;
pub mod constants;
pub mod driver;
pub mod game;
pub mod piece;
pub mod player;
pub mod terminal;
