//! Game engine logic and state management.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameSession`] - Board, falling/next pieces, pause state and game-over reset
//! - [`GameStats`] - Score, level and per-level line counter
//! - [`DropClock`] - Gravity interval per level and the elapsed-time counter
//! - [`PieceGenerator`] - Uniformly random piece sequence
//! - [`PieceSeed`] - Seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`], optionally with a [`PieceSeed`]
//! 2. Feed elapsed time to [`GameSession::tick`]; gravity soft-drops the piece
//! 3. Forward player intents (move, rotate, soft/hard drop, pause)
//! 4. A piece that cannot fall is locked, full rows are swept, the score and
//!    level are updated and the next piece spawns
//! 5. If the spawned piece collides, the game silently starts over
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use blockfall_engine::{GameSession, RotationDirection};
//!
//! let mut session = GameSession::new();
//!
//! _ = session.try_move_left();
//! _ = session.try_rotate(RotationDirection::Clockwise);
//! session.tick(Duration::from_millis(16));
//!
//! let placement = session.hard_drop().unwrap();
//! assert!(!placement.game_over);
//! ```

pub use self::{drop_clock::*, game_session::*, game_stats::*, piece_generator::*};

mod drop_clock;
mod game_session;
mod game_stats;
mod piece_generator;
