//! Game loop and session state.
//!
//! This module builds the playable game on top of the core data structures:
//!
//! - [`GameSession`] - The session state machine (board, active piece, gravity, score)
//! - [`SessionConfig`] - Board dimensions, drop interval and scoring base
//! - [`GameStats`] - Score and row-clear statistics
//! - [`PieceGenerator`] - Uniform random piece selection from a [`PieceSeed`]
//! - [`Command`] - Player commands, parseable from script tokens
//! - [`SessionEvent`] - Notifications drained by the caller
//! - [`SessionSnapshot`] - Serializable view of a session for renderers
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`SessionConfig`] (state `Idle`)
//! 2. Call [`GameSession::reset`] to start playing (state `Running`)
//! 3. Feed frame timestamps to [`GameSession::tick`] and player commands to
//!    the command methods
//! 4. When the active piece cannot descend it is merged into the board,
//!    complete rows are swept and scored, and the next piece spawns
//! 5. A spawn that collides ends the game (state `Terminal`) until the next
//!    reset
//!
//! # Example
//!
//! ```
//! use stackfall_engine::{GameSession, PieceGenerator, PieceKind, SessionConfig};
//!
//! let generator = PieceGenerator::cycle(&[PieceKind::O]);
//! let mut session = GameSession::with_generator(SessionConfig::default(), generator)?;
//! session.reset();
//!
//! session.move_left();
//! while session.soft_drop() {}
//!
//! // The O piece locked at the bottom and the next one spawned at the top.
//! assert_eq!(session.board().color_ids()[19][4], PieceKind::O.color_id());
//! assert_eq!(session.active_piece().map(|p| p.position().y()), Some(0));
//! assert_eq!(session.score(), 0);
//! # Ok::<(), stackfall_engine::ConfigError>(())
//! ```

pub use self::{
    command::*, config::*, event::*, game_stats::*, piece_generator::*, scoring::*, session::*,
    snapshot::*,
};

mod command;
mod config;
mod event;
mod game_stats;
mod piece_generator;
mod scoring;
mod session;
mod snapshot;
