//! Turn driver for the bitboard chess engine.
//!
//! A [`Session`] alternates between a human, who enters moves in coordinate
//! notation, and a computer that plays a uniformly random pseudo-legal move.
//! The `chess-play` binary wires a session to standard input.

pub mod config;
pub mod random;
pub mod session;

pub use config::{ConfigError, PlayConfig};
pub use random::{choose_square, choose_uniform, random_move};
pub use session::{parse_player_color, Command, PlayedMove, Session, SessionError};
