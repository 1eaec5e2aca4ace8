//! Core types for chess.
//!
//! This crate provides the value types shared by the engine and its drivers:
//! - [`PieceKind`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (a1 = 0 ... h8 = 63)
//! - [`Move`] for coordinate-notation moves such as `e2e4`
//! - [`FenRecord`] for FEN field splitting and board-layout expansion
//! - [`FormatError`] for every malformed-text failure

mod color;
mod error;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use error::FormatError;
pub use fen::{Cell, FenRecord};
pub use mov::Move;
pub use piece::PieceKind;
pub use square::Square;
