//! Bitboard chess position and pseudo-legal move engine.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square sets with the edge masks used by move generation
//! - [`Position`] - piece placement plus side to move, castling rights,
//!   en passant target and move counters, convertible to and from FEN
//! - [`pseudo_legal_moves`] and [`apply_move`] - pawn and knight generation and
//!   the move gate that mutates a position and passes the turn
//!
//! # Architecture
//!
//! Six bitboards, one per piece kind, hold the pieces of both colors. Two
//! color masks say which side owns each occupied square. Bit 0 is a1 and
//! bit 63 is h8.
//!
//! # Example
//!
//! ```
//! use chess_engine::{apply_move, pseudo_legal_moves, square_to_index, Position};
//! use chess_core::PieceKind;
//!
//! let mut position = Position::startpos();
//! let e2 = square_to_index("e2").unwrap();
//! let targets = pseudo_legal_moves(PieceKind::Pawn, e2, &position);
//! assert_eq!(targets.count(), 2);
//!
//! apply_move(&mut position, e2, square_to_index("e4").unwrap()).unwrap();
//! println!("Position after 1.e4: {}", position.to_fen());
//! ```

mod bitboard;
mod movegen;
mod position;

pub use bitboard::{Bitboard, BitboardIter};
pub use movegen::{
    apply_move, find_piece_kind, pseudo_legal_moves, square_to_index, IllegalMoveError,
};
pub use position::{CastlingRights, Position};
