//! Errors raised while decoding text into chess values.

use thiserror::Error;

/// A piece of text could not be decoded.
///
/// Raised for malformed FEN fields and malformed square or move
/// coordinates. Decoding aborts at the first bad field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid board layout: {0}")]
    InvalidBoardLayout(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant target: {0}")]
    InvalidEnPassantTarget(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("invalid move: '{0}'")]
    InvalidMove(String),
}
