//! Move representation.

use crate::{FormatError, Square};
use std::fmt;

/// A move from one square to another, in coordinate notation.
///
/// The engine decides whether the move is acceptable; this type only
/// carries the two squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Returns the origin square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the coordinate notation for this move (e.g., `e2e4`).
    pub fn to_uci(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses a move from coordinate notation: an origin square immediately
    /// followed by a destination square.
    pub fn from_uci(text: &str) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidMove(text.to_string());
        if text.len() != 4 || !text.is_ascii() {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&text[0..2]).map_err(|_| invalid())?;
        let to = Square::from_algebraic(&text[2..4]).map_err(|_| invalid())?;
        Ok(Move::new(from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl std::str::FromStr for Move {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s)
    }
}
