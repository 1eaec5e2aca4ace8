//! Uniform random selection, the whole of the computer player's "thinking".

use chess_core::{Move, Square};
use chess_engine::{pseudo_legal_moves, Bitboard, Position};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

/// Picks one candidate with uniform probability, or `None` if there are none.
pub fn choose_uniform<'a, T, R: Rng + ?Sized>(candidates: &'a [T], rng: &mut R) -> Option<&'a T> {
    candidates.choose(rng)
}

/// Picks one square of `squares` with uniform probability.
pub fn choose_square<R: Rng + ?Sized>(squares: Bitboard, rng: &mut R) -> Option<Square> {
    squares.into_iter().choose(rng)
}

/// Picks a random pseudo-legal move for the side to move.
///
/// The origin is drawn uniformly from the side's pieces that have at least
/// one destination, then the destination uniformly from that piece's
/// pseudo-legal set. Returns `None` when no piece can move.
pub fn random_move<R: Rng + ?Sized>(position: &Position, rng: &mut R) -> Option<Move> {
    let from = choose_square(position.movable_squares(), rng)?;
    let kind = position.find_piece_kind(from)?;
    let to = choose_square(pseudo_legal_moves(kind, from, position), rng)?;
    Some(Move::new(from, to))
}
