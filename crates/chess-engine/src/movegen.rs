//! Pseudo-legal move generation and move application.
//!
//! Only pawns and knights have generators. Bishops, rooks, queens and kings
//! produce an empty move set, and no generated move is checked for leaving
//! the mover's king attacked.

use chess_core::{Color, FormatError, Move, PieceKind, Square};
use thiserror::Error;

use crate::{Bitboard, Position};

/// Reasons a move attempt is refused. A refused move leaves the position
/// untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("there is no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} does not belong to {side}, the side to move")]
    NotSideToMove { square: Square, side: Color },

    #[error("{kind} on {from} cannot move to {to}")]
    Unreachable {
        kind: PieceKind,
        from: Square,
        to: Square,
    },
}

/// Knight jumps as (index offset, origin squares from which the jump would
/// leave the board).
const KNIGHT_JUMPS: [(i8, Bitboard); 8] = [
    (15, Bitboard::A_FILE.union(Bitboard::RANKS_7_8)),
    (17, Bitboard::H_FILE.union(Bitboard::RANKS_7_8)),
    (6, Bitboard::AB_FILES.union(Bitboard::RANK_8)),
    (10, Bitboard::GH_FILES.union(Bitboard::RANK_8)),
    (-17, Bitboard::A_FILE.union(Bitboard::RANKS_1_2)),
    (-15, Bitboard::H_FILE.union(Bitboard::RANKS_1_2)),
    (-10, Bitboard::AB_FILES.union(Bitboard::RANK_1)),
    (-6, Bitboard::GH_FILES.union(Bitboard::RANK_1)),
];

/// Per-color pawn geometry.
struct PawnRules {
    push: i8,
    start_rank: Bitboard,
    last_rank: Bitboard,
    /// Diagonal captures as (index offset, origin file that forbids it).
    captures: [(i8, Bitboard); 2],
}

const WHITE_PAWNS: PawnRules = PawnRules {
    push: 8,
    start_rank: Bitboard::RANK_2,
    last_rank: Bitboard::RANK_8,
    captures: [(7, Bitboard::A_FILE), (9, Bitboard::H_FILE)],
};

const BLACK_PAWNS: PawnRules = PawnRules {
    push: -8,
    start_rank: Bitboard::RANK_7,
    last_rank: Bitboard::RANK_1,
    captures: [(-9, Bitboard::A_FILE), (-7, Bitboard::H_FILE)],
};

/// Converts coordinate text (`a1` ... `h8`) to its square, `rank * 8 + file`.
pub fn square_to_index(text: &str) -> Result<Square, FormatError> {
    Square::from_algebraic(text)
}

/// Returns the kind of the piece on `sq`, or `None` if the square is empty.
pub fn find_piece_kind(position: &Position, sq: Square) -> Option<PieceKind> {
    position.find_piece_kind(sq)
}

/// Generates the pseudo-legal destinations of a `kind` piece standing on
/// `from`.
///
/// The piece moves for the color occupying `from`, or for the side to move
/// when `from` is empty.
pub fn pseudo_legal_moves(kind: PieceKind, from: Square, position: &Position) -> Bitboard {
    let color = position.color_at(from).unwrap_or(position.side_to_move);
    match kind {
        PieceKind::Pawn => pawn_moves(from, color, position),
        PieceKind::Knight => knight_moves(from, color, position),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen | PieceKind::King => {
            Bitboard::EMPTY
        }
    }
}

fn pawn_moves(from: Square, color: Color, position: &Position) -> Bitboard {
    let rules = match color {
        Color::White => &WHITE_PAWNS,
        Color::Black => &BLACK_PAWNS,
    };
    let mut moves = Bitboard::EMPTY;
    if rules.last_rank.contains(from) {
        return moves;
    }

    let empty = !position.occupied();
    if let Some(one) = from.offset(rules.push).filter(|&sq| empty.contains(sq)) {
        moves.set(one);
        if rules.start_rank.contains(from) {
            if let Some(two) = one.offset(rules.push).filter(|&sq| empty.contains(sq)) {
                moves.set(two);
            }
        }
    }

    let enemies = position.colors[color.opposite().index()];
    for (offset, edge) in rules.captures {
        if edge.contains(from) {
            continue;
        }
        if let Some(to) = from.offset(offset).filter(|&sq| enemies.contains(sq)) {
            moves.set(to);
        }
    }

    moves
}

fn knight_moves(from: Square, color: Color, position: &Position) -> Bitboard {
    let own = position.colors[color.index()];
    KNIGHT_JUMPS
        .iter()
        .filter(|(_, edge)| !edge.contains(from))
        .filter_map(|&(offset, _)| from.offset(offset))
        .filter(|&to| !own.contains(to))
        .collect()
}

/// Moves the piece on `from` to `to` and passes the turn.
///
/// The move is refused when `from` is empty, when the piece there is not the
/// side to move's, or when `to` is not among its pseudo-legal destinations.
/// On success returns the kind of the captured piece, if any.
///
/// Castling rights, the en passant target and both move counters are left
/// as they were.
pub fn apply_move(
    position: &mut Position,
    from: Square,
    to: Square,
) -> Result<Option<PieceKind>, IllegalMoveError> {
    let kind = position
        .find_piece_kind(from)
        .ok_or(IllegalMoveError::EmptySquare(from))?;

    let us = position.side_to_move;
    if !position.colors[us.index()].contains(from) {
        return Err(IllegalMoveError::NotSideToMove {
            square: from,
            side: us,
        });
    }

    if !pseudo_legal_moves(kind, from, position).contains(to) {
        return Err(IllegalMoveError::Unreachable { kind, from, to });
    }

    let captured = position.find_piece_kind(to);
    // A captured piece of the same kind shares the mover's bitboard, which
    // keeps the destination bit set.
    if let Some(victim) = captured.filter(|&victim| victim != kind) {
        position.pieces[victim.index()].clear(to);
    }
    position.pieces[kind.index()].set(to);
    position.pieces[kind.index()].clear(from);

    position.colors[us.opposite().index()].clear(to);
    position.colors[us.index()].set(to);
    position.colors[us.index()].clear(from);

    position.side_to_move = us.opposite();
    debug_assert!(position.is_consistent());

    Ok(captured)
}

impl Position {
    /// Applies `mv` with [`apply_move`].
    pub fn make_move(&mut self, mv: Move) -> Result<Option<PieceKind>, IllegalMoveError> {
        apply_move(self, mv.from(), mv.to())
    }

    /// Squares of the side to move whose piece has at least one
    /// pseudo-legal destination.
    pub fn movable_squares(&self) -> Bitboard {
        self.us()
            .into_iter()
            .filter(|&sq| {
                self.find_piece_kind(sq)
                    .is_some_and(|kind| !pseudo_legal_moves(kind, sq, self).is_empty())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        square_to_index(text).unwrap()
    }

    fn squares(texts: &[&str]) -> Bitboard {
        texts.iter().map(|t| sq(t)).collect()
    }

    #[test]
    fn test_square_to_index() {
        assert_eq!(sq("a1").index(), 0);
        assert_eq!(sq("h1").index(), 7);
        assert_eq!(sq("e2").index(), 12);
        assert_eq!(sq("h8").index(), 63);
        assert!(matches!(
            square_to_index("j1"),
            Err(FormatError::InvalidSquare(_))
        ));
    }

    #[test]
    fn pawn_pushes_from_start() {
        let pos = Position::startpos();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("e2"), &pos),
            squares(&["e3", "e4"])
        );
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("a2"), &pos),
            squares(&["a3", "a4"])
        );
    }

    #[test]
    fn black_pawn_pushes_down() {
        let mut pos = Position::startpos();
        pos.side_to_move = Color::Black;
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("d7"), &pos),
            squares(&["d6", "d5"])
        );
    }

    #[test]
    fn pawn_blocked() {
        let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(pseudo_legal_moves(PieceKind::Pawn, sq("e2"), &pos).is_empty());

        let pos = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("e2"), &pos),
            squares(&["e3"])
        );
    }

    #[test]
    fn pawn_double_push_only_from_start_rank() {
        let pos = Position::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("e3"), &pos),
            squares(&["e4"])
        );
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let pos = Position::from_fen("4k3/8/8/3p1N2/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("e4"), &pos),
            squares(&["e5", "d5"])
        );
    }

    #[test]
    fn pawn_captures_while_blocked() {
        let pos = Position::from_fen("4k3/8/8/3pp3/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("e4"), &pos),
            squares(&["d5"])
        );
    }

    #[test]
    fn pawn_captures_do_not_wrap() {
        // h4 + 9 is a6 on the far edge.
        let pos = Position::from_fen("4k3/8/p7/7p/7P/8/8/4K3 w - - 0 1").unwrap();
        assert!(pseudo_legal_moves(PieceKind::Pawn, sq("h4"), &pos).is_empty());

        // a4 + 7 is h4.
        let pos = Position::from_fen("4k3/8/8/8/P6p/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("a4"), &pos),
            squares(&["a5"])
        );
    }

    #[test]
    fn pawn_on_last_rank_has_no_moves() {
        let pos = Position::from_fen("P3k3/8/8/8/8/8/8/4K2p w - - 0 1").unwrap();
        assert!(pseudo_legal_moves(PieceKind::Pawn, sq("a8"), &pos).is_empty());
        assert!(pseudo_legal_moves(PieceKind::Pawn, sq("h1"), &pos).is_empty());
    }

    #[test]
    fn pawn_does_not_capture_en_passant() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Pawn, sq("e5"), &pos),
            squares(&["e6"])
        );
    }

    #[test]
    fn knight_from_start() {
        let pos = Position::startpos();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("b1"), &pos),
            squares(&["a3", "c3"])
        );
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("g1"), &pos),
            squares(&["f3", "h3"])
        );
    }

    #[test]
    fn knight_in_center() {
        let pos = Position::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("d4"), &pos),
            squares(&["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"])
        );
    }

    #[test]
    fn knight_in_corners_does_not_wrap() {
        let pos = Position::from_fen("N3k2N/8/8/8/8/8/8/N3K2N w - - 0 1").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("a1"), &pos),
            squares(&["b3", "c2"])
        );
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("h1"), &pos),
            squares(&["g3", "f2"])
        );
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("a8"), &pos),
            squares(&["b6", "c7"])
        );
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("h8"), &pos),
            squares(&["g6", "f7"])
        );
    }

    #[test]
    fn knight_on_b_and_g_files_does_not_wrap() {
        let pos = Position::from_fen("4k3/8/8/6N1/1N6/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("b4"), &pos),
            squares(&["a2", "a6", "c2", "c6", "d3", "d5"])
        );
        assert_eq!(
            pseudo_legal_moves(PieceKind::Knight, sq("g5"), &pos),
            squares(&["h3", "h7", "f3", "f7", "e4", "e6"])
        );
    }

    #[test]
    fn knight_captures_enemies() {
        let pos = Position::from_fen("4k3/8/2p5/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        assert!(pseudo_legal_moves(PieceKind::Knight, sq("d4"), &pos).contains(sq("c6")));
    }

    #[test]
    fn sliders_and_king_have_no_generator() {
        let pos = Position::from_fen("4k3/8/8/8/3Q4/8/8/R3K2B w - - 0 1").unwrap();
        for (kind, at) in [
            (PieceKind::Queen, "d4"),
            (PieceKind::Rook, "a1"),
            (PieceKind::Bishop, "h1"),
            (PieceKind::King, "e1"),
        ] {
            assert!(pseudo_legal_moves(kind, sq(at), &pos).is_empty(), "{kind}");
        }
    }

    #[test]
    fn apply_move_flips_side_to_move() {
        let mut pos = Position::startpos();
        assert_eq!(apply_move(&mut pos, sq("e2"), sq("e4")), Ok(None));
        assert_eq!(pos.side_to_move, Color::Black);
        assert_eq!(pos.piece_at(sq("e4")), Some((PieceKind::Pawn, Color::White)));
        assert_eq!(pos.piece_at(sq("e2")), None);
        assert!(pos.is_consistent());
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 0"
        );
    }

    #[test]
    fn apply_move_rejects_empty_origin() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        assert_eq!(
            apply_move(&mut pos, sq("e4"), sq("e5")),
            Err(IllegalMoveError::EmptySquare(sq("e4")))
        );
        assert_eq!(pos, before);
    }

    #[test]
    fn apply_move_rejects_opponent_piece() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        assert_eq!(
            apply_move(&mut pos, sq("e7"), sq("e5")),
            Err(IllegalMoveError::NotSideToMove {
                square: sq("e7"),
                side: Color::White
            })
        );
        assert_eq!(pos, before);
    }

    #[test]
    fn apply_move_rejects_unreachable_destination() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        assert_eq!(
            apply_move(&mut pos, sq("e2"), sq("e5")),
            Err(IllegalMoveError::Unreachable {
                kind: PieceKind::Pawn,
                from: sq("e2"),
                to: sq("e5")
            })
        );
        assert!(matches!(
            apply_move(&mut pos, sq("d1"), sq("d3")),
            Err(IllegalMoveError::Unreachable { kind: PieceKind::Queen, .. })
        ));
        assert_eq!(pos, before);
    }

    #[test]
    fn apply_move_capture_of_other_kind() {
        let mut pos = Position::from_fen("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            apply_move(&mut pos, sq("e4"), sq("d5")),
            Ok(Some(PieceKind::Knight))
        );
        assert_eq!(pos.piece_at(sq("d5")), Some((PieceKind::Pawn, Color::White)));
        assert!(pos.pieces[PieceKind::Knight.index()].is_empty());
        assert!(pos.is_consistent());
        assert_eq!(pos.to_fen(), "4k3/8/8/3P4/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn apply_move_capture_of_same_kind() {
        let mut pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            apply_move(&mut pos, sq("e4"), sq("d5")),
            Ok(Some(PieceKind::Pawn))
        );
        assert_eq!(pos.pieces[PieceKind::Pawn.index()].count(), 1);
        assert_eq!(pos.colors[Color::Black.index()].count(), 1);
        assert!(pos.is_consistent());
    }

    #[test]
    fn black_knight_capture() {
        let mut pos =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/2N5/PPPPPPPP/R1BQKBNR b KQkq - 0 0")
                .unwrap();
        apply_move(&mut pos, sq("b8"), sq("a6")).unwrap();
        apply_move(&mut pos, sq("c3"), sq("d5")).unwrap();
        apply_move(&mut pos, sq("a6"), sq("b4")).unwrap();
        assert_eq!(
            apply_move(&mut pos, sq("d5"), sq("c7")),
            Ok(Some(PieceKind::Pawn))
        );
        assert_eq!(pos.piece_at(sq("c7")), Some((PieceKind::Knight, Color::White)));
        assert_eq!(pos.side_to_move, Color::Black);
        assert!(pos.is_consistent());
    }

    #[test]
    fn clocks_and_rights_are_carried_unchanged() {
        let fen = "4k3/8/8/8/8/8/4P3/4K3 w Kq - 7 12";
        let mut pos = Position::from_fen(fen).unwrap();
        apply_move(&mut pos, sq("e2"), sq("e4")).unwrap();
        assert_eq!(pos.to_fen(), "4k3/8/8/8/4P3/8/8/4K3 b Kq - 7 12");
    }

    #[test]
    fn make_move_and_movable_squares() {
        let mut pos = Position::startpos();
        // Eight pawns and two knights can move.
        assert_eq!(pos.movable_squares().count(), 10);
        pos.make_move(Move::from_uci("g1f3").unwrap()).unwrap();
        assert_eq!(pos.side_to_move, Color::Black);
        assert_eq!(pos.movable_squares().count(), 10);
    }

    #[test]
    fn error_messages() {
        let err = IllegalMoveError::EmptySquare(sq("e4"));
        assert_eq!(err.to_string(), "there is no piece on e4");
        let err = IllegalMoveError::Unreachable {
            kind: PieceKind::Knight,
            from: sq("b1"),
            to: sq("b3"),
        };
        assert_eq!(err.to_string(), "Knight on b1 cannot move to b3");
    }
}
