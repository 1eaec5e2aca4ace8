//! Chess position representation.

use std::fmt;

use chess_core::{Color, FenRecord, FormatError, PieceKind, Square};

use crate::Bitboard;

/// Castling rights flags.
///
/// Four independent rights. They are read from and written to FEN but move
/// application never changes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Reads the FEN castling field. Each of `K`, `Q`, `k`, `q` grants one
    /// right; `-` grants none.
    pub fn from_fen_field(field: &str) -> Result<Self, FormatError> {
        let mut flags = 0u8;
        for c in field.chars() {
            flags |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                '-' if field.len() == 1 => 0,
                _ => return Err(FormatError::InvalidCastlingRights(field.to_string())),
            };
        }
        Ok(CastlingRights(flags))
    }

    /// Writes the FEN castling field in `KQkq` order, or `-` for none.
    pub fn to_fen_field(self) -> String {
        if self.0 == 0 {
            return "-".to_string();
        }
        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .iter()
        .filter(|(flag, _)| self.0 & flag != 0)
        .map(|&(_, letter)| letter)
        .collect()
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Complete chess position state.
///
/// One bitboard per piece kind holds the pieces of both colors; the two
/// color masks say whose piece stands on each occupied square.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Bitboards for each piece kind, indexed by [`PieceKind::index`].
    pub pieces: [Bitboard; 6],

    /// Bitboards for each color's pieces, indexed by [`Color::index`].
    pub colors: [Bitboard; 2],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number.
    pub fullmove_number: u32,
}

impl Position {
    /// FEN of [`Position::startpos`].
    pub const STARTPOS_FEN: &'static str = FenRecord::STARTPOS;

    const START_PIECES: [Bitboard; 6] = [
        Bitboard(0x00FF_0000_0000_FF00),
        Bitboard(0x4200_0000_0000_0042),
        Bitboard(0x2400_0000_0000_0024),
        Bitboard(0x8100_0000_0000_0081),
        Bitboard(0x0800_0000_0000_0008),
        Bitboard(0x1000_0000_0000_0010),
    ];
    const START_COLORS: [Bitboard; 2] =
        [Bitboard(0x0000_0000_0000_FFFF), Bitboard(0xFFFF_0000_0000_0000)];

    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 0,
        }
    }

    /// Creates the standard starting position from constant bitboards,
    /// without going through FEN.
    pub fn startpos() -> Self {
        Position {
            pieces: Self::START_PIECES,
            colors: Self::START_COLORS,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 0,
        }
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FormatError> {
        let record = FenRecord::parse(fen)?;
        let mut position = Position::empty();

        // FEN reads from a8, so cell `i` lands on the rank-mirrored index.
        for (sq, cell) in Square::all().map(Square::flip_rank).zip(record.cells) {
            if let Some((kind, color)) = cell {
                position.pieces[kind.index()].set(sq);
                position.colors[color.index()].set(sq);
            }
        }

        position.side_to_move = record.active_color;
        position.castling = CastlingRights::from_fen_field(&record.castling)?;
        position.en_passant = record.en_passant;
        position.halfmove_clock = record.halfmove_clock;
        position.fullmove_number = record.fullmove_number;

        Ok(position)
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut cells = [None; 64];
        for sq in Square::all() {
            cells[sq.flip_rank().index() as usize] = self.piece_at(sq);
        }

        FenRecord {
            cells,
            active_color: self.side_to_move,
            castling: self.castling.to_fen_field(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    /// Returns the kind of the piece on `sq`, or `None` for an empty square.
    pub fn find_piece_kind(&self, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[kind.index()].contains(sq))
    }

    /// Returns the color of the piece on `sq`, if any.
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        Color::ALL
            .into_iter()
            .find(|color| self.colors[color.index()].contains(sq))
    }

    /// Returns the piece kind and color at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(PieceKind, Color)> {
        Some((self.find_piece_kind(sq)?, self.color_at(sq)?))
    }

    /// Squares occupied by the side to move.
    #[inline]
    pub fn us(&self) -> Bitboard {
        self.colors[self.side_to_move.index()]
    }

    /// Squares occupied by the side not to move.
    #[inline]
    pub fn them(&self) -> Bitboard {
        self.colors[self.side_to_move.opposite().index()]
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// Returns a bitboard of pieces of the given kind and color.
    #[inline]
    pub fn pieces_of(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.pieces[kind.index()] & self.colors[color.index()]
    }

    /// Checks the occupancy invariants: piece bitboards are pairwise
    /// disjoint, the color masks are disjoint, and the color masks together
    /// cover exactly the squares of the piece bitboards.
    pub fn is_consistent(&self) -> bool {
        let mut union = Bitboard::EMPTY;
        for bb in self.pieces {
            if !(union & bb).is_empty() {
                return false;
            }
            union |= bb;
        }
        let [white, black] = self.colors;
        (white & black).is_empty() && (white | black) == union
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl std::str::FromStr for Position {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

/// Board diagram with rank 8 on top: piece letters, `.` for empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(kind, color)| kind.to_fen_char(color));
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
