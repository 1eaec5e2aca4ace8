//! FEN (Forsyth-Edwards Notation) field decoding and encoding.
//!
//! [`FenRecord`] holds the six FEN fields in decoded form. The board layout
//! is kept as 64 cells in FEN reading order (index 0 is a8, index 63 is h1);
//! the engine maps those cells onto its little-endian bitboards.

use std::fmt;

use crate::{Color, FormatError, PieceKind, Square};

/// Contents of one board cell: empty, or a piece kind with its color.
pub type Cell = Option<(PieceKind, Color)>;

/// Decoded FEN data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    /// Board cells in FEN reading order, rank 8 to rank 1, file a to file h.
    pub cells: [Cell; 64],
    /// Side to move.
    pub active_color: Color,
    /// Castling letters (a subset of `KQkq`, or `-`).
    pub castling: String,
    /// En passant target square, if any.
    pub en_passant: Option<Square>,
    /// Halfmove clock (for 50-move rule).
    pub halfmove_clock: u32,
    /// Fullmove number.
    pub fullmove_number: u32,
}

impl FenRecord {
    /// The starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FormatError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() != 6 {
            return Err(FormatError::InvalidFieldCount(fields.len()));
        }

        let cells = Self::expand_board(fields[0])?;
        let active_color = Color::from_fen_field(fields[1])?;

        let castling = fields[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(fields[3])?;

        let halfmove_clock = fields[4]
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidHalfmoveClock(fields[4].to_string()))?;

        let fullmove_number = fields[5]
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidFullmoveNumber(fields[5].to_string()))?;

        Ok(FenRecord {
            cells,
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Expands a board layout into 64 cells.
    ///
    /// Rank separators are dropped and each digit `d` stands for `d` empty
    /// cells; the layout must then account for exactly 64 cells.
    pub fn expand_board(layout: &str) -> Result<[Cell; 64], FormatError> {
        let mut cells: [Cell; 64] = [None; 64];
        let mut len = 0usize;

        for c in layout.chars().filter(|&c| c != '/') {
            if let Some(run) = c.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(FormatError::InvalidBoardLayout(format!(
                        "invalid empty-square count '{}'",
                        c
                    )));
                }
                len += run as usize;
            } else {
                let piece = PieceKind::from_fen_char(c).ok_or_else(|| {
                    FormatError::InvalidBoardLayout(format!("invalid character '{}'", c))
                })?;
                if len < 64 {
                    cells[len] = Some(piece);
                }
                len += 1;
            }

            if len > 64 {
                return Err(FormatError::InvalidBoardLayout(
                    "more than 64 squares".to_string(),
                ));
            }
        }

        if len != 64 {
            return Err(FormatError::InvalidBoardLayout(format!(
                "{} squares, expected 64",
                len
            )));
        }

        Ok(cells)
    }

    /// Collapses 64 cells back into a board layout.
    ///
    /// Ranks are separated by `/` and every run of empty cells within a rank
    /// becomes its length as a digit.
    pub fn collapse_board(cells: &[Cell; 64]) -> String {
        let mut layout = String::with_capacity(71);

        for (rank, row) in cells.chunks(8).enumerate() {
            if rank > 0 {
                layout.push('/');
            }
            let mut empty_run = 0u8;
            for cell in row {
                match cell {
                    Some((kind, color)) => {
                        if empty_run > 0 {
                            layout.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        layout.push(kind.to_fen_char(*color));
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                layout.push((b'0' + empty_run) as char);
            }
        }

        layout
    }

    fn validate_castling(castling: &str) -> Result<(), FormatError> {
        if castling == "-" {
            return Ok(());
        }

        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FormatError::InvalidCastlingRights(format!(
                    "invalid character '{}' in '{}'",
                    c, castling
                )));
            }
        }

        Ok(())
    }

    fn parse_en_passant(field: &str) -> Result<Option<Square>, FormatError> {
        if field == "-" {
            return Ok(None);
        }

        let square = Square::from_algebraic(field)
            .map_err(|_| FormatError::InvalidEnPassantTarget(field.to_string()))?;
        // Only a pawn that just advanced two squares leaves a target behind it.
        if square.rank() != 2 && square.rank() != 5 {
            return Err(FormatError::InvalidEnPassantTarget(field.to_string()));
        }

        Ok(Some(square))
    }

    /// Converts the record back to a FEN string.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FenRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ",
            Self::collapse_board(&self.cells),
            self.active_color.to_fen_char(),
            self.castling
        )?;
        match self.en_passant {
            Some(square) => write!(f, "{}", square)?,
            None => write!(f, "-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

impl std::str::FromStr for FenRecord {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FenRecord::parse(s)
    }
}
