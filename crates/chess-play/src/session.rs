//! Turn management between a human player and the random computer player.

use chess_core::{Color, FormatError, Move, PieceKind};
use chess_engine::{IllegalMoveError, Position};
use rand::Rng;
use thiserror::Error;

use crate::random::random_move;

/// Errors raised while playing a turn. None of them ends the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),

    #[error("it is {0}'s turn")]
    WrongTurn(Color),

    #[error("{0} has no piece that can move")]
    NoMoves(Color),
}

/// A line of human input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop the game.
    Quit,
    /// Play a move.
    Play(Move),
}

impl Command {
    /// Parses a line: `0` quits, anything else must be a coordinate move.
    pub fn parse(line: &str) -> Result<Self, FormatError> {
        match line.trim() {
            "0" => Ok(Command::Quit),
            text => Move::from_uci(text).map(Command::Play),
        }
    }
}

/// Parses the human player's color: `w` or `b`.
pub fn parse_player_color(text: &str) -> Result<Color, FormatError> {
    Color::from_fen_field(text.trim())
}

/// A move accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    pub side: Color,
    pub mv: Move,
    pub captured: Option<PieceKind>,
}

/// One game: a position, the color the human controls, and the random
/// source of the computer player.
#[derive(Debug)]
pub struct Session<R> {
    position: Position,
    player_color: Color,
    rng: R,
    history: Vec<PlayedMove>,
}

impl<R> Session<R> {
    /// Starts a session from `position`.
    pub fn new(position: Position, player_color: Color, rng: R) -> Self {
        tracing::info!(
            player = %player_color,
            fen = %position.to_fen(),
            "starting session"
        );
        Session {
            position,
            player_color,
            rng,
            history: Vec::new(),
        }
    }

    /// Returns the current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the color controlled by the human.
    pub fn player_color(&self) -> Color {
        self.player_color
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// Returns true when the side to move is the human's.
    pub fn is_player_turn(&self) -> bool {
        self.position.side_to_move == self.player_color
    }

}

impl<R: Rng> Session<R> {
    /// Plays the human's move. A refused move leaves the position as it was.
    pub fn play_human(&mut self, mv: Move) -> Result<PlayedMove, SessionError> {
        if !self.is_player_turn() {
            return Err(SessionError::WrongTurn(self.position.side_to_move));
        }
        self.play(mv)
    }

    /// Lets the computer pick and play a random pseudo-legal move.
    pub fn play_computer(&mut self) -> Result<PlayedMove, SessionError> {
        let side = self.position.side_to_move;
        if side == self.player_color {
            return Err(SessionError::WrongTurn(side));
        }
        let mv = random_move(&self.position, &mut self.rng).ok_or(SessionError::NoMoves(side))?;
        tracing::debug!(
            candidates = self.position.movable_squares().count(),
            chosen = %mv,
            "computer move"
        );
        self.play(mv)
    }

    fn play(&mut self, mv: Move) -> Result<PlayedMove, SessionError> {
        let side = self.position.side_to_move;
        let captured = self.position.make_move(mv)?;
        let played = PlayedMove { side, mv, captured };
        tracing::info!(
            side = %side,
            from = %mv.from(),
            to = %mv.to(),
            captured = ?captured,
            "move played"
        );
        self.history.push(played);
        Ok(played)
    }
}
