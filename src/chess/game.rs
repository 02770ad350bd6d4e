//! Module to implement a chess game
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashMap;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use super::*;
use super::error::{IllegalPosition, PreconditionViolation};

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

lazy_static! {
    static ref MOVE_SEPARATOR_RE: Regex = Regex::new(r"\s+|\s*\d+\s*\.\s*").expect("INFALLIBLE");
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The result of a game
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// The given color has won.
    Win(Color, Option<WinReason>),
    /// The game has ended in a draw.
    Draw(Option<DrawReason>),
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(Color::White, Some(reason)) => format!("1-0 {{{}}}", reason).fmt(f),
            GameResult::Win(Color::White, None) => "1-0".fmt(f),
            GameResult::Win(Color::Black, Some(reason)) => format!("0-1 {{{}}}", reason).fmt(f),
            GameResult::Win(Color::Black, None) => "0-1".fmt(f),
            GameResult::Draw(Some(reason)) => format!("1/2-1/2 {{{}}}", reason).fmt(f),
            GameResult::Draw(None) => "1/2-1/2".fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Win reason
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WinReason {
    /// The game was won by checkmate.
    Checkmate,
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinReason::Checkmate => "checkmate".fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Draw reason
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawReason {
    /// Stalemate
    Stalemate,
    /// Draw by the fifty-move rule
    FiftyMoves,
    /// Draw by three-fold repetition
    Repetition,
    /// Insufficient material
    Material,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::Stalemate => "stalemate".fmt(f),
            DrawReason::FiftyMoves => "fifty-move rule".fmt(f),
            DrawReason::Repetition => "repetition".fmt(f),
            DrawReason::Material => "insufficient material".fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The names of the two players
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    /// Name of the player with the white pieces
    pub white: String,
    /// Name of the player with the black pieces
    pub black: String,
}

impl Players {
    /// Creates a pair of player names
    pub fn new<W: Into<String>, B: Into<String>>(white: W, black: B) -> Players {
        Players { white: white.into(), black: black.into() }
    }

    /// Returns the name of the player of color `c`
    pub fn name(&self, c: Color) -> &str {
        match c {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl Default for Players {
    fn default() -> Self {
        Players::new("White", "Black")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A game session: the players, the current position, and the history needed for undo and
/// threefold repetition.
///
/// The history holds the FEN of every position reached, starting with the initial one, and the
/// repetition map counts how often each `Position::repetition_key()` has occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    players: Players,
    position: Position,
    history: Vec<String>,
    repetitions: HashMap<String, usize>,
    moves: Vec<Move>,
}

impl Game {
    /// Starts a game from `fen`, or from the standard starting position if `fen` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Notation` for a malformed record. A well-formed record is refused with
    /// `Error::IllegalPosition` if it has the wrong number of kings, if the side that just moved is
    /// in check, or if the game would already be over.
    pub fn new(players: Players, fen: Option<&str>) -> Result<Game> {
        let position = Position::from_fen_str(fen.unwrap_or(STARTING_FEN))?;

        if position.is_checkmate() {
            return Err(IllegalPosition::AlreadyCheckmate.into());
        }
        if position.insufficient_material() {
            return Err(IllegalPosition::InsufficientMaterial.into());
        }
        if position.is_stalemate() || position.fifty_moves() {
            return Err(IllegalPosition::AlreadyDraw.into());
        }

        let mut repetitions = HashMap::new();
        repetitions.insert(position.repetition_key(), 1);
        let game = Game {
            history: vec![position.to_fen_str()],
            players,
            position,
            repetitions,
            moves: Vec::new(),
        };
        info!("new game: {} (white) vs {} (black) from {}",
            game.players.white, game.players.black, game.fen());

        Ok(game)
    }

    /// Returns the players' names
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Returns the current position
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Returns the piece on `coord`, if any
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.position.piece_at(coord)
    }

    /// Returns all legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves()
    }

    /// Returns the legal moves of the piece on `coord`
    pub fn legal_moves_at(&self, coord: Coord) -> Vec<Move> {
        self.position.legal_moves_at(coord)
    }

    /// Plays `mv`, recording the new position in the history.
    ///
    /// # Errors
    ///
    /// Returns `Error::Precondition(IllegalMove)` and leaves the game unchanged if `mv` is not
    /// legal.
    pub fn push_move(&mut self, mv: Move) -> Result<()> {
        if let Err(err) = self.position.make(mv) {
            warn!("rejected move {} in {}", mv, self.fen());
            return Err(err);
        }

        *self.repetitions.entry(self.position.repetition_key()).or_insert(0) += 1;
        self.history.push(self.position.to_fen_str());
        self.moves.push(mv);
        debug!("pushed {}: {}", mv, self.fen());

        if let Some(result) = self.result() {
            info!("game over: {}", result);
        }

        Ok(())
    }

    /// Plays each move of a whitespace separated list in coordinate notation. Move numbers such
    /// as `1.` are ignored.
    ///
    /// Stops at the first move that cannot be parsed or is not legal; the moves before it remain
    /// played.
    pub fn push_moves_from_str(&mut self, s: &str) -> Result<()> {
        for token in MOVE_SEPARATOR_RE.split(s.trim()) {
            if token.is_empty() {
                continue;
            }
            let mv: Move = token.parse()?;
            self.push_move(mv)?;
        }

        Ok(())
    }

    /// Takes back the last move and returns it, restoring the previous position exactly.
    ///
    /// # Errors
    ///
    /// Returns `Error::Precondition(EmptyHistory)` if no move has been played.
    pub fn pop_move(&mut self) -> Result<Move> {
        let previous = match self.history.len() {
            0 | 1 => {
                warn!("no move to undo");
                return Err(PreconditionViolation::EmptyHistory.into());
            }
            n => Position::from_fen_str(&self.history[n - 2])?,
        };

        let key = self.position.repetition_key();
        match self.repetitions.get_mut(&key) {
            Some(count) if *count > 1 => *count -= 1,
            _ => {
                self.repetitions.remove(&key);
            }
        }
        self.history.pop();
        self.position = previous;
        let mv = self.moves.pop().ok_or(PreconditionViolation::EmptyHistory)?;
        debug!("popped {}: {}", mv, self.fen());

        Ok(mv)
    }

    /// Returns `true` if the side to move is in check
    pub fn in_check(&self) -> bool {
        self.position.in_check(self.position.turn())
    }

    /// Returns `true` if the side to move is checkmated
    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    /// Returns `true` if the side to move is stalemated
    pub fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    /// Returns `true` if neither side has enough material to checkmate
    pub fn is_insufficient_material(&self) -> bool {
        self.position.insufficient_material()
    }

    /// Returns `true` if 50 full moves have passed without a capture or pawn move
    pub fn is_fifty_moves(&self) -> bool {
        self.position.fifty_moves()
    }

    /// Returns `true` if the current position has occurred at least three times
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Number of times the current position has occurred in this game
    pub fn repetition_count(&self) -> usize {
        self.repetitions.get(&self.position.repetition_key()).copied().unwrap_or(0)
    }

    /// Returns `true` if the game is drawn for any reason. Checkmate is not a draw; check it
    /// separately with `is_checkmate()`.
    pub fn is_draw(&self) -> bool {
        self.draw_reason().is_some()
    }

    /// Returns why the game is drawn, or `None` if it is not
    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.is_stalemate() {
            Some(DrawReason::Stalemate)
        } else if self.is_insufficient_material() {
            Some(DrawReason::Material)
        } else if self.is_fifty_moves() {
            Some(DrawReason::FiftyMoves)
        } else if self.is_threefold_repetition() {
            Some(DrawReason::Repetition)
        } else {
            None
        }
    }

    /// Returns the result of the game, or `None` if the game isn't over
    pub fn result(&self) -> Option<GameResult> {
        if self.is_checkmate() {
            Some(GameResult::Win(!self.turn(), Some(WinReason::Checkmate)))
        } else {
            self.draw_reason().map(|reason| GameResult::Draw(Some(reason)))
        }
    }

    /// Returns the FEN of the current position
    pub fn fen(&self) -> String {
        self.position.to_fen_str()
    }

    /// Returns the side to move
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Returns the moves played so far
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the FEN of every position reached, starting with the initial position
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl fmt::Display for Game {
    /// Writes the moves played as a space delimited sequence in coordinate notation
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves: Vec<String> = self.moves.iter().map(|mv| mv.to_string()).collect();
        moves.join(" ").fmt(f)
    }
}
