//! Defines the error types needed by the chess module
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::Move;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The FEN record is structurally malformed
    Notation(NotationError),
    /// The FEN record is well formed but describes a position a game cannot start from
    IllegalPosition(IllegalPosition),
    /// The caller broke the contract of a game operation
    Precondition(PreconditionViolation),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Notation(err) => write!(f, "invalid notation: {}", err),
            Error::IllegalPosition(err) => write!(f, "illegal starting position: {}", err),
            Error::Precondition(err) => write!(f, "precondition violated: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Notation(err) => Some(err),
            Error::IllegalPosition(err) => Some(err),
            Error::Precondition(err) => Some(err),
        }
    }
}

impl From<NotationError> for Error {
    fn from(err: NotationError) -> Self {
        Error::Notation(err)
    }
}

impl From<IllegalPosition> for Error {
    fn from(err: IllegalPosition) -> Self {
        Error::IllegalPosition(err)
    }
}

impl From<PreconditionViolation> for Error {
    fn from(err: PreconditionViolation) -> Self {
        Error::Precondition(err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which part of a FEN record could not be parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Nothing but whitespace
    Empty,
    /// Wrong number of space separated fields (holds the number found)
    FieldCount(usize),
    /// Unrecognized character in the piece placement field
    UnknownPiece(char),
    /// A rank that does not describe exactly 8 files
    RankWidth,
    /// Placement field without exactly 8 ranks
    RankCount,
    /// Side to move is not `w` or `b`
    Turn,
    /// Castling field is not `-` or a subset of `KQkq` in that order
    Castling,
    /// En-passant field is not `-` or a square on the third or sixth rank
    EnPassant,
    /// Half-move clock is not a decimal integer
    HalfMoveClock,
    /// Full-move number is not a positive decimal integer
    FullMoveNumber,
    /// A move that is not in coordinate notation
    Move,
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use NotationError::*;

        match self {
            Empty => "empty string".fmt(f),
            FieldCount(n) => write!(f, "expected 6 fields, found {}", n),
            UnknownPiece(c) => write!(f, "unrecognized piece placement character `{}`", c),
            RankWidth => "rank does not contain exactly 8 files".fmt(f),
            RankCount => "placement does not contain exactly 8 ranks".fmt(f),
            Turn => "side to move must be `w` or `b`".fmt(f),
            Castling => "castling rights must be `-` or a subset of `KQkq`".fmt(f),
            EnPassant => "invalid en-passant target square".fmt(f),
            HalfMoveClock => "invalid half-move clock".fmt(f),
            FullMoveNumber => "invalid full-move number".fmt(f),
            NotationError::Move => "expected a move in coordinate notation, such as `e2e4`".fmt(f),
        }
    }
}

impl std::error::Error for NotationError { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Why a well-formed position was refused as a starting position
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IllegalPosition {
    /// Missing king or multiple kings of the same color
    WrongKingCount,
    /// The side that just moved has its king attacked
    OpponentInCheck,
    /// The side to move is already checkmated
    AlreadyCheckmate,
    /// The game is already drawn (stalemate or the fifty-move rule)
    AlreadyDraw,
    /// Neither side has enough material to checkmate
    InsufficientMaterial,
}

impl fmt::Display for IllegalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use IllegalPosition::*;

        match self {
            WrongKingCount => "each side must have exactly one king",
            OpponentInCheck => "king is under attack on opponent's move",
            AlreadyCheckmate => "position is already checkmate",
            AlreadyDraw => "position is already drawn",
            InsufficientMaterial => "position has insufficient material",
        }.fmt(f)
    }
}

impl std::error::Error for IllegalPosition { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A broken caller contract
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PreconditionViolation {
    /// Undo requested with no move to undo
    EmptyHistory,
    /// The move is not legal in the current position
    IllegalMove(Move),
}

impl fmt::Display for PreconditionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreconditionViolation::EmptyHistory => "no move to undo".fmt(f),
            PreconditionViolation::IllegalMove(mv) => write!(f, "illegal move {}", mv),
        }
    }
}

impl std::error::Error for PreconditionViolation { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error returned when parsing a `Color` fails
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "expected `w` or `b`".fmt(f)
    }
}

impl std::error::Error for ParseColorError { }

/// Error returned when parsing a `Kind` fails
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseKindError;

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "expected one of `K`, `Q`, `R`, `B`, `N`, `P` in either case".fmt(f)
    }
}

impl std::error::Error for ParseKindError { }

/// Error returned when parsing a `Coord` fails
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseCoordError;

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "expected a square from `a1` to `h8`".fmt(f)
    }
}

impl std::error::Error for ParseCoordError { }

/// Error returned when parsing a `Move` fails
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "expected a move in coordinate notation, such as `e2e4`".fmt(f)
    }
}

impl std::error::Error for ParseMoveError { }

impl From<ParseMoveError> for NotationError {
    fn from(_: ParseMoveError) -> Self {
        NotationError::Move
    }
}

impl From<ParseMoveError> for Error {
    fn from(err: ParseMoveError) -> Self {
        Error::Notation(err.into())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T, E = Error> = std::result::Result<T, E>;
