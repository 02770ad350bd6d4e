//! The `chess` module implements the rules of chess: piece movement, legality, move execution,
//! game termination and FEN.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops;
use std::fmt;
use std::str::FromStr;
use error::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Row change of a single pawn step. Row 0 is the eighth rank, so White moves up the board
    /// by decreasing its row.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row holding this color's king and rooks at the start of the game
    pub fn home_row(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// The row holding this color's pawns at the start of the game
    pub fn pawn_row(self) -> i8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// The row on which this color's pawns promote
    pub fn promotion_row(self) -> i8 {
        (!self).home_row()
    }

    /// Full lower-case name of the color
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chess_rules::chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(ParseColorError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece, independent of its color
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Kind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl Kind {
    /// The number of piece types
    pub const COUNT: usize = 6;

    /// Every kind, in notation order
    pub const ALL: [Kind; Kind::COUNT] =
        [Kind::King, Kind::Queen, Kind::Rook, Kind::Bishop, Kind::Knight, Kind::Pawn];

    /// The move-generation strategy shared by both colors of this kind
    pub fn strategy(self) -> Strategy {
        match self {
            Kind::King => Strategy::King,
            Kind::Queen => Strategy::Rider(&QUEEN_DIRECTIONS),
            Kind::Rook => Strategy::Rider(&ROOK_DIRECTIONS),
            Kind::Bishop => Strategy::Rider(&BISHOP_DIRECTIONS),
            Kind::Knight => Strategy::Hopper(&KNIGHT_OFFSETS),
            Kind::Pawn => Strategy::Pawn,
        }
    }

    /// The upper-case notation letter
    pub fn letter(self) -> char {
        match self {
            Kind::King => 'K',
            Kind::Queen => 'Q',
            Kind::Rook => 'R',
            Kind::Bishop => 'B',
            Kind::Knight => 'N',
            Kind::Pawn => 'P',
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letter().fmt(f)
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "K"|"k" => Ok(Kind::King),
            "Q"|"q" => Ok(Kind::Queen),
            "R"|"r" => Ok(Kind::Rook),
            "B"|"b" => Ok(Kind::Bishop),
            "N"|"n" => Ok(Kind::Knight),
            "P"|"p" => Ok(Kind::Pawn),
            _       => Err(ParseKindError),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// One of the twelve piece identities. Pieces are plain values; the `Position` owns placement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Piece {
    WhiteKing, WhiteQueen, WhiteRook, WhiteBishop, WhiteKnight, WhitePawn,
    BlackKing, BlackQueen, BlackRook, BlackBishop, BlackKnight, BlackPawn,
}

impl Piece {
    /// The number of piece identities
    pub const COUNT: usize = Color::COUNT * Kind::COUNT;

    /// Every piece, White first
    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::WhiteKing, Piece::WhiteQueen, Piece::WhiteRook,
        Piece::WhiteBishop, Piece::WhiteKnight, Piece::WhitePawn,
        Piece::BlackKing, Piece::BlackQueen, Piece::BlackRook,
        Piece::BlackBishop, Piece::BlackKnight, Piece::BlackPawn,
    ];

    /// Returns the piece of the given color and kind
    pub fn new(color: Color, kind: Kind) -> Piece {
        use Piece::*;

        match (color, kind) {
            (Color::White, Kind::King) => WhiteKing,
            (Color::White, Kind::Queen) => WhiteQueen,
            (Color::White, Kind::Rook) => WhiteRook,
            (Color::White, Kind::Bishop) => WhiteBishop,
            (Color::White, Kind::Knight) => WhiteKnight,
            (Color::White, Kind::Pawn) => WhitePawn,
            (Color::Black, Kind::King) => BlackKing,
            (Color::Black, Kind::Queen) => BlackQueen,
            (Color::Black, Kind::Rook) => BlackRook,
            (Color::Black, Kind::Bishop) => BlackBishop,
            (Color::Black, Kind::Knight) => BlackKnight,
            (Color::Black, Kind::Pawn) => BlackPawn,
        }
    }

    /// Returns the piece's color
    pub fn color(self) -> Color {
        use Piece::*;

        match self {
            WhiteKing | WhiteQueen | WhiteRook | WhiteBishop | WhiteKnight | WhitePawn => {
                Color::White
            }
            _ => Color::Black,
        }
    }

    /// Returns the piece's kind
    pub fn kind(self) -> Kind {
        use Piece::*;

        match self {
            WhiteKing | BlackKing => Kind::King,
            WhiteQueen | BlackQueen => Kind::Queen,
            WhiteRook | BlackRook => Kind::Rook,
            WhiteBishop | BlackBishop => Kind::Bishop,
            WhiteKnight | BlackKnight => Kind::Knight,
            WhitePawn | BlackPawn => Kind::Pawn,
        }
    }

    /// The FEN character: upper case for White, lower case for Black
    pub fn notation(self) -> char {
        match self.color() {
            Color::White => self.kind().letter(),
            Color::Black => self.kind().letter().to_ascii_lowercase(),
        }
    }

    /// Returns the piece whose FEN character is `c`, if any
    pub fn from_notation(c: char) -> Option<Piece> {
        Piece::ALL.iter().copied().find(|piece| piece.notation() == c)
    }

    /// The move-generation strategy assigned to this piece
    pub fn strategy(self) -> Strategy {
        self.kind().strategy()
    }

    /// Returns `true` if both pieces belong to the same side
    pub fn is_allied_with(self, other: Piece) -> bool {
        self.color() == other.color()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.notation().fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A (row, column) pair. Row 0 is the eighth rank and column 0 is the a-file, so `a8` is
/// `(0, 0)` and `e1` is `(7, 4)`.
///
/// A `Coord` may lie off the board; offsetting never fails and `in_bounds()` tells the two apart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
    row: i8,
    col: i8,
}

impl Coord {
    /// The number of rows on the board
    pub const ROWS: i8 = 8;
    /// The number of columns on the board
    pub const COLS: i8 = 8;

    /// Returns the coordinate at `row` and `col`
    pub fn new(row: i8, col: i8) -> Coord {
        Coord { row, col }
    }

    /// Returns the coordinate's row
    pub fn row(self) -> i8 {
        self.row
    }

    /// Returns the coordinate's column
    pub fn col(self) -> i8 {
        self.col
    }

    /// Returns `true` if the coordinate lies on the 8x8 board
    pub fn in_bounds(self) -> bool {
        0 <= self.row && self.row < Coord::ROWS && 0 <= self.col && self.col < Coord::COLS
    }

    /// Returns the coordinate `d_row` rows and `d_col` columns away
    pub fn offset(self, d_row: i8, d_col: i8) -> Coord {
        Coord::new(self.row + d_row, self.col + d_col)
    }

    /// Iterates over every square of the board in row-major order, starting at `a8`
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..Coord::ROWS).flat_map(|row| (0..Coord::COLS).map(move |col| Coord::new(row, col)))
    }
}

impl fmt::Display for Coord {
    /// Writes algebraic notation (eg `e4`), or `(row,col)` for a coordinate off the board
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            let file = (b'a' + self.col as u8) as char;
            let rank = (b'8' - self.row as u8) as char;
            format!("{}{}", file, rank).fmt(f)
        } else {
            format!("({},{})", self.row, self.col).fmt(f)
        }
    }
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c: Vec<_> = s.chars().collect();
        match c.as_slice() {
            [file @ 'a'..='h', rank @ '1'..='8'] => {
                Ok(Coord::new((b'8' - *rank as u8) as i8, (*file as u8 - b'a') as i8))
            }
            _ => Err(ParseCoordError),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod moves;
pub mod position;
pub mod game;
pub mod variations;
pub mod error;

pub use moves::{Move, Strategy};
pub use moves::{ROOK_DIRECTIONS, BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, KNIGHT_OFFSETS, KING_OFFSETS};
pub use position::{Position, CastlingRights, Side, Undo};
pub use game::{Game, Players, GameResult, WinReason, DrawReason};
pub use error::{Error, Result};
