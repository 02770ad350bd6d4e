//! Contains structures to represent and generate moves
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use regex::Regex;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move from one coordinate to another.
///
/// A `Move` carries no information about the position it is played in. Promotion is implied (a
/// pawn reaching the last rank always becomes a queen) and castling is written as the king's
/// two-file move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    from: Coord,
    to: Coord,
}

impl Move {
    /// Returns the move from `from` to `to`
    pub fn new(from: Coord, to: Coord) -> Move {
        Move { from, to }
    }

    /// Returns the origin of the moved piece
    pub fn from(self) -> Coord {
        self.from
    }

    /// Returns the destination of the moved piece
    pub fn to(self) -> Coord {
        self.to
    }

    /// Destination row minus origin row
    pub fn row_delta(self) -> i8 {
        self.to.row() - self.from.row()
    }

    /// Destination column minus origin column
    pub fn col_delta(self) -> i8 {
        self.to.col() - self.from.col()
    }

    /// Returns `true` if both coordinates lie on the board
    pub fn in_bounds(self) -> bool {
        self.from.in_bounds() && self.to.in_bounds()
    }
}

impl fmt::Display for Move {
    /// Writes the move in coordinate notation (eg `e2e4`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}{}", self.from, self.to).fmt(f)
    }
}

lazy_static! {
    static ref MOVE_RE: Regex = Regex::new(r"^([a-h][1-8])([a-h][1-8])([qQ])?$").expect("INFALLIBLE");
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parses coordinate notation. A trailing `q` is accepted on moves to the first or eighth
    /// rank, since every promotion is to a queen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = MOVE_RE.captures(s.trim()).ok_or(ParseMoveError)?;
        let from = caps[1].parse().map_err(|_| ParseMoveError)?;
        let to: Coord = caps[2].parse().map_err(|_| ParseMoveError)?;
        if caps.get(3).is_some() && to.row() != 0 && to.row() != Coord::ROWS - 1 {
            return Err(ParseMoveError);
        }

        Ok(Move::new(from, to))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Rook directions as (row, column) steps
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Bishop directions as (row, column) steps
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Queen directions as (row, column) steps
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] =
    [(0, 1), (1, 0), (0, -1), (-1, 0), (1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Knight jumps as (row, column) offsets
pub const KNIGHT_OFFSETS: [(i8, i8); 8] =
    [(2, 1), (1, 2), (2, -1), (-1, 2), (-2, 1), (1, -2), (-2, -1), (-1, -2)];

/// King steps as (row, column) offsets
pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// How a piece produces its pseudo-legal candidate moves.
///
/// Candidates are geometric only. Occupancy beyond "a rider stops at the first piece", pawn
/// rules, castling conditions and check are all left to the legality filter in `Position`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Slides along each direction until it leaves the board or reaches an occupied square,
    /// which is included
    Rider(&'static [(i8, i8)]),
    /// Jumps to each offset that lands on the board
    Hopper(&'static [(i8, i8)]),
    /// Single push, double push, then both diagonal captures, in the mover's direction
    Pawn,
    /// A hopper over `KING_OFFSETS` plus both castling candidates
    King,
}

impl Strategy {
    /// Appends the candidate moves of the piece on `from` to `moves`.
    pub fn generate(self, pos: &Position, from: Coord, moves: &mut Vec<Move>) {
        match self {
            Strategy::Rider(directions) => rider(pos, from, directions, moves),
            Strategy::Hopper(offsets) => hopper(from, offsets, moves),
            Strategy::Pawn => pawn(pos, from, moves),
            Strategy::King => king(from, moves),
        }
    }

    /// Returns the candidate moves of the piece on `from`.
    pub fn candidates(self, pos: &Position, from: Coord) -> Vec<Move> {
        let mut moves = Vec::new();
        self.generate(pos, from, &mut moves);
        moves
    }
}

fn rider(pos: &Position, from: Coord, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(d_row, d_col) in directions {
        let mut to = from.offset(d_row, d_col);
        while to.in_bounds() {
            moves.push(Move::new(from, to));
            if pos.piece_at(to).is_some() {
                break;
            }
            to = to.offset(d_row, d_col);
        }
    }
}

fn hopper(from: Coord, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
    moves.extend(offsets.iter()
        .map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|to| to.in_bounds())
        .map(|to| Move::new(from, to)));
}

fn king(from: Coord, moves: &mut Vec<Move>) {
    hopper(from, &KING_OFFSETS, moves);
    // castling candidates are always emitted; the legality filter decides
    moves.push(Move::new(from, from.offset(0, 2)));
    moves.push(Move::new(from, from.offset(0, -2)));
}

fn pawn(pos: &Position, from: Coord, moves: &mut Vec<Move>) {
    let color = match pos.piece_at(from) {
        Some(piece) => piece.color(),
        None => return,
    };
    let forward = color.pawn_direction();

    moves.push(Move::new(from, from.offset(forward, 0)));
    moves.push(Move::new(from, from.offset(2 * forward, 0)));
    moves.push(Move::new(from, from.offset(forward, 1)));
    moves.push(Move::new(from, from.offset(forward, -1)));
}
