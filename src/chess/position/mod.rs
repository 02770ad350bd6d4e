//! Contains structures related to the `Position`
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::trace;
use super::*;
use super::error::PreconditionViolation;

use Color::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side of the board a castling move goes to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Side {
    KingSide,
    QueenSide,
}

impl Side {
    /// Both sides, king side first
    pub const ALL: [Side; 2] = [Side::KingSide, Side::QueenSide];

    /// Column of the rook that castles on this side
    pub fn rook_col(self) -> i8 {
        match self {
            Side::KingSide => 7,
            Side::QueenSide => 0,
        }
    }

    /// Column the rook lands on after castling
    pub fn rook_target_col(self) -> i8 {
        match self {
            Side::KingSide => 5,
            Side::QueenSide => 3,
        }
    }

    /// Column step the king takes toward this side
    pub fn direction(self) -> i8 {
        match self {
            Side::KingSide => 1,
            Side::QueenSide => -1,
        }
    }

    fn from_col_delta(delta: i8) -> Side {
        if delta > 0 { Side::KingSide } else { Side::QueenSide }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The four independent castling rights.
///
/// A right can only be revoked during play. Once revoked it stays revoked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    rights: [[bool; 2]; Color::COUNT],
}

impl CastlingRights {
    /// All four rights, as at the start of a game
    pub fn all() -> CastlingRights {
        CastlingRights { rights: [[true; 2]; Color::COUNT] }
    }

    /// No castling rights at all
    pub fn none() -> CastlingRights {
        CastlingRights::default()
    }

    /// Returns `true` if `color` may still castle to `side`
    pub fn get(self, color: Color, side: Side) -> bool {
        self.rights[color as usize][side as usize]
    }

    /// Returns `true` if no right is held
    pub fn is_empty(self) -> bool {
        self == CastlingRights::none()
    }

    fn grant(&mut self, color: Color, side: Side) {
        self.rights[color as usize][side as usize] = true;
    }

    /// Revokes a single right
    pub fn revoke(&mut self, color: Color, side: Side) {
        self.rights[color as usize][side as usize] = false;
    }

    /// Revokes both rights of `color`
    pub fn revoke_all(&mut self, color: Color) {
        self.rights[color as usize] = [false; 2];
    }

    /// Revokes the right tied to the rook's starting corner, if `coord` is one
    fn revoke_corner(&mut self, coord: Coord) {
        for &color in &[White, Black] {
            for &side in &Side::ALL {
                if coord == Coord::new(color.home_row(), side.rook_col()) {
                    self.revoke(color, side);
                }
            }
        }
    }
}

impl fmt::Display for CastlingRights {
    /// Writes the rights in FEN (eg `KQkq`, `Kq` or `-`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for &color in &[White, Black] {
            for &side in &Side::ALL {
                if self.get(color, side) {
                    let c = if side == Side::KingSide { 'K' } else { 'Q' };
                    s.push(if color == White { c } else { c.to_ascii_lowercase() });
                }
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Everything `Position::unmake()` needs to reverse a move made with `Position::make()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undo {
    mv: Move,
    piece: Piece,
    captured: Option<(Coord, Piece)>,
    rook: Option<Move>,
    castling: CastlingRights,
    ep_target: Option<Coord>,
    half_move_clock: usize,
    full_move_number: usize,
}

impl Undo {
    /// The move that was made
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// The piece that moved, as it stood before any promotion
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The captured piece and the square it was taken from. For en passant that square differs
    /// from the move's destination.
    pub fn captured(&self) -> Option<(Coord, Piece)> {
        self.captured
    }

    /// The rook's move when the move was castling
    pub fn rook_move(&self) -> Option<Move> {
        self.rook
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The state of the board at a given point in the game: placement, side to move, castling rights,
/// en-passant target and the two move counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [[Option<Piece>; Coord::COLS as usize]; Coord::ROWS as usize],
    turn: Color,
    castling: CastlingRights,
    ep_target: Option<Coord>,
    half_move_clock: usize,
    full_move_number: usize,
}

const BACK_RANK: [Kind; 8] = [
    Kind::Rook, Kind::Knight, Kind::Bishop, Kind::Queen,
    Kind::King, Kind::Bishop, Kind::Knight, Kind::Rook,
];

impl Position {
    /// Returns the standard starting Position
    pub fn new() -> Position {
        let mut pos = Position::empty_board();

        for &color in &[White, Black] {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                let col = col as i8;
                pos.set(Coord::new(color.home_row(), col), Some(Piece::new(color, kind)));
                pos.set(Coord::new(color.pawn_row(), col), Some(Piece::new(color, Kind::Pawn)));
            }
        }
        pos.castling = CastlingRights::all();

        pos
    }

    /// Returns a position with an empty board
    fn empty_board() -> Position {
        Position {
            board: [[None; Coord::COLS as usize]; Coord::ROWS as usize],
            turn: White,
            castling: CastlingRights::none(),
            ep_target: None,
            half_move_clock: 0,
            full_move_number: 1,
        }
    }

    /// Returns the side to move
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the castling rights still held
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the square a pawn skipped over on the previous move, if any
    pub fn ep_target(&self) -> Option<Coord> {
        self.ep_target
    }

    /// Plies since the last capture or pawn move
    pub fn half_move_clock(&self) -> usize {
        self.half_move_clock
    }

    /// Starts at 1 and increments after each move by Black
    pub fn full_move_number(&self) -> usize {
        self.full_move_number
    }

    /// Returns the piece on `coord`, or `None` if the square is empty or off the board
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        if coord.in_bounds() {
            self.board[coord.row() as usize][coord.col() as usize]
        } else {
            None
        }
    }

    fn set(&mut self, coord: Coord, piece: Option<Piece>) {
        self.board[coord.row() as usize][coord.col() as usize] = piece;
    }

    /// Iterates over the occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |coord| self.piece_at(coord).map(|piece| (coord, piece)))
    }

    /// Returns the location of the king of color `c`
    pub fn king_location(&self, c: Color) -> Option<Coord> {
        let king = Piece::new(c, Kind::King);
        self.pieces().find(|&(_, piece)| piece == king).map(|(coord, _)| coord)
    }

    /// Returns the pseudo-legal candidates of the piece on `from`, in generator order.
    pub fn candidates_at(&self, from: Coord) -> Vec<Move> {
        match self.piece_at(from) {
            Some(piece) => piece.strategy().candidates(self, from),
            None => Vec::new(),
        }
    }

    /// Returns every pseudo-legal candidate of color `c`, scanning source squares in row-major
    /// order.
    pub fn pseudo_legal_moves(&self, c: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, piece) in self.pieces().filter(|&(_, piece)| piece.color() == c) {
            piece.strategy().generate(self, from, &mut moves);
        }
        moves
    }

    /// Returns `true` if a piece of color `c` could capture on `target`.
    ///
    /// Attacks are the candidate targets of `c`'s pieces, except pawn pushes and the king's
    /// two-file castling candidates. Those never capture, so a king standing in front of an
    /// enemy pawn, or two files from the enemy king, is not in check.
    pub fn is_attacked_by(&self, target: Coord, c: Color) -> bool {
        self.pieces()
            .filter(|&(_, piece)| piece.color() == c)
            .any(|(from, piece)| {
                piece.strategy().candidates(self, from).into_iter().any(|mv| {
                    mv.to() == target && match piece.kind() {
                        Kind::Pawn => mv.col_delta() != 0,
                        Kind::King => mv.col_delta().abs() < 2,
                        _ => true,
                    }
                })
            })
    }

    /// Returns `true` if the king of color `c` is attacked
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_location(c) {
            Some(king) => self.is_attacked_by(king, !c),
            None => false,
        }
    }

    /// Returns `true` if `mv` is a candidate of the piece on its source square and passes every
    /// legality condition.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.candidates_at(mv.from()).contains(&mv) && self.passes_filter(mv)
    }

    /// Returns all legal moves for the side to move, in generator order
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pseudo_legal_moves(self.turn)
            .into_iter()
            .filter(|&mv| self.passes_filter(mv))
            .collect()
    }

    /// Returns the legal moves of the piece on `from`. Empty unless that piece belongs to the side
    /// to move.
    pub fn legal_moves_at(&self, from: Coord) -> Vec<Move> {
        self.candidates_at(from)
            .into_iter()
            .filter(|&mv| self.passes_filter(mv))
            .collect()
    }

    fn passes_filter(&self, mv: Move) -> bool {
        match self.check_conditions(mv) {
            Ok(()) => true,
            Err(reason) => {
                trace!("{} rejected: {}", mv, reason);
                false
            }
        }
    }

    /// Applies the legality conditions to a candidate, in order, and names the first one it fails.
    fn check_conditions(&self, mv: Move) -> std::result::Result<(), &'static str> {
        if !mv.in_bounds() {
            return Err("off the board");
        }
        let piece = match self.piece_at(mv.from()) {
            Some(piece) if piece.color() == self.turn => piece,
            _ => return Err("no piece of the side to move on the source square"),
        };
        let target = self.piece_at(mv.to());
        if let Some(target) = target {
            if target.is_allied_with(piece) {
                return Err("destination holds an allied piece");
            }
        }

        match piece.kind() {
            Kind::Pawn => self.check_pawn(mv, target)?,
            Kind::King if mv.col_delta().abs() == 2 => self.check_castling(mv)?,
            _ => {}
        }

        let mut after = self.clone();
        match after.commit(mv) {
            Some(_) if after.in_check(piece.color()) => Err("leaves own king in check"),
            Some(_) => Ok(()),
            None => Err("cannot be applied"),
        }
    }

    fn check_pawn(&self, mv: Move, target: Option<Piece>) -> std::result::Result<(), &'static str> {
        if mv.col_delta() == 0 {
            if target.is_some() {
                return Err("pawn push is blocked");
            }
            if mv.row_delta().abs() == 2 {
                if mv.from().row() != self.turn.pawn_row() {
                    return Err("double push away from the starting rank");
                }
                if self.piece_at(mv.from().offset(self.turn.pawn_direction(), 0)).is_some() {
                    return Err("double push passes an occupied square");
                }
            }
        } else if target.is_none() && self.ep_target != Some(mv.to()) {
            return Err("pawn diagonal without a capture");
        }
        Ok(())
    }

    fn check_castling(&self, mv: Move) -> std::result::Result<(), &'static str> {
        let color = self.turn;
        let side = Side::from_col_delta(mv.col_delta());
        let row = color.home_row();

        if !self.castling.get(color, side) {
            return Err("castling right already lost");
        }
        if mv.from() != Coord::new(row, 4)
            || self.piece_at(Coord::new(row, side.rook_col())) != Some(Piece::new(color, Kind::Rook))
        {
            return Err("king or rook is not on its starting square");
        }
        if self.in_check(color) {
            return Err("castling out of check");
        }
        let passing = mv.from().offset(0, side.direction());
        for &square in &[passing, mv.to()] {
            if self.piece_at(square).is_some() {
                return Err("castling path is occupied");
            }
            if self.is_attacked_by(square, !color) {
                return Err("castling through or into check");
            }
        }
        if side == Side::QueenSide && self.piece_at(Coord::new(row, 1)).is_some() {
            return Err("castling path is occupied");
        }
        Ok(())
    }

    /// Makes a legal move and returns the record needed to undo it.
    ///
    /// Returns an error without changing the position if `mv` is not legal.
    pub fn make(&mut self, mv: Move) -> Result<Undo> {
        if !self.is_legal(mv) {
            return Err(PreconditionViolation::IllegalMove(mv).into());
        }
        self.commit(mv).ok_or_else(|| PreconditionViolation::IllegalMove(mv).into())
    }

    /// Applies a move without checking legality. Returns `None` only if the source square is
    /// empty.
    pub(crate) fn commit(&mut self, mv: Move) -> Option<Undo> {
        let (from, to) = (mv.from(), mv.to());
        let piece = self.piece_at(from)?;
        let color = piece.color();
        let kind = piece.kind();

        let mut undo = Undo {
            mv,
            piece,
            captured: None,
            rook: None,
            castling: self.castling,
            ep_target: self.ep_target,
            half_move_clock: self.half_move_clock,
            full_move_number: self.full_move_number,
        };

        if let Some(target) = self.piece_at(to) {
            undo.captured = Some((to, target));
        } else if kind == Kind::Pawn && mv.col_delta() != 0 && self.ep_target == Some(to) {
            // the captured pawn sits beside the mover, behind the target square
            let behind = Coord::new(from.row(), to.col());
            if self.piece_at(behind) == Some(Piece::new(!color, Kind::Pawn)) {
                undo.captured = Some((behind, Piece::new(!color, Kind::Pawn)));
                self.set(behind, None);
            }
        }

        self.set(from, None);
        if kind == Kind::Pawn && to.row() == color.promotion_row() {
            self.set(to, Some(Piece::new(color, Kind::Queen)));
        } else {
            self.set(to, Some(piece));
        }

        if kind == Kind::King && mv.col_delta().abs() == 2 {
            let side = Side::from_col_delta(mv.col_delta());
            let rook = Move::new(Coord::new(from.row(), side.rook_col()),
                Coord::new(from.row(), side.rook_target_col()));
            let rook_piece = self.piece_at(rook.from());
            self.set(rook.from(), None);
            self.set(rook.to(), rook_piece);
            undo.rook = Some(rook);
        }

        if kind == Kind::King {
            self.castling.revoke_all(color);
        }
        self.castling.revoke_corner(from);
        self.castling.revoke_corner(to);

        self.ep_target = if kind == Kind::Pawn && mv.row_delta().abs() == 2 {
            Some(from.offset(color.pawn_direction(), 0))
        } else {
            None
        };

        if kind == Kind::Pawn || undo.captured.is_some() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        if color == Black {
            self.full_move_number += 1;
        }
        self.turn = !color;

        Some(undo)
    }

    /// Reverses a move made with `make()`, restoring the exact prior state.
    pub fn unmake(&mut self, undo: Undo) {
        let (from, to) = (undo.mv.from(), undo.mv.to());

        if let Some(rook) = undo.rook {
            let rook_piece = self.piece_at(rook.to());
            self.set(rook.to(), None);
            self.set(rook.from(), rook_piece);
        }
        self.set(to, None);
        self.set(from, Some(undo.piece));
        if let Some((coord, piece)) = undo.captured {
            self.set(coord, Some(piece));
        }

        self.turn = undo.piece.color();
        self.castling = undo.castling;
        self.ep_target = undo.ep_target;
        self.half_move_clock = undo.half_move_clock;
        self.full_move_number = undo.full_move_number;
    }

    /// Returns `true` if the side to move has no legal moves and is in check
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.turn) && self.legal_moves().is_empty()
    }

    /// Returns `true` if the side to move has no legal moves and is not in check
    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.turn) && self.legal_moves().is_empty()
    }

    /// Returns `true` if there are no pawns, rooks or queens and at most one minor piece on the
    /// board.
    pub fn insufficient_material(&self) -> bool {
        let mut majors = 0;
        let mut minors = 0;
        for (_, piece) in self.pieces() {
            match piece.kind() {
                Kind::Pawn | Kind::Rook | Kind::Queen => majors += 1,
                Kind::Knight | Kind::Bishop => minors += 1,
                Kind::King => {}
            }
        }
        majors == 0 && minors <= 1
    }

    /// Returns `true` if the fifty-move rule applies
    pub fn fifty_moves(&self) -> bool {
        self.half_move_clock >= 100
    }

    /// Renders the board as text, rank 8 at the top, with `.` for empty squares.
    pub fn diagram(&self) -> String {
        let mut s = String::new();
        for row in 0..Coord::ROWS {
            s += &format!("{} ", Coord::ROWS - row);
            for col in 0..Coord::COLS {
                let c = self.piece_at(Coord::new(row, col)).map_or('.', Piece::notation);
                s.push(' ');
                s.push(c);
            }
            s.push('\n');
        }
        s += "   a b c d e f g h\n";
        s
    }
}

impl Default for Position {
    /// Returns the standard starting Position
    fn default() -> Self {
        Position::new()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod fen;
