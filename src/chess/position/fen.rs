//! Reading and writing positions in Forsyth-Edwards Notation
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use regex::Regex;
use super::*;
use super::super::error::{NotationError, IllegalPosition};

lazy_static! {
    static ref CASTLING_RE: Regex = Regex::new(r"^(-|K?Q?k?q?)$").expect("INFALLIBLE");
}

impl Position {
    /// Parse a position from a FEN string.
    ///
    /// All six fields are required. Besides the syntax, the position must have exactly one king
    /// per side, and the side that just moved must not be in check.
    pub fn from_fen_str(s: &str) -> Result<Position> {
        use NotationError::*;

        let fields: Vec<&str> = s.split_whitespace().collect();
        match fields.len() {
            0 => return Err(Empty.into()),
            6 => {}
            n => return Err(FieldCount(n).into()),
        }

        let mut pos = Position::empty_board();

        // piece placement, rank 8 first
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != Coord::ROWS as usize {
            return Err(RankCount.into());
        }
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            for c in rank.chars() {
                match c {
                    '1'..='8' => col += c.to_digit(10).expect("INFALLIBLE") as i8,
                    _ => {
                        let piece = Piece::from_notation(c).ok_or(UnknownPiece(c))?;
                        if col >= Coord::COLS {
                            return Err(RankWidth.into());
                        }
                        pos.set(Coord::new(row as i8, col), Some(piece));
                        col += 1;
                    }
                }
                if col > Coord::COLS {
                    return Err(RankWidth.into());
                }
            }
            if col != Coord::COLS {
                return Err(RankWidth.into());
            }
        }

        pos.turn = fields[1].parse().map_err(|_| Turn)?;

        if !CASTLING_RE.is_match(fields[2]) {
            return Err(Castling.into());
        }
        for c in fields[2].chars() {
            match c {
                'K' => pos.castling.grant(Color::White, Side::KingSide),
                'Q' => pos.castling.grant(Color::White, Side::QueenSide),
                'k' => pos.castling.grant(Color::Black, Side::KingSide),
                'q' => pos.castling.grant(Color::Black, Side::QueenSide),
                _ => {}
            }
        }

        pos.ep_target = match fields[3] {
            "-" => None,
            square => {
                let coord: Coord = square.parse().map_err(|_| EnPassant)?;
                // only right after the opponent's double push, which left its pawn just past
                // the target
                let mover = !pos.turn;
                let pawn = coord.offset(mover.pawn_direction(), 0);
                if coord.row() != mover.pawn_row() + mover.pawn_direction()
                    || pos.piece_at(pawn) != Some(Piece::new(mover, Kind::Pawn))
                {
                    return Err(EnPassant.into());
                }
                Some(coord)
            }
        };

        pos.half_move_clock = fields[4].parse().map_err(|_| HalfMoveClock)?;
        pos.full_move_number = match fields[5].parse() {
            Ok(n) if n > 0 => n,
            _ => return Err(FullMoveNumber.into()),
        };

        // exactly one king per side
        for &color in &[Color::White, Color::Black] {
            let king = Piece::new(color, Kind::King);
            if pos.pieces().filter(|&(_, piece)| piece == king).count() != 1 {
                return Err(IllegalPosition::WrongKingCount.into());
            }
        }
        // the side not on move cannot be in check
        if pos.in_check(!pos.turn) {
            return Err(IllegalPosition::OpponentInCheck.into());
        }

        Ok(pos)
    }

    /// The piece placement field
    fn placement(&self) -> String {
        let mut board = String::new();

        for row in 0..Coord::ROWS {
            let mut count = 0;
            for col in 0..Coord::COLS {
                match self.piece_at(Coord::new(row, col)) {
                    Some(piece) => {
                        if count > 0 {
                            board += &count.to_string();
                            count = 0;
                        }
                        board.push(piece.notation());
                    }
                    None => count += 1,
                }
            }
            if count > 0 {
                board += &count.to_string();
            }
            if row + 1 < Coord::ROWS {
                board.push('/');
            }
        }

        board
    }

    /// Converts the position to a FEN string
    pub fn to_fen_str(&self) -> String {
        format!("{} {} {}", self.repetition_key(), self.half_move_clock, self.full_move_number)
    }

    /// The first four FEN fields: placement, side to move, castling rights and en-passant target.
    ///
    /// Two positions with the same key count as the same position for threefold repetition.
    pub fn repetition_key(&self) -> String {
        let ep_target = match self.ep_target {
            Some(coord) => coord.to_string(),
            None => "-".to_string(),
        };
        format!("{} {} {} {}", self.placement(), self.turn, self.castling, ep_target)
    }
}

impl fmt::Display for Position {
    /// Writes out the position using FEN
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse a position from a FEN string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen_str(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    fn notation(err: NotationError) -> Result<Position> {
        Err(Error::Notation(err))
    }

    fn illegal(err: IllegalPosition) -> Result<Position> {
        Err(Error::IllegalPosition(err))
    }

    /// Tests for Position::from_fen_str()
    mod from_fen_str {
        use super::*;
        use NotationError::*;

        // 1. empty string returns Err(Empty)
        #[test]
        fn empty_string_returns_error() {
            assert_eq!(Position::from_fen_str(""), notation(Empty));
            assert_eq!(Position::from_fen_str(" \t\r\n"), notation(Empty));
        }

        // 2. anything but six fields is an error
        #[test]
        fn wrong_field_count_returns_error() {
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - -"), notation(FieldCount(4)));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - 0 1 x"),
                notation(FieldCount(7)));
        }

        // 3. 0 or 9 in the board field is not a piece
        #[test]
        fn invalid_empty_square_count_returns_error() {
            assert_eq!(Position::from_fen_str("0K1k5/8/8/8/8/8/8/8 w - - 0 1"),
                notation(UnknownPiece('0')));
            assert_eq!(Position::from_fen_str("K1k5/9/8/8/8/8/8/8 w - - 0 1"),
                notation(UnknownPiece('9')));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/x7/8/8/8 w - - 0 1"),
                notation(UnknownPiece('x')));
        }

        // 4. ranks must cover exactly 8 files
        #[test]
        fn wrong_rank_width_returns_error() {
            assert_eq!(Position::from_fen_str("K1k6/8/8/8/8/8/8/8 w - - 0 1"), notation(RankWidth));
            assert_eq!(Position::from_fen_str("K1k5b/8/8/8/8/8/8/8 w - - 0 1"), notation(RankWidth));
            assert_eq!(Position::from_fen_str("K1k4/8/8/8/8/8/8/8 w - - 0 1"), notation(RankWidth));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/b6 w - - 0 1"), notation(RankWidth));
        }

        // 5. the board must have exactly 8 ranks
        #[test]
        fn wrong_rank_count_returns_error() {
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8/8 w - - 0 1"), notation(RankCount));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8 w - - 0 1"), notation(RankCount));
        }

        // 6. 'w' and 'b' set the turn, anything else is an error
        #[test]
        fn turn_field() {
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 b - - 0 1")
                .expect("valid fen").turn(), Color::Black);
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 W - - 0 1"), notation(Turn));
        }

        // 7. castling flags are a subset of KQkq in order, or '-'
        #[test]
        fn castling_field() {
            let pos = Position::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1")
                .expect("valid fen");
            assert!(pos.castling_rights().get(Color::White, Side::KingSide));
            assert!(!pos.castling_rights().get(Color::White, Side::QueenSide));
            assert!(!pos.castling_rights().get(Color::Black, Side::KingSide));
            assert!(pos.castling_rights().get(Color::Black, Side::QueenSide));

            assert_eq!(Position::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w qK - 0 1"),
                notation(Castling));
            assert_eq!(Position::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w KX - 0 1"),
                notation(Castling));
            assert_eq!(Position::from_fen_str("r3k2r/8/8/8/8/8/8/R3K2R w K- - 0 1"),
                notation(Castling));
        }

        // 8. en-passant target must be '-' or a square on rank 3 or 6
        #[test]
        fn en_passant_field() {
            let pos = Position::from_fen_str("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1")
                .expect("valid fen");
            assert_eq!(pos.ep_target(), Some("d6".parse().unwrap()));
            assert_eq!(Position::from_fen_str("4k3/8/8/3pP3/8/8/8/4K3 w - d5 0 1"),
                notation(EnPassant));
            assert_eq!(Position::from_fen_str("4k3/8/8/3pP3/8/8/8/4K3 w - z6 0 1"),
                notation(EnPassant));

            // the target must be on the rank behind the side that just moved
            assert_eq!(Position::from_fen_str("4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1"),
                notation(EnPassant));
            assert_eq!(Position::from_fen_str("4k3/8/8/8/3pP3/8/8/4K3 w - e3 0 1"),
                notation(EnPassant));

            // and a pawn of the side that just moved must stand just past it
            assert_eq!(Position::from_fen_str("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1"),
                notation(EnPassant));
            assert_eq!(Position::from_fen_str("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1")
                .map(|pos| pos.ep_target()), Ok(Some("e3".parse().unwrap())));
        }

        // 9. counters are decimal integers, and the move number starts at 1
        #[test]
        fn counter_fields() {
            let pos = Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - 12 34").expect("valid fen");
            assert_eq!(pos.half_move_clock(), 12);
            assert_eq!(pos.full_move_number(), 34);
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - x 1"),
                notation(HalfMoveClock));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - -1 1"),
                notation(HalfMoveClock));
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/8 w - - 0 0"),
                notation(FullMoveNumber));
        }

        // 10. exactly one king of each color
        #[test]
        fn wrong_king_count_returns_error() {
            assert_eq!(Position::from_fen_str("K1k5/8/8/8/8/8/8/7K w - - 0 1"),
                illegal(IllegalPosition::WrongKingCount));
            assert_eq!(Position::from_fen_str("K7/8/8/8/8/8/8/8 w - - 0 1"),
                illegal(IllegalPosition::WrongKingCount));
        }

        // 11. the side that just moved cannot be in check
        #[test]
        fn capturable_king_returns_error() {
            assert_eq!(Position::from_fen_str("4k3/8/8/8/8/8/8/4RK2 w - - 0 1"),
                illegal(IllegalPosition::OpponentInCheck));
            Position::from_fen_str("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").expect("valid fen");
        }

        // 12. syntax errors are reported before position errors
        #[test]
        fn syntax_checked_first() {
            assert_eq!(Position::from_fen_str("8/8/8/8/8/8/8/8 w - - 0 0"),
                notation(FullMoveNumber));
        }
    }

    // writing then reading a position gives back the same string
    #[test]
    fn back_to_identical_fen() {
        for fen in &[
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w Kq e6 0 3",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 11 40",
        ] {
            assert_eq!(&Position::from_fen_str(fen).expect("valid fen").to_fen_str(), fen);
        }
    }

    #[test]
    fn repetition_key_ignores_counters() {
        let a: Position = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let b: Position = "4k3/8/8/8/8/8/8/4K3 w - - 7 19".parse().unwrap();
        assert_eq!(a.repetition_key(), "4k3/8/8/8/8/8/8/4K3 w - -");
        assert_eq!(a.repetition_key(), b.repetition_key());
        assert_ne!(a, b);
    }

    #[test]
    fn display_and_fromstr_agree() {
        let pos = Position::new();
        assert_eq!(pos.to_string().parse::<Position>(), Ok(pos));
    }
}
