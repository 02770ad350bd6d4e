//! Plays complete games through the public `Game` interface
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use chess_rules::chess::*;

fn new_game() -> Game {
    Game::new(Players::default(), None).expect("standard start")
}

fn play(moves: &str) -> Game {
    let mut game = new_game();
    game.push_moves_from_str(moves).expect("legal moves");
    game
}

fn sq(s: &str) -> Coord {
    s.parse().expect("valid square")
}

#[test]
fn scholars_mate() {
    let game = play("e2e4 e7e5 f1c4 b8c6 d1h5 g8f6 h5f7");
    assert_eq!(game.turn(), Color::Black);
    assert!(game.is_checkmate());
    assert!(!game.is_draw());
    assert!(game.legal_moves().is_empty());
    assert_eq!(game.result(), Some(GameResult::Win(Color::White, Some(WinReason::Checkmate))));
    assert_eq!(game.fen(), "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
}

#[test]
fn en_passant() {
    let mut game = play("e2e4 a7a6 e4e5 d7d5");
    assert_eq!(game.fen(), "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    assert!(game.legal_moves_at(sq("e5")).contains(&"e5d6".parse().unwrap()));

    game.push_move("e5d6".parse().unwrap()).unwrap();
    assert_eq!(game.piece_at(sq("d5")), None);
    assert_eq!(game.piece_at(sq("d6")), Some(Piece::WhitePawn));
    assert_eq!(game.fen(), "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3");

    game.pop_move().unwrap();
    assert_eq!(game.piece_at(sq("d5")), Some(Piece::BlackPawn));
    assert_eq!(game.fen(), "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
}

#[test]
fn en_passant_expires_after_one_move() {
    let game = play("e2e4 a7a6 e4e5 d7d5 h2h3 a6a5");
    assert!(!game.legal_moves_at(sq("e5")).contains(&"e5d6".parse().unwrap()));
}

#[test]
fn en_passant_target_needs_a_double_push() {
    for fen in &["4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1", "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1"] {
        let err = Game::new(Players::default(), Some(fen)).unwrap_err();
        assert_eq!(err.to_string(), "invalid notation: invalid en-passant target square");
    }

    let game = Game::new(Players::default(), Some("4k3/8/8/4P3/8/8/3P4/4K3 w - - 0 1"))
        .expect("playable position");
    assert!(!game.legal_moves_at(sq("d2")).contains(&"d2e3".parse().unwrap()));
    assert!(!game.legal_moves_at(sq("e5")).contains(&"e5d6".parse().unwrap()));
}

#[test]
fn castling_rights_revocation() {
    let game = play("a2a4 h7h6 a1a3 h6h5 a3a1");
    let rights = game.position().castling_rights();
    assert!(!rights.get(Color::White, Side::QueenSide));
    assert!(rights.get(Color::White, Side::KingSide));
    assert!(rights.get(Color::Black, Side::KingSide));
    assert!(rights.get(Color::Black, Side::QueenSide));
    assert_eq!(game.fen(), "rnbqkbnr/ppppppp1/8/7p/P7/8/1PPPPPPP/RNBQKBNR b Kkq - 1 3");
}

#[test]
fn king_walk_revokes_both_rights_for_good() {
    let game = play("e2e4 e7e5 e1e2 e8e7 e2e1 e7e8");
    assert!(game.position().castling_rights().is_empty());
    assert_eq!(game.fen(), "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w - - 4 4");
}

#[test]
fn insufficient_material() {
    let mut game = Game::new(Players::default(), Some("4k3/8/8/8/8/8/4r3/4KN2 w - - 0 1"))
        .expect("playable position");
    assert!(!game.is_draw());
    game.push_move("e1e2".parse().unwrap()).unwrap();
    assert!(game.is_insufficient_material());
    assert!(game.is_draw());
    assert!(!game.is_checkmate());
    assert_eq!(game.draw_reason(), Some(DrawReason::Material));
}

#[test]
fn insufficient_material_start_is_refused() {
    let err = Game::new(Players::default(), Some("4k3/8/8/8/8/8/8/4KN2 w - - 0 1")).unwrap_err();
    assert_eq!(err.to_string(), "illegal starting position: position has insufficient material");
}

#[test]
fn threefold_repetition() {
    let mut game = play("g1f3 g8f6 f3g1 f6g8");
    assert_eq!(game.repetition_count(), 2);
    assert!(!game.is_draw());

    game.push_moves_from_str("g1f3 g8f6 f3g1").unwrap();
    assert!(!game.is_draw());
    game.push_moves_from_str("f6g8").unwrap();
    assert_eq!(game.repetition_count(), 3);
    assert!(game.is_threefold_repetition());
    assert!(game.is_draw());
    assert_eq!(game.result(), Some(GameResult::Draw(Some(DrawReason::Repetition))));

    game.pop_move().unwrap();
    game.push_move("f6g8".parse().unwrap()).unwrap();
    assert!(game.is_draw());
    game.pop_move().unwrap();
    game.pop_move().unwrap();
    game.push_move("f3g1".parse().unwrap()).unwrap();
    game.push_move("f6g8".parse().unwrap()).unwrap();
    assert_eq!(game.repetition_count(), 3);
}

#[test]
fn fifty_move_rule() {
    let mut game = Game::new(Players::default(), Some("4k3/8/8/8/8/8/8/R3K3 w - - 98 80"))
        .expect("playable position");
    game.push_moves_from_str("a1a2 e8d8").unwrap();
    assert!(game.is_fifty_moves());
    assert_eq!(game.draw_reason(), Some(DrawReason::FiftyMoves));
}

/// Every legal move leaves the mover out of check and is undone exactly.
#[test]
fn push_pop_symmetry() {
    let mut game = play("e2e4 d7d5 e4d5 g8f6 f1b5 c7c6");
    let fen = game.fen();
    let count = game.repetition_count();

    for mv in game.legal_moves() {
        let mover = game.turn();
        game.push_move(mv).unwrap();
        assert!(!game.position().in_check(mover), "{} leaves the king in check", mv);
        assert_eq!(game.pop_move(), Ok(mv));
        assert_eq!(game.fen(), fen);
        assert_eq!(game.repetition_count(), count);
    }
}

/// Writing then reading every position along a game preserves it.
#[test]
fn fen_round_trip() {
    let game = play("e2e4 c7c5 g1f3 d7d6 d2d4 c5d4 f3d4 g8f6 b1c3 a7a6 c1e3 e7e5 d4b3 c8e6");
    for fen in game.history() {
        let pos: Position = fen.parse().unwrap();
        assert_eq!(&pos.to_fen_str(), fen);
    }
    assert_eq!(game.history().len(), game.moves().len() + 1);
}

#[test]
fn checkmate_and_stalemate_are_exclusive() {
    let mut game = Game::new(Players::default(), Some("7k/5Q2/8/6K1/8/8/8/8 w - - 0 1"))
        .expect("playable position");
    game.push_move("g5g6".parse().unwrap()).unwrap();
    assert!(game.is_stalemate());
    assert!(game.is_draw());
    assert!(!game.is_checkmate());
    assert_eq!(game.result(), Some(GameResult::Draw(Some(DrawReason::Stalemate))));
}

#[test]
fn illegal_push_and_empty_pop_are_reported() {
    let mut game = new_game();
    let err = game.push_move("e2e5".parse().unwrap()).unwrap_err();
    assert_eq!(err.to_string(), "precondition violated: illegal move e2e5");
    let err = game.pop_move().unwrap_err();
    assert_eq!(err.to_string(), "precondition violated: no move to undo");
}
