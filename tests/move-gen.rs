//! Tests the move generator and legality filter by counting variations
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

mod move_gen {
    use chess_rules::chess::{variations, Position};

    fn count(fen: &str, depth: usize) -> usize {
        let pos: Position = fen.parse().expect("valid fen");
        variations::count(&pos, depth)
    }

    mod position_001 {
        use super::count;

        const FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 8902); }

        #[test]
        #[ignore]
        fn depth_4() { assert_eq!(count(FEN, 4), 197281); }
    }

    mod position_002 {
        use super::count;

        const FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

        #[test]
        fn depth_2() { assert_eq!(count(FEN, 2), 2039); }

        #[test]
        #[ignore]
        fn depth_3() { assert_eq!(count(FEN, 3), 97862); }
    }

    mod position_003 {
        use super::count;

        const FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 2812); }

        #[test]
        #[ignore]
        fn depth_4() { assert_eq!(count(FEN, 4), 43238); }
    }

    #[test]
    fn position_004() { assert_eq!(count("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 3), 1197); }

    #[test]
    fn position_005() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 3), 1287); }

    #[test]
    fn position_006() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", 3), 3189); }

    #[test]
    fn position_007() { assert_eq!(count("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 3), 13744); }

    #[test]
    fn position_008() { assert_eq!(count("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", 3), 13744); }

    #[test]
    fn position_009() { assert_eq!(count("4k3/8/8/8/8/8/8/4K2R b K - 0 1", 3), 459); }

    #[test]
    fn position_010() { assert_eq!(count("8/8/8/8/8/8/6k1/4K2R w K - 0 1", 3), 564); }

    #[test]
    fn position_011() { assert_eq!(count("4k2r/6K1/8/8/8/8/8/8 w k - 0 1", 3), 134); }

    #[test]
    fn position_012() { assert_eq!(count("1r2k2r/8/8/8/8/8/8/R3K2R w KQk - 0 1", 3), 14252); }

    #[test]
    fn position_013() { assert_eq!(count("8/1n4N1/2k5/8/8/5K2/1N4n1/8 w - - 0 1", 3), 2760); }

    #[test]
    fn position_014() { assert_eq!(count("B6b/8/8/8/2K5/4k3/8/b6B w - - 0 1", 3), 4607); }

    #[test]
    fn position_015() { assert_eq!(count("7k/RR6/8/8/8/8/rr6/7K w - - 0 1", 3), 5300); }

    mod deep {
        use super::count;

        #[test]
        #[ignore]
        fn position_004() { assert_eq!(count("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 6), 764643); }

        #[test]
        #[ignore]
        fn position_005() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 6), 846648); }

        #[test]
        #[ignore]
        fn position_006() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", 6), 2788982); }

        #[test]
        #[ignore]
        fn position_009() { assert_eq!(count("4k3/8/8/8/8/8/8/4K2R b K - 0 1", 6), 899442); }

        #[test]
        #[ignore]
        fn position_010() { assert_eq!(count("8/8/8/8/8/8/6k1/4K2R w K - 0 1", 6), 185867); }

        #[test]
        #[ignore]
        fn position_011() { assert_eq!(count("4k2r/6K1/8/8/8/8/8/8 w k - 0 1", 6), 179869); }
    }
}
