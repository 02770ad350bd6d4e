//! Module for counting and printing the number of variations from a given position
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::chess::*;

/// Print the number of variations of the given `depth` for each legal move from `pos`
pub fn print(pos: &Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;
    let mut pos = pos.clone();

    for m in pos.legal_moves() {
        if let Some(undo) = pos.commit(m) {
            let count = count(&pos, depth - 1);
            total += count;
            println!("\t{:7}\t{:12}\t{}", m.to_string(), count, pos);
            pos.unmake(undo);
        }
    }

    total
}

/// Count the number of variations of the given `depth` from `pos`
pub fn count(pos: &Position, depth: usize) -> usize {
    let mut pos = pos.clone();
    count_in_place(&mut pos, depth)
}

fn count_in_place(pos: &mut Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len();
    }

    let mut total = 0;
    for m in moves {
        if let Some(undo) = pos.commit(m) {
            total += count_in_place(pos, depth - 1);
            pos.unmake(undo);
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one() {
        assert_eq!(count(&Position::new(), 0), 1);
    }

    #[test]
    fn starting_position() {
        assert_eq!(count(&Position::new(), 1), 20);
        assert_eq!(count(&Position::new(), 2), 400);
    }

    #[test]
    fn print_returns_the_total() {
        let pos: Position = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
        assert_eq!(print(&pos, 2), 66);
    }
}
