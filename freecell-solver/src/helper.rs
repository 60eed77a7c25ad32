use super::*;

use ahash::AHasher;
use std::hash::Hasher;

/// Desirability of a board; larger is better.
///
/// Banked cards count ten each, while every empty tableau column costs five
/// and every empty freecell costs one.
pub fn heuristic(board: &Board) -> i32 {
    10 * board.cards_on_foundations() as i32
        - 5 * board.empty_tableaus() as i32
        - board.empty_freecells() as i32
}

/// Hash of the tableau columns and freecells, foundations excluded.
pub fn layout_hash(board: &Board) -> u64 {
    let mut hasher = AHasher::default();
    for pile in board.layout_piles() {
        hasher.write_u8(pile.len() as u8);
        for card in pile.cards() {
            hasher.write_u8(card.id());
        }
    }
    hasher.finish()
}
