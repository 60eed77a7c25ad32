use super::*;

pub type PossibleMoves = SmallVec<[Move; 32]>;

/// Enumerates the successor moves of `board`.
///
/// Every tableau column and freecell with a top card yields at most one
/// foundation move, one stack or newstack move and, for tableau columns only,
/// one freecell move. A rank-zero card that can start a foundation yields
/// nothing else. Destinations are always the first match in pile order.
pub fn compute_possible_moves(board: &Board, possible_moves: &mut PossibleMoves) {
    for src_idx in 0..FOUNDATION_START {
        let Some(card) = board.top(src_idx) else {
            continue;
        };

        if let Some(foundation_idx) = board.foundation_target(card) {
            possible_moves.push(Move::new(MoveKind::Foundation, src_idx, foundation_idx));
            if card.rank() == 0 {
                continue;
            }
        }

        if let Some(mov) = compute_tableau_move(board, src_idx, card) {
            possible_moves.push(mov);
        }

        if src_idx < TOTAL_TABLEAUS
            && let Some(freecell_idx) = board.first_empty_freecell()
        {
            possible_moves.push(Move::new(MoveKind::Freecell, src_idx, freecell_idx));
        }
    }
}

/// Scans the tableau columns and stops at the first empty column or the first
/// column `card` may be stacked on.
fn compute_tableau_move(board: &Board, src_idx: usize, card: Card) -> Option<Move> {
    for dest_idx in 0..TOTAL_TABLEAUS {
        if dest_idx == src_idx {
            continue;
        }
        match board.top(dest_idx) {
            None => return Some(Move::new(MoveKind::NewStack, src_idx, dest_idx)),
            Some(dest_top_card) if card.can_stack_on(dest_top_card) => {
                return Some(Move::new(MoveKind::Stack, src_idx, dest_idx));
            }
            Some(_) => {}
        }
    }
    None
}

/// The first card, in pile order, that can be played to a foundation.
pub fn next_foundation_move(board: &Board) -> Option<Move> {
    (0..FOUNDATION_START).find_map(|src_idx| {
        let card = board.top(src_idx)?;
        board
            .foundation_target(card)
            .map(|foundation_idx| Move::new(MoveKind::Foundation, src_idx, foundation_idx))
    })
}
