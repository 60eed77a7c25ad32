use super::*;

/// A single-card move between two piles of a board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    pub value: u8,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(kind: MoveKind, from: usize, to: usize) -> Self {
        Move {
            value: from as u8 | ((to as u8) << 4),
            kind,
        }
    }

    #[inline]
    pub fn from(&self) -> usize {
        (self.value & 0x0f) as usize
    }

    #[inline]
    pub fn to(&self) -> usize {
        (self.value >> 4) as usize
    }

    /// Plays the move on `board` and names it by the cards involved.
    pub fn play(&self, board: &mut Board) -> Action {
        let onto = board.top(self.to()).unwrap_or_default();
        let card = board.move_card(self.from(), self.to());
        match self.kind {
            MoveKind::Foundation => Action::Foundation(card),
            MoveKind::NewStack => Action::NewStack(card),
            MoveKind::Stack => Action::Stack(card, onto),
            MoveKind::Freecell => Action::Freecell(card),
        }
    }

    /// Plays the move on a copy of `board`.
    pub fn apply(&self, board: &Board) -> (Board, Action) {
        let mut child = board.clone();
        let action = self.play(&mut child);
        (child, action)
    }
}
