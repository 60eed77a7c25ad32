use crate::board::{Board, Card, FREECELL_START, TOTAL_TABLEAUS, pile_name};

use anyhow::{Context, Result, ensure};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Foundation,
    NewStack,
    Stack,
    Freecell,
}

impl MoveKind {
    pub fn name(&self) -> &'static str {
        match self {
            MoveKind::Foundation => "foundation",
            MoveKind::NewStack => "newstack",
            MoveKind::Stack => "stack",
            MoveKind::Freecell => "freecell",
        }
    }
}

/// One step of a solution, named by the cards it touches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Foundation(Card),
    NewStack(Card),
    Stack(Card, Card), // (moved card, card it landed on)
    Freecell(Card),
}

impl Action {
    pub fn kind(&self) -> MoveKind {
        match self {
            Action::Foundation(_) => MoveKind::Foundation,
            Action::NewStack(_) => MoveKind::NewStack,
            Action::Stack(..) => MoveKind::Stack,
            Action::Freecell(_) => MoveKind::Freecell,
        }
    }

    pub fn card(&self) -> Card {
        match *self {
            Action::Foundation(card)
            | Action::NewStack(card)
            | Action::Stack(card, _)
            | Action::Freecell(card) => card,
        }
    }

    pub fn landed_on(&self) -> Option<Card> {
        match *self {
            Action::Stack(_, onto) => Some(onto),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind().name(), self.card())?;
        if let Some(onto) = self.landed_on() {
            write!(f, " {onto}")?;
        }
        Ok(())
    }
}

/// Renders a solution: a `K = <count>` header and one move per line.
pub fn format_actions(actions: &[Action]) -> String {
    let mut output = format!("K = {}\n", actions.len());
    for action in actions {
        output.push_str(&action.to_string());
        output.push('\n');
    }
    output
}

/// Finds the source and destination piles of `action`, checking that the
/// move is legal on `board`.
pub fn resolve_action(board: &Board, action: &Action) -> Result<(usize, usize)> {
    let card = action.card();
    let from = board
        .find_top(card)
        .with_context(|| format!("{card} is not on top of any pile"))?;

    let to = match action {
        Action::Foundation(_) => board
            .foundation_target(card)
            .with_context(|| format!("{card} cannot be played to a foundation"))?,
        Action::NewStack(_) => board
            .first_empty_tableau()
            .filter(|&idx| idx != from)
            .context("No empty tableau column")?,
        Action::Stack(_, onto) => {
            ensure!(card.can_stack_on(*onto), "{card} cannot be stacked on {onto}");
            (0..TOTAL_TABLEAUS)
                .find(|&idx| idx != from && board.top(idx) == Some(*onto))
                .with_context(|| format!("{onto} is not on top of a tableau column"))?
        }
        Action::Freecell(_) => {
            ensure!(from < FREECELL_START, "{card} is already in a freecell");
            board.first_empty_freecell().context("No empty freecell")?
        }
    };
    Ok((from, to))
}

pub fn apply_action(board: &mut Board, action: &Action) -> Result<()> {
    let (from, to) = resolve_action(board, action)?;
    board.move_card(from, to);
    Ok(())
}

pub fn describe_action(board: &Board, action: &Action) -> Result<String> {
    let (from, to) = resolve_action(board, action)?;
    let to_card = board
        .top(to)
        .map(|card| format!(" {card}"))
        .unwrap_or_default();
    Ok(format!(
        "({}) {} -> ({}){to_card}",
        pile_name(from),
        action.card(),
        pile_name(to)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::FOUNDATION_START;

    fn card(s: &str) -> Card {
        Card::parse(s).unwrap()
    }

    #[test]
    fn test_format_actions() {
        let actions = [
            Action::Freecell(card("H1")),
            Action::Stack(card("S0"), card("D1")),
            Action::NewStack(card("C4")),
            Action::Foundation(card("H0")),
        ];
        assert_eq!(
            format_actions(&actions),
            "K = 4
freecell H1
stack S0 D1
newstack C4
foundation H0
"
        );
        assert_eq!(format_actions(&[]), "K = 0\n");
    }

    #[test]
    fn test_apply_action() {
        let mut board = Board::parse("2\nH1 H0\nD1 S0\nC1 S1\nD0 C0").unwrap();

        apply_action(&mut board, &Action::Foundation(card("H0"))).unwrap();
        assert_eq!(board.top(FOUNDATION_START), Some(card("H0")));

        apply_action(&mut board, &Action::Stack(card("S0"), card("H1"))).unwrap();
        assert_eq!(board.top(0), Some(card("S0")));
        assert_eq!(board.top(1), Some(card("D1")));

        apply_action(&mut board, &Action::Freecell(card("D1"))).unwrap();
        assert_eq!(board.top(FREECELL_START), Some(card("D1")));
        assert!(board.pile(1).is_empty());

        apply_action(&mut board, &Action::NewStack(card("D1"))).unwrap();
        assert_eq!(board.top(1), Some(card("D1")));
        assert!(board.is_valid());
    }

    #[test]
    fn test_apply_action_rejects_illegal_moves() {
        let mut board = Board::parse("2\nH1 H0\nD1 S0\nC1 S1\nD0 C0").unwrap();
        let before = board.clone();

        assert!(apply_action(&mut board, &Action::Foundation(card("H1"))).is_err());
        assert!(apply_action(&mut board, &Action::Foundation(card("S1"))).is_err());
        assert!(apply_action(&mut board, &Action::Stack(card("S1"), card("D0"))).is_err());
        assert!(apply_action(&mut board, &Action::Stack(card("C0"), card("S1"))).is_err());
        assert_eq!(board, before);

        apply_action(&mut board, &Action::Freecell(card("H0"))).unwrap();
        assert!(apply_action(&mut board, &Action::Freecell(card("H0"))).is_err());
    }

    #[test]
    fn test_describe_action() {
        let board = Board::parse("2\nH1 H0\nD1 S0\nC1 S1\nD0 C0").unwrap();
        assert_eq!(
            describe_action(&board, &Action::Stack(card("S0"), card("H1"))).unwrap_err().to_string(),
            "H1 is not on top of a tableau column"
        );
        assert_eq!(
            describe_action(&board, &Action::Foundation(card("C0"))).unwrap(),
            "(Tableau4) C0 -> (Foundation1)"
        );
        assert_eq!(
            describe_action(&board, &Action::Freecell(card("S1"))).unwrap(),
            "(Tableau3) S1 -> (Freecell1)"
        );
    }
}
