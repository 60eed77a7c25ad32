use anyhow::{Context, Result, ensure};
use smallvec::SmallVec;

use std::fmt;

pub const TOTAL_TABLEAUS: usize = 8;
pub const TOTAL_FREECELLS: usize = 4;
pub const TOTAL_FOUNDATIONS: usize = 4;
pub const FREECELL_START: usize = TOTAL_TABLEAUS;
pub const FOUNDATION_START: usize = FREECELL_START + TOTAL_FREECELLS;
pub const TOTAL_PILES: usize = FOUNDATION_START + TOTAL_FOUNDATIONS;
pub const MAX_SUIT: u8 = 4;
pub const MAX_RANKS: u8 = 13;
pub const PILE_CAPACITY: usize = (MAX_SUIT * MAX_RANKS) as usize;

const SUITS: [char; 4] = ['H', 'S', 'D', 'C'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Hearts,
    Spades,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Spades, Suit::Diamonds, Suit::Clubs];

    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    pub fn letter(&self) -> char {
        SUITS[*self as usize]
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        SUITS
            .iter()
            .position(|&s| s == letter)
            .map(|idx| Self::ALL[idx])
    }
}

/// A card packed into one byte as `(rank << 2) | suit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub const EMPTY: Self = Self(u8::MAX);

    pub fn new(suit: Suit, rank: u8) -> Self {
        debug_assert!(rank < MAX_RANKS, "rank {rank} out of range");
        Self((rank << 2) | suit as u8)
    }

    pub fn parse(token: &str) -> Result<Self> {
        let mut chars = token.chars();
        let letter = chars.next().context("Empty card")?;
        let suit =
            Suit::from_letter(letter).with_context(|| format!("Invalid suit at card {token}"))?;
        let rank = chars
            .as_str()
            .parse::<u8>()
            .with_context(|| format!("Invalid rank at card {token}"))?;
        ensure!(rank < MAX_RANKS, "Rank out of range at card {token}");
        Ok(Card::new(suit, rank))
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == Self::EMPTY.0
    }

    pub fn suit(&self) -> Suit {
        Suit::ALL[(self.0 & 0b11) as usize]
    }

    pub fn rank(&self) -> u8 {
        self.0 >> 2
    }

    pub fn is_red(&self) -> bool {
        self.suit().is_red()
    }

    /// Whether this card may rest on `other` in a tableau column.
    pub fn can_stack_on(&self, other: Card) -> bool {
        self.is_red() != other.is_red() && self.rank() + 1 == other.rank()
    }
}

impl Default for Card {
    fn default() -> Self {
        Card::EMPTY
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("--");
        }
        write!(f, "{}{}", self.suit().letter(), self.rank())
    }
}

/// Fixed-capacity pile addressed through its top index (-1 when empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pile {
    top: i8,
    cards: [Card; PILE_CAPACITY],
}

impl Pile {
    #[inline]
    pub fn len(&self) -> usize {
        (self.top + 1) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top < 0
    }

    #[inline]
    pub fn peek_top(&self) -> Option<Card> {
        if self.is_empty() {
            None
        } else {
            Some(self.cards[self.top as usize])
        }
    }

    #[inline]
    pub fn push_card(&mut self, card: Card) {
        self.top += 1;
        self.cards[self.top as usize] = card;
    }

    #[inline]
    pub fn pop_card(&mut self) -> Card {
        if self.is_empty() {
            return Card::EMPTY;
        }
        let card = self.cards[self.top as usize];
        self.cards[self.top as usize] = Card::EMPTY;
        self.top -= 1;
        card
    }

    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards[..self.len()]
    }
}

impl Default for Pile {
    fn default() -> Self {
        Pile {
            top: -1,
            cards: [Card::EMPTY; PILE_CAPACITY],
        }
    }
}

/// Tableau columns, freecells and foundations of one game state.
///
/// Piles `0..8` are tableau columns, `8..12` freecells and `12..16`
/// foundations. `ranks` is the number of cards per suit; ranks run from
/// zero to `ranks - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    piles: [Pile; TOTAL_PILES],
    ranks: u8,
}

impl Board {
    pub fn new(ranks: u8) -> Self {
        Self {
            piles: std::array::from_fn(|_| Default::default()),
            ranks,
        }
    }

    pub fn ranks(&self) -> u8 {
        self.ranks
    }

    pub fn max_rank(&self) -> u8 {
        self.ranks.saturating_sub(1)
    }

    pub fn total_cards(&self) -> usize {
        MAX_SUIT as usize * self.ranks as usize
    }

    pub fn pile(&self, idx: usize) -> &Pile {
        &self.piles[idx]
    }

    pub fn top(&self, idx: usize) -> Option<Card> {
        self.piles[idx].peek_top()
    }

    pub fn push(&mut self, idx: usize, card: Card) {
        self.piles[idx].push_card(card);
    }

    pub fn pop(&mut self, idx: usize) -> Card {
        self.piles[idx].pop_card()
    }

    /// Places `cards`, bottom to top, onto a tableau column.
    pub fn deal_column(&mut self, column: usize, cards: &[Card]) {
        for &card in cards {
            self.piles[column].push_card(card);
        }
    }

    pub fn move_card(&mut self, from: usize, to: usize) -> Card {
        let card = self.pop(from);
        self.push(to, card);
        card
    }

    /// The foundation `card` may be played to, if any.
    ///
    /// A foundation that already holds the card's suit is the only candidate;
    /// otherwise a rank-zero card goes to the first empty foundation.
    pub fn foundation_target(&self, card: Card) -> Option<usize> {
        let mut first_empty = None;
        for idx in FOUNDATION_START..TOTAL_PILES {
            match self.top(idx) {
                Some(top) if top.suit() == card.suit() => {
                    return (top.rank() + 1 == card.rank()).then_some(idx);
                }
                Some(_) => {}
                None => {
                    if first_empty.is_none() {
                        first_empty = Some(idx);
                    }
                }
            }
        }
        if card.rank() == 0 { first_empty } else { None }
    }

    pub fn first_empty_tableau(&self) -> Option<usize> {
        (0..TOTAL_TABLEAUS).find(|&idx| self.piles[idx].is_empty())
    }

    pub fn first_empty_freecell(&self) -> Option<usize> {
        (FREECELL_START..FOUNDATION_START).find(|&idx| self.piles[idx].is_empty())
    }

    /// The tableau column or freecell whose top card is `card`.
    pub fn find_top(&self, card: Card) -> Option<usize> {
        (0..FOUNDATION_START).find(|&idx| self.top(idx) == Some(card))
    }

    pub fn cards_on_foundations(&self) -> usize {
        self.piles[FOUNDATION_START..].iter().map(Pile::len).sum()
    }

    pub fn empty_tableaus(&self) -> usize {
        self.piles[..TOTAL_TABLEAUS]
            .iter()
            .filter(|pile| pile.is_empty())
            .count()
    }

    pub fn empty_freecells(&self) -> usize {
        self.piles[FREECELL_START..FOUNDATION_START]
            .iter()
            .filter(|pile| pile.is_empty())
            .count()
    }

    pub fn completed_foundations(&self) -> usize {
        self.piles[FOUNDATION_START..]
            .iter()
            .filter(|pile| pile.peek_top().is_some_and(|c| c.rank() == self.max_rank()))
            .count()
    }

    pub fn is_solved(&self) -> bool {
        self.completed_foundations() == TOTAL_FOUNDATIONS
    }

    /// Tableau columns and freecells; foundations are left out.
    pub fn layout_piles(&self) -> &[Pile] {
        &self.piles[..FOUNDATION_START]
    }

    pub fn same_layout(&self, other: &Board) -> bool {
        self.layout_piles() == other.layout_piles()
    }

    /// Checks that the board holds the full deck exactly once and that
    /// freecells and foundations are well formed.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_RANKS).contains(&self.ranks),
            "Rank count must be between 1 and {MAX_RANKS}, got {}",
            self.ranks
        );

        let mut seen = [false; PILE_CAPACITY];
        let mut count = 0;
        for (idx, pile) in self.piles.iter().enumerate() {
            if (FREECELL_START..FOUNDATION_START).contains(&idx) {
                ensure!(pile.len() <= 1, "{} holds more than one card", pile_name(idx));
            }
            for (pos, &card) in pile.cards().iter().enumerate() {
                ensure!(!card.is_empty(), "Gap inside {}", pile_name(idx));
                ensure!(
                    card.rank() < self.ranks,
                    "Card {card} exceeds the maximum rank {}",
                    self.max_rank()
                );
                ensure!(!seen[card.id() as usize], "Duplicate card {card}");
                seen[card.id() as usize] = true;
                count += 1;
                if idx >= FOUNDATION_START {
                    let base = pile.cards()[0];
                    ensure!(
                        card.suit() == base.suit() && card.rank() as usize == pos,
                        "{} is out of order at {card}",
                        pile_name(idx)
                    );
                }
            }
        }

        ensure!(
            count == self.total_cards(),
            "Deal holds {count} cards, expected {}",
            self.total_cards()
        );
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Reads a deal: a rank count on the first line, then one tableau column
    /// per line listed bottom to top.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines();
        let header = lines
            .by_ref()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .context("Missing rank count")?;
        let ranks = header
            .parse::<u8>()
            .with_context(|| format!("Invalid rank count '{header}'"))?;
        ensure!(
            (1..=MAX_RANKS).contains(&ranks),
            "Rank count must be between 1 and {MAX_RANKS}, got {ranks}"
        );

        let columns: Vec<&str> = lines.skip_while(|line| line.trim().is_empty()).collect();
        let used = columns
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |idx| idx + 1);
        ensure!(
            used <= TOTAL_TABLEAUS,
            "Deal has {used} columns, at most {TOTAL_TABLEAUS} allowed"
        );

        let mut board = Board::new(ranks);
        for (column, line) in columns[..used].iter().enumerate() {
            let cards = Self::parse_cards(line)
                .with_context(|| format!("Failed to parse at '{}'", line.trim()))?;
            board.deal_column(column, &cards);
        }
        Ok(board)
    }

    fn parse_cards(s: &str) -> Result<SmallVec<[Card; 16]>> {
        let mut cards = SmallVec::new();
        for token in s.split_whitespace() {
            ensure!(cards.len() < PILE_CAPACITY, "Too many cards in one column");
            cards.push(Card::parse(token)?);
        }
        Ok(cards)
    }

    pub fn pretty_print(&self) -> String {
        let mut output = String::new();

        for (i, pile) in self.piles[..TOTAL_TABLEAUS].iter().enumerate() {
            output.push_str(&format!("Tableau{}:", i + 1));
            for card in pile.cards() {
                output.push_str(&format!(" {card}"));
            }
            output.push('\n');
        }

        output.push_str("Freecells:");
        for pile in &self.piles[FREECELL_START..FOUNDATION_START] {
            output.push_str(&format!(" {}", pile.peek_top().unwrap_or_default()));
        }
        output.push('\n');

        output.push_str("Foundations:");
        for pile in &self.piles[FOUNDATION_START..] {
            output.push_str(&format!(" {}", pile.peek_top().unwrap_or_default()));
        }

        output
    }
}

pub fn pile_name(idx: usize) -> String {
    if idx < FREECELL_START {
        format!("Tableau{}", idx + 1)
    } else if idx < FOUNDATION_START {
        format!("Freecell{}", idx - FREECELL_START + 1)
    } else {
        format!("Foundation{}", idx - FOUNDATION_START + 1)
    }
}
