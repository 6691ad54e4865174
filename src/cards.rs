use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DealError, DealResult};
use crate::types::{rank_label, Color, Suit, ACE, KING};

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
    #[serde(default)]
    pub face_up: bool,
}

impl Card {
    #[inline]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank, face_up: false }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.suit.color()
    }

    /// Dense identity index in `0..52`, independent of the face flag.
    #[inline]
    pub fn id(&self) -> usize {
        self.suit.index() * 13 + usize::from(self.rank - 1)
    }

    #[inline]
    pub fn from_id(id: usize) -> Option<Card> {
        if id >= DECK_SIZE {
            return None;
        }
        let suit = Suit::from_index(id / 13)?;
        Some(Card::new(suit, (id % 13) as u8 + 1))
    }

    /// Same (suit, rank), whatever the face flags.
    #[inline]
    pub fn same_identity(&self, other: &Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    #[inline]
    pub fn face_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    #[inline]
    pub fn face_down(mut self) -> Self {
        self.face_up = false;
        self
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.rank == KING
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_label(self.rank), self.suit.short())
    }
}

/// All 52 cards, suit-major, face-down.
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in ACE..=KING {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Checks that `cards` holds every (suit, rank) exactly once.
pub fn validate_deck<'a, I>(cards: I) -> DealResult<()>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut seen = [false; DECK_SIZE];
    let mut count = 0usize;
    for card in cards {
        if !(ACE..=KING).contains(&card.rank) {
            return Err(DealError::invalid_deck(format!(
                "card {:?} has rank {} outside 1..=13",
                card.suit, card.rank
            )));
        }
        let id = card.id();
        if seen[id] {
            return Err(DealError::invalid_deck(format!("duplicate card {card}")));
        }
        seen[id] = true;
        count += 1;
    }
    if count != DECK_SIZE {
        return Err(DealError::invalid_deck(format!(
            "expected {DECK_SIZE} cards, got {count}"
        )));
    }
    Ok(())
}
