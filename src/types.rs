use serde::{Deserialize, Serialize};

pub const ACE: u8 = 1;
pub const KING: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[inline]
    pub fn color(self) -> Color {
        match self {
            Suit::Diamonds | Suit::Hearts => Color::Red,
            Suit::Clubs | Suit::Spades => Color::Black,
        }
    }

    /// Foundation pile index for this suit (also its position in `Suit::ALL`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    #[inline]
    pub fn from_index(idx: usize) -> Option<Suit> {
        Suit::ALL.get(idx).copied()
    }

    #[inline]
    pub fn short(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

#[inline]
pub fn rank_label(rank: u8) -> &'static str {
    match rank {
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        13 => "K",
        _ => "?",
    }
}

/// Tableau coordinate. Row 0 is the deepest card of the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub col: u8,
    pub row: u8,
}

impl Slot {
    #[inline]
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }
}

/// Slot of the `idx`-th card dealt into the standard 1..=7 tableau shape
/// (column by column, bottom to top). `None` past the 28 tableau cards.
#[inline]
pub fn deal_idx_to_slot(idx: usize) -> Option<Slot> {
    let mut remaining = idx;
    for col in 0u8..7 {
        let height = usize::from(col) + 1;
        if remaining < height {
            return Some(Slot::new(col, remaining as u8));
        }
        remaining -= height;
    }
    None
}
