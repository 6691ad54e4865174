use serde::{Deserialize, Serialize};

use crate::board::{Tableau, COLUMNS};
use crate::cards::{validate_deck, Card};
use crate::engine::apply::check_move;
use crate::error::DealResult;
use crate::rules::Rules;
use crate::types::Suit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    /// Stock to waste; when the stock is empty, turn the waste over into a new stock.
    Draw,
    WasteToFoundation,
    WasteToTableau { dst: u8 },
    TableauToFoundation { src: u8 },
    /// Move the run starting at row `start` of column `src` onto column `dst`.
    TableauToTableau { src: u8, start: u8, dst: u8 },
    FoundationToTableau { suit: Suit, dst: u8 },
}

impl Move {
    #[inline]
    pub fn is_foundation_bound(&self) -> bool {
        matches!(self, Move::WasteToFoundation | Move::TableauToFoundation { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub tableau: Tableau,
    /// Draw pile; the last element is the next card drawn.
    pub stock: Vec<Card>,
    /// Discard pile; the last element is the playable card.
    #[serde(default)]
    pub waste: Vec<Card>,
    /// Indexed by `Suit::index()`.
    #[serde(default)]
    pub foundations: [Vec<Card>; 4],
}

/// A freshly dealt layout: waste and foundations empty, only column tops face-up.
pub type Deal = GameState;

impl GameState {
    /// Builds a state from an explicit layout. Checks that the 52 cards are all
    /// present exactly once; the tableau shape is not constrained. Column tops
    /// are turned face-up.
    pub fn from_layout(tableau: [Vec<Card>; COLUMNS], stock: Vec<Card>) -> DealResult<Self> {
        let mut state = Self {
            tableau: Tableau::from_columns(tableau),
            stock,
            waste: Vec::new(),
            foundations: std::array::from_fn(|_| Vec::new()),
        };
        state.validate()?;
        state.tableau.flip_tops();
        Ok(state)
    }

    /// Every card accounted for once across all piles.
    pub fn validate(&self) -> DealResult<()> {
        validate_deck(self.all_cards())
    }

    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.tableau
            .cards()
            .chain(self.stock.iter())
            .chain(self.waste.iter())
            .chain(self.foundations.iter().flat_map(|f| f.iter()))
    }

    #[inline]
    pub fn foundation_top(&self, suit: Suit) -> Option<Card> {
        self.foundations[suit.index()].last().copied()
    }

    #[inline]
    pub fn foundation_count(&self) -> usize {
        self.foundations.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn waste_top(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    #[inline]
    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(|f| f.len() == 13)
    }

    /// Ordered legal moves:
    /// waste→foundation, tableau→foundation (by column), waste→tableau (by column),
    /// tableau→tableau (by source, start row, destination), foundation→tableau, draw.
    pub fn legal_moves(&self, rules: &Rules) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        let mut push = |mv: Move| {
            if check_move(self, rules, mv).is_ok() {
                moves.push(mv);
            }
        };

        push(Move::WasteToFoundation);
        for src in 0..COLUMNS as u8 {
            push(Move::TableauToFoundation { src });
        }
        for dst in 0..COLUMNS as u8 {
            push(Move::WasteToTableau { dst });
        }
        for src in 0..COLUMNS {
            let first = self.tableau.first_face_up(src);
            for start in first..self.tableau.len(src) {
                for dst in 0..COLUMNS as u8 {
                    push(Move::TableauToTableau {
                        src: src as u8,
                        start: start as u8,
                        dst,
                    });
                }
            }
        }
        for suit in Suit::ALL {
            for dst in 0..COLUMNS as u8 {
                push(Move::FoundationToTableau { suit, dst });
            }
        }
        push(Move::Draw);
        moves
    }
}

#[inline]
pub fn legal_moves(state: &GameState, rules: &Rules) -> Vec<Move> {
    state.legal_moves(rules)
}

#[inline]
pub fn check_win_condition(state: &GameState) -> bool {
    state.is_won()
}
