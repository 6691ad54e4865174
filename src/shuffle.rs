//! Deck shuffling and dealing into the initial Klondike layout.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Tableau, COLUMNS};
use crate::cards::{validate_deck, Card};
use crate::error::DealResult;
use crate::rng::{entropy_seed, rng_for_seed};
use crate::state::Deal;
use crate::types::deal_idx_to_slot;

/// Cards dealt into the tableau (1 + 2 + ... + 7).
pub const TABLEAU_CARDS: usize = 28;

/// Fisher-Yates shuffle. A seed makes the permutation reproducible; `None`
/// draws one from OS entropy.
pub fn shuffle_deck(deck: Vec<Card>, seed: Option<u64>) -> Vec<Card> {
    let mut rng = rng_for_seed(seed.unwrap_or_else(entropy_seed));
    shuffle_deck_with(deck, &mut rng)
}

#[inline]
pub fn shuffle_deck_with<R: Rng + ?Sized>(mut deck: Vec<Card>, rng: &mut R) -> Vec<Card> {
    deck.shuffle(rng);
    deck
}

/// Deal a 52-card deck in order: column i gets i+1 cards with only the last
/// face-up, the remaining 24 become the face-down stock (last card drawn first).
pub fn deal_from_deck(deck: Vec<Card>) -> DealResult<Deal> {
    validate_deck(&deck)?;
    Ok(lay_out(deck))
}

/// Dealing without the deck check; callers guarantee a valid deck.
pub(crate) fn lay_out(deck: Vec<Card>) -> Deal {
    let mut columns: [Vec<Card>; COLUMNS] = std::array::from_fn(|c| Vec::with_capacity(c + 1));
    let mut cards = deck.into_iter();
    for (idx, card) in cards.by_ref().take(TABLEAU_CARDS).enumerate() {
        let Some(slot) = deal_idx_to_slot(idx) else {
            break;
        };
        let col = usize::from(slot.col);
        let face_up = usize::from(slot.row) == col;
        columns[col].push(Card { face_up, ..card });
    }
    let stock: Vec<Card> = cards.map(Card::face_down).collect();

    Deal {
        tableau: Tableau::from_columns(columns),
        stock,
        waste: Vec::new(),
        foundations: std::array::from_fn(|_| Vec::new()),
    }
}

/// Shuffle a fresh deck with `rng` and deal it.
pub fn random_deal<R: Rng + ?Sized>(rng: &mut R) -> DealResult<Deal> {
    deal_from_deck(shuffle_deck_with(crate::cards::create_deck(), rng))
}
