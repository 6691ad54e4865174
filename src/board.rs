use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::types::Slot;

pub const COLUMNS: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tableau {
    // Column i, bottom (row 0) to top.
    columns: [Vec<Card>; COLUMNS],
}

impl Tableau {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_columns(columns: [Vec<Card>; COLUMNS]) -> Self {
        Self { columns }
    }

    #[inline]
    pub fn columns(&self) -> &[Vec<Card>; COLUMNS] {
        &self.columns
    }

    #[inline]
    pub fn column(&self, col: usize) -> &[Card] {
        &self.columns[col]
    }

    #[inline]
    pub(crate) fn column_mut(&mut self, col: usize) -> &mut Vec<Card> {
        &mut self.columns[col]
    }

    #[inline]
    pub fn len(&self, col: usize) -> usize {
        self.columns[col].len()
    }

    #[inline]
    pub fn is_empty(&self, col: usize) -> bool {
        self.columns[col].is_empty()
    }

    #[inline]
    pub fn top(&self, col: usize) -> Option<Card> {
        self.columns[col].last().copied()
    }

    #[inline]
    pub fn get(&self, slot: Slot) -> Option<Card> {
        self.columns
            .get(usize::from(slot.col))
            .and_then(|c| c.get(usize::from(slot.row)))
            .copied()
    }

    /// Put `card`'s identity into `slot`, keeping the slot's face flag.
    /// Returns the identity previously there.
    #[inline]
    pub fn set(&mut self, slot: Slot, card: Card) -> Option<Card> {
        let cell = self
            .columns
            .get_mut(usize::from(slot.col))
            .and_then(|c| c.get_mut(usize::from(slot.row)))?;
        let prev = *cell;
        *cell = Card {
            face_up: prev.face_up,
            ..card
        };
        Some(prev)
    }

    /// Exchange the card identities at two slots; face flags stay with the slots.
    /// Returns false (and changes nothing) if either slot is out of range.
    pub fn swap(&mut self, a: Slot, b: Slot) -> bool {
        let (Some(ca), Some(cb)) = (self.get(a), self.get(b)) else {
            return false;
        };
        self.set(a, cb);
        self.set(b, ca);
        true
    }

    #[inline]
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn empty_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.is_empty()).count()
    }

    #[inline]
    pub fn hidden_count(&self) -> usize {
        self.cards().filter(|c| !c.face_up).count()
    }

    #[inline]
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.columns.iter().flat_map(|c| c.iter())
    }

    /// All occupied slots with their cards, column by column, bottom to top.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, Card)> + '_ {
        self.columns.iter().enumerate().flat_map(|(col, cards)| {
            cards
                .iter()
                .enumerate()
                .map(move |(row, card)| (Slot::new(col as u8, row as u8), *card))
        })
    }

    pub fn face_down_slots(&self) -> Vec<Slot> {
        self.slots()
            .filter(|(_, card)| !card.face_up)
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Row index of the first face-up card in `col`, or the column length if none.
    #[inline]
    pub fn first_face_up(&self, col: usize) -> usize {
        let column = &self.columns[col];
        column.iter().position(|c| c.face_up).unwrap_or(column.len())
    }

    /// Turns every column's top card face-up.
    pub fn flip_tops(&mut self) {
        for col in 0..COLUMNS {
            self.flip_top_if_needed(col);
        }
    }

    /// Turns the top card of `col` face-up. Returns true if it flipped.
    #[inline]
    pub fn flip_top_if_needed(&mut self, col: usize) -> bool {
        match self.columns[col].last_mut() {
            Some(card) if !card.face_up => {
                card.face_up = true;
                true
            }
            _ => false,
        }
    }
}
