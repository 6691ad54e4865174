use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::types::{ACE, KING};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Cards moved from stock to waste per draw.
    pub draw_count: u8,
    /// Empty columns only accept a King.
    pub kings_only_on_empty: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self::classic()
    }
}

impl Rules {
    #[inline]
    pub const fn new(draw_count: u8, kings_only_on_empty: bool) -> Self {
        Self {
            draw_count,
            kings_only_on_empty,
        }
    }

    /// Draw one, any card may fill an empty column.
    #[inline]
    pub const fn classic() -> Self {
        Self::new(1, false)
    }

    #[inline]
    pub const fn draw_three() -> Self {
        Self::new(3, false)
    }

    #[inline]
    pub fn effective_draw_count(&self) -> usize {
        usize::from(self.draw_count.clamp(1, 5))
    }

    #[inline]
    pub fn can_place_on_tableau(&self, card: Card, top: Option<Card>) -> bool {
        match top {
            None => !self.kings_only_on_empty || card.rank == KING,
            Some(t) => t.face_up && card.rank + 1 == t.rank && card.color() != t.color(),
        }
    }
}

/// Tableau placement under the classic rules: an empty column takes any card,
/// otherwise rank one lower and opposite color.
#[inline]
pub fn can_place_on_tableau(card: Card, top: Option<Card>) -> bool {
    Rules::classic().can_place_on_tableau(card, top)
}

/// Foundation placement: an Ace starts a pile, then same suit ascending.
#[inline]
pub fn can_place_on_foundation(card: Card, top: Option<Card>) -> bool {
    match top {
        None => card.rank == ACE,
        Some(t) => card.suit == t.suit && card.rank == t.rank + 1,
    }
}
