use crate::cards::Card;
use crate::state::GameState;

/// SplitMix64 PRNG step for stable, fast token generation.
#[inline]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn token128_from_seed(seed: u64) -> u128 {
    // Two rounds to build 128 bits deterministically.
    let lo = splitmix64(seed ^ 0xC0FF_EE00_D15E_CAFE);
    let hi = splitmix64(seed ^ 0xDEAD_BEEF_F00D_FACE ^ lo.rotate_left(17));
    ((hi as u128) << 64) | (lo as u128)
}

// Pile codes: tableau columns use 0..=6.
const PILE_STOCK: u64 = 7;
const PILE_WASTE: u64 = 8;
const PILE_FOUNDATION: u64 = 9;

const DOM_CARD: u64 = 0xB0A2_1D5E_0000_0001;

/// Token for one card sitting at `pos` in pile `pile`.
/// Foundation cards ignore `pos`: their place is implied by rank.
#[inline]
pub fn z_token_card(card: Card, pile: u64, pos: usize) -> u128 {
    let face = u64::from(card.face_up);
    let seed = DOM_CARD
        ^ (card.id() as u64)
        ^ (pile << 8)
        ^ ((pos as u64) << 16)
        ^ (face << 32);
    token128_from_seed(seed)
}

/// Full Zobrist key of a position: every card's pile, depth and face flag.
pub fn zobrist_key(state: &GameState) -> u128 {
    let mut z: u128 = 0;

    for (col, cards) in state.tableau.columns().iter().enumerate() {
        for (row, card) in cards.iter().enumerate() {
            z ^= z_token_card(*card, col as u64, row);
        }
    }
    for (pos, card) in state.stock.iter().enumerate() {
        z ^= z_token_card(*card, PILE_STOCK, pos);
    }
    for (pos, card) in state.waste.iter().enumerate() {
        z ^= z_token_card(*card, PILE_WASTE, pos);
    }
    for card in state.foundations.iter().flat_map(|f| f.iter()) {
        z ^= z_token_card(*card, PILE_FOUNDATION, 0);
    }

    z
}

/// Identity of a candidate deal, used to avoid probing the same layout twice.
#[inline]
pub fn deal_fingerprint(deal: &GameState) -> u128 {
    zobrist_key(deal)
}
