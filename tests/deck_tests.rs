mod common;

use klondeal::cards::DECK_SIZE;
use klondeal::rng::rng_for_seed;
use klondeal::shuffle::random_deal;
use klondeal::types::deal_idx_to_slot;
use klondeal::{
    create_deck, deal_from_deck, shuffle_deck, shuffle_deck_with, validate_deck, Card, DealError,
    Slot, Suit,
};

use common::assert_deal_shape;

#[test]
fn create_deck_has_every_card_once() {
    let deck = create_deck();
    assert_eq!(deck.len(), DECK_SIZE);
    validate_deck(&deck).expect("fresh deck is valid");
    assert!(deck.iter().all(|c| !c.face_up));

    let mut ids: Vec<usize> = deck.iter().map(Card::id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..DECK_SIZE).collect::<Vec<_>>());
}

#[test]
fn card_id_round_trips_identity() {
    for c in create_deck() {
        let back = Card::from_id(c.id()).expect("id in range");
        assert!(back.same_identity(&c));
    }
    assert!(Card::from_id(DECK_SIZE).is_none());
}

#[test]
fn validate_deck_rejects_bad_decks() {
    let mut short = create_deck();
    short.pop();
    assert!(matches!(validate_deck(&short), Err(DealError::InvalidDeck { .. })));

    let mut dup = create_deck();
    dup[1] = dup[0];
    assert!(matches!(validate_deck(&dup), Err(DealError::InvalidDeck { .. })));

    let mut bad_rank = create_deck();
    bad_rank[0] = Card::new(Suit::Clubs, 14);
    assert!(matches!(validate_deck(&bad_rank), Err(DealError::InvalidDeck { .. })));
}

#[test]
fn deal_from_deck_rejects_invalid_deck() {
    let mut deck = create_deck();
    deck.truncate(51);
    let err = deal_from_deck(deck).expect_err("51 cards must be rejected");
    assert!(err.to_string().contains("Invalid deck"), "got: {err}");
}

#[test]
fn deal_from_unshuffled_deck_follows_deck_order() {
    let deck = create_deck();
    let deal = deal_from_deck(deck.clone()).expect("valid deck");
    assert_deal_shape(&deal);

    for (idx, expected) in deck.iter().take(28).enumerate() {
        let slot = deal_idx_to_slot(idx).expect("tableau index");
        let got = deal.tableau.get(slot).expect("slot filled");
        assert!(got.same_identity(expected), "slot {slot:?}");
    }
    // Stock keeps deck order; its last card is drawn first.
    for (c, expected) in deal.stock.iter().zip(deck.iter().skip(28)) {
        assert!(c.same_identity(expected));
    }
}

#[test]
fn deal_idx_to_slot_covers_the_tableau_shape() {
    assert_eq!(deal_idx_to_slot(0), Some(Slot::new(0, 0)));
    assert_eq!(deal_idx_to_slot(1), Some(Slot::new(1, 0)));
    assert_eq!(deal_idx_to_slot(2), Some(Slot::new(1, 1)));
    assert_eq!(deal_idx_to_slot(27), Some(Slot::new(6, 6)));
    assert_eq!(deal_idx_to_slot(28), None);
}

#[test]
fn random_deals_partition_the_deck() {
    let mut rng = rng_for_seed(99);
    for _ in 0..50 {
        let deal = random_deal(&mut rng).expect("shuffled deck is valid");
        assert_deal_shape(&deal);
        assert_eq!(deal.tableau.card_count() + deal.stock.len(), DECK_SIZE);
    }
}

#[test]
fn shuffle_is_deterministic_per_seed() {
    let a = shuffle_deck(create_deck(), Some(42));
    let b = shuffle_deck(create_deck(), Some(42));
    let c = shuffle_deck(create_deck(), Some(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
    validate_deck(&a).expect("shuffle keeps every card");
    assert_ne!(a, create_deck(), "seed 42 should move something");

    let mut rng = rng_for_seed(42);
    assert_eq!(shuffle_deck_with(create_deck(), &mut rng), a);
}

#[test]
fn shuffle_without_seed_keeps_every_card() {
    let deck = shuffle_deck(create_deck(), None);
    validate_deck(&deck).expect("entropy shuffle keeps every card");
}

#[test]
fn shuffle_positions_are_uniform() {
    // Chi-square over (card, position) counts. Expected statistic is about
    // 2652 with a standard deviation near 73.
    const TRIALS: usize = 10_000;
    let mut counts = vec![[0u32; DECK_SIZE]; DECK_SIZE];
    let mut rng = rng_for_seed(2024);
    for _ in 0..TRIALS {
        let deck = shuffle_deck_with(create_deck(), &mut rng);
        for (pos, c) in deck.iter().enumerate() {
            counts[c.id()][pos] += 1;
        }
    }
    let expected = TRIALS as f64 / DECK_SIZE as f64;
    let chi2: f64 = counts
        .iter()
        .flat_map(|row| row.iter())
        .map(|&o| {
            let d = f64::from(o) - expected;
            d * d / expected
        })
        .sum();
    assert!(chi2 < 3000.0, "chi-square {chi2:.1} too large for a uniform shuffle");
    assert!(chi2 > 2300.0, "chi-square {chi2:.1} suspiciously small");
}
