#![allow(dead_code)]

use klondeal::board::COLUMNS;
use klondeal::{create_deck, Card, GameState, Suit};

#[inline]
pub fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

#[inline]
pub fn up(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank).face_up()
}

/// State with the given columns; every card not placed goes to the stock face-down.
pub fn layout_with_rest(columns: [Vec<Card>; COLUMNS]) -> GameState {
    let stock: Vec<Card> = create_deck()
        .into_iter()
        .filter(|c| !columns.iter().flatten().any(|p| p.same_identity(c)))
        .collect();
    GameState::from_layout(columns, stock).expect("layout holds 52 cards")
}

/// Four single-suit columns stacked King to Ace, all face-up, Aces on top.
/// Won by sending every card home.
pub fn solvable_fixture() -> GameState {
    let mut columns: [Vec<Card>; COLUMNS] = Default::default();
    for (col, suit) in Suit::ALL.into_iter().enumerate() {
        columns[col] = (1..=13).rev().map(|rank| up(suit, rank)).collect();
    }
    GameState::from_layout(columns, Vec::new()).expect("fixture holds 52 cards")
}

/// Deal-shaped position with no legal move except cycling the stock.
///
/// Tops are the four Kings and three red/black Twos; every Ace and Queen is
/// face-down in the tableau, so nothing can ever be played.
pub fn unsolvable_fixture() -> GameState {
    let tops = [
        card(Suit::Spades, 13),
        card(Suit::Hearts, 13),
        card(Suit::Diamonds, 13),
        card(Suit::Clubs, 13),
        card(Suit::Spades, 2),
        card(Suit::Hearts, 2),
        card(Suit::Diamonds, 2),
    ];
    let mut hidden: Vec<Card> = Vec::new();
    let mut rest: Vec<Card> = Vec::new();
    for c in create_deck() {
        if tops.iter().any(|t| t.same_identity(&c)) {
            continue;
        }
        if c.rank == 1 || c.rank == 12 {
            hidden.push(c);
        } else {
            rest.push(c);
        }
    }
    // 21 face-down tableau slots: the 8 Aces and Queens plus 13 filler cards.
    let filler = 21 - hidden.len();
    hidden.extend(rest.drain(..filler));

    let mut hidden = hidden.into_iter();
    let mut columns: [Vec<Card>; COLUMNS] = Default::default();
    for (col, top) in tops.into_iter().enumerate() {
        columns[col].extend(hidden.by_ref().take(col));
        columns[col].push(top.face_up());
    }
    GameState::from_layout(columns, rest).expect("fixture holds 52 cards")
}

/// Standard deal shape: column i has i+1 cards, only the top face-up,
/// 24 face-down stock cards, empty waste and foundations.
pub fn assert_deal_shape(deal: &GameState) {
    for col in 0..COLUMNS {
        let column = deal.tableau.column(col);
        assert_eq!(column.len(), col + 1, "column {col} height");
        for (row, c) in column.iter().enumerate() {
            assert_eq!(c.face_up, row == col, "face flag at column {col} row {row}");
        }
    }
    assert_eq!(deal.stock.len(), 24);
    assert!(deal.stock.iter().all(|c| !c.face_up), "stock must be face-down");
    assert!(deal.waste.is_empty());
    assert!(deal.foundations.iter().all(Vec::is_empty));
    deal.validate().expect("deal holds every card once");
}
