mod common;

use klondeal::board::COLUMNS;
use klondeal::{
    apply_move, apply_move_in_place, auto_complete, can_place_on_foundation, can_place_on_tableau,
    check_win_condition, create_deck, deal_from_deck, legal_moves, progress, shuffle_deck, Card,
    GameState, Move, Rules, Suit,
};

use common::{card, layout_with_rest, solvable_fixture, up};

fn seeded_deal(seed: u64) -> GameState {
    deal_from_deck(shuffle_deck(create_deck(), Some(seed))).expect("valid deck")
}

fn columns(cols: Vec<Vec<Card>>) -> [Vec<Card>; COLUMNS] {
    let mut out: [Vec<Card>; COLUMNS] = Default::default();
    for (i, c) in cols.into_iter().enumerate() {
        out[i] = c;
    }
    out
}

#[test]
fn tableau_placement_needs_descending_alternating() {
    let nine_d = up(Suit::Diamonds, 9);
    assert!(can_place_on_tableau(card(Suit::Spades, 8), Some(nine_d)));
    assert!(!can_place_on_tableau(card(Suit::Hearts, 8), Some(nine_d)));
    assert!(!can_place_on_tableau(card(Suit::Spades, 7), Some(nine_d)));
    // Face-down tops accept nothing.
    assert!(!can_place_on_tableau(card(Suit::Spades, 8), Some(card(Suit::Diamonds, 9))));

    assert!(can_place_on_tableau(card(Suit::Hearts, 5), None));
    let kings_only = Rules::new(1, true);
    assert!(!kings_only.can_place_on_tableau(card(Suit::Hearts, 5), None));
    assert!(kings_only.can_place_on_tableau(card(Suit::Hearts, 13), None));
}

#[test]
fn foundation_placement_is_same_suit_ascending() {
    assert!(can_place_on_foundation(card(Suit::Clubs, 1), None));
    assert!(!can_place_on_foundation(card(Suit::Clubs, 2), None));
    assert!(can_place_on_foundation(card(Suit::Clubs, 2), Some(up(Suit::Clubs, 1))));
    assert!(!can_place_on_foundation(card(Suit::Spades, 2), Some(up(Suit::Clubs, 1))));
    assert!(!can_place_on_foundation(card(Suit::Clubs, 3), Some(up(Suit::Clubs, 1))));
}

#[test]
fn fresh_deal_always_offers_a_draw() {
    let rules = Rules::default();
    for seed in 0..20 {
        let deal = seeded_deal(seed);
        let moves = legal_moves(&deal, &rules);
        assert_eq!(moves.last(), Some(&Move::Draw), "seed {seed}");
        assert!(!moves.iter().any(|m| matches!(m, Move::FoundationToTableau { .. })));
        for mv in moves {
            apply_move(&deal, &rules, mv).expect("listed move must apply");
        }
    }
}

#[test]
fn illegal_move_leaves_state_untouched() {
    let rules = Rules::default();
    let deal = seeded_deal(42);
    let mut state = deal.clone();

    for mv in [
        Move::WasteToFoundation,
        Move::WasteToTableau { dst: 0 },
        Move::WasteToTableau { dst: 9 },
        Move::TableauToTableau { src: 3, start: 3, dst: 3 },
        Move::TableauToTableau { src: 6, start: 0, dst: 1 },
        Move::FoundationToTableau { suit: Suit::Hearts, dst: 0 },
    ] {
        let err = apply_move_in_place(&mut state, &rules, mv).expect_err("move must be rejected");
        assert!(err.is_illegal_move(), "{mv:?}: {err}");
        assert_eq!(state, deal, "{mv:?} changed the state");
    }
}

#[test]
fn draw_moves_stock_top_to_waste_face_up() {
    let rules = Rules::default();
    let deal = seeded_deal(7);
    let top = *deal.stock.last().expect("stock");
    let ns = apply_move(&deal, &rules, Move::Draw).expect("draw");
    assert_eq!(ns.stock.len(), 23);
    assert_eq!(ns.waste.len(), 1);
    let w = ns.waste_top().expect("waste top");
    assert!(w.face_up);
    assert!(w.same_identity(&top));
}

#[test]
fn empty_stock_draw_recycles_waste_in_original_order() {
    let rules = Rules::default();
    let deal = seeded_deal(8);
    let mut state = deal.clone();
    for _ in 0..24 {
        apply_move_in_place(&mut state, &rules, Move::Draw).expect("draw");
    }
    assert!(state.stock.is_empty());
    assert_eq!(state.waste.len(), 24);

    apply_move_in_place(&mut state, &rules, Move::Draw).expect("recycle");
    assert!(state.waste.is_empty());
    assert_eq!(state.stock, deal.stock);
}

#[test]
fn draw_three_turns_three_cards() {
    let rules = Rules::draw_three();
    let deal = seeded_deal(9);
    let third = deal.stock[deal.stock.len() - 3];
    let ns = apply_move(&deal, &rules, Move::Draw).expect("draw");
    assert_eq!(ns.waste.len(), 3);
    assert!(ns.waste_top().expect("waste top").same_identity(&third));

    let mut state = deal;
    for _ in 0..8 {
        apply_move_in_place(&mut state, &rules, Move::Draw).expect("draw");
    }
    assert!(state.stock.is_empty());
    assert_eq!(state.waste.len(), 24);
}

#[test]
fn run_move_carries_cards_and_flips_source() {
    let rules = Rules::default();
    let state = layout_with_rest(columns(vec![
        vec![card(Suit::Clubs, 5), up(Suit::Spades, 8), up(Suit::Hearts, 7)],
        vec![up(Suit::Diamonds, 9)],
    ]));

    let mv = Move::TableauToTableau { src: 0, start: 1, dst: 1 };
    assert!(legal_moves(&state, &rules).contains(&mv));
    let ns = apply_move(&state, &rules, mv).expect("run move");
    assert_eq!(
        ns.tableau.column(1),
        &[up(Suit::Diamonds, 9), up(Suit::Spades, 8), up(Suit::Hearts, 7)]
    );
    assert_eq!(ns.tableau.column(0), &[up(Suit::Clubs, 5)]);
}

#[test]
fn broken_run_cannot_move() {
    let rules = Rules::default();
    let state = layout_with_rest(columns(vec![
        vec![up(Suit::Spades, 8), up(Suit::Spades, 7)],
        vec![up(Suit::Diamonds, 9)],
    ]));
    let mv = Move::TableauToTableau { src: 0, start: 0, dst: 1 };
    assert!(apply_move(&state, &rules, mv).is_err());
    assert!(!legal_moves(&state, &rules).contains(&mv));
}

#[test]
fn empty_column_respects_kings_only() {
    let state = layout_with_rest(columns(vec![
        vec![card(Suit::Clubs, 5), up(Suit::Hearts, 6)],
        vec![card(Suit::Clubs, 4), up(Suit::Spades, 13)],
    ]));
    let to_empty_six = Move::TableauToTableau { src: 0, start: 1, dst: 3 };
    let to_empty_king = Move::TableauToTableau { src: 1, start: 1, dst: 3 };

    let classic = Rules::classic();
    assert!(apply_move(&state, &classic, to_empty_six).is_ok());

    let kings_only = Rules::new(1, true);
    assert!(apply_move(&state, &kings_only, to_empty_six).is_err());
    assert!(apply_move(&state, &kings_only, to_empty_king).is_ok());
}

#[test]
fn foundation_moves_build_up_and_come_back() {
    let rules = Rules::default();
    let state = layout_with_rest(columns(vec![
        vec![up(Suit::Hearts, 2), up(Suit::Spades, 1)],
        vec![card(Suit::Clubs, 9), up(Suit::Hearts, 1)],
        vec![up(Suit::Clubs, 3)],
    ]));

    let ns = apply_move(&state, &rules, Move::TableauToFoundation { src: 1 }).expect("ace home");
    assert_eq!(ns.foundation_count(), 1);
    assert!(ns.tableau.top(1).expect("flipped").face_up);

    let ns = apply_move(&ns, &rules, Move::TableauToFoundation { src: 0 }).expect("ace of spades");
    let ns = apply_move(&ns, &rules, Move::TableauToFoundation { src: 0 }).expect("two of hearts");
    assert_eq!(ns.foundation_top(Suit::Hearts), Some(up(Suit::Hearts, 2)));
    assert!(ns.tableau.is_empty(0));

    let back = Move::FoundationToTableau { suit: Suit::Hearts, dst: 2 };
    let ns = apply_move(&ns, &rules, back).expect("two of hearts onto three of clubs");
    assert_eq!(ns.foundation_top(Suit::Hearts), Some(up(Suit::Hearts, 1)));
    assert_eq!(ns.tableau.top(2), Some(up(Suit::Hearts, 2)));
}

#[test]
fn auto_complete_finishes_open_tableau() {
    let rules = Rules::default();
    let fixture = solvable_fixture();
    assert!(!check_win_condition(&fixture));

    let (won, moves) = auto_complete(&fixture, &rules).expect("open tableau completes");
    assert!(check_win_condition(&won));
    assert_eq!(moves.len(), 52);
    assert!(moves.iter().all(Move::is_foundation_bound));
    assert!(progress(&won) > progress(&fixture));
}

#[test]
fn auto_complete_refuses_hidden_cards() {
    let deal = seeded_deal(3);
    assert!(auto_complete(&deal, &Rules::default()).is_none());
}

#[test]
fn progress_rewards_uncovering() {
    let rules = Rules::default();
    let state = layout_with_rest(columns(vec![
        vec![card(Suit::Clubs, 5), up(Suit::Spades, 8)],
        vec![up(Suit::Diamonds, 9)],
    ]));
    let ns = apply_move(&state, &rules, Move::TableauToTableau { src: 0, start: 1, dst: 1 })
        .expect("uncovering move");
    assert!(progress(&ns) > progress(&state));
}
