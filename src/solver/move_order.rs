use crate::cards::Card;
use crate::rules::{can_place_on_foundation, Rules};
use crate::state::{GameState, Move};

/// Move classes in the order the oracle tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Onto a foundation.
    Foundation,
    /// Exposes a face-down tableau card.
    Uncover,
    /// Makes a foundation-eligible card reachable in the waste or tableau.
    FreeFoundationCard,
    /// Any other tableau rearrangement.
    Tableau,
    /// Stock draw or waste turn-over.
    Draw,
}

#[inline]
fn foundation_ready(state: &GameState, card: Card) -> bool {
    can_place_on_foundation(card, state.foundation_top(card.suit))
}

/// True if `card` could go straight somewhere once exposed.
#[inline]
fn immediately_playable(state: &GameState, rules: &Rules, card: Card) -> bool {
    if foundation_ready(state, card) {
        return true;
    }
    (0..crate::board::COLUMNS)
        .any(|col| rules.can_place_on_tableau(card, state.tableau.top(col)))
}

/// Card that becomes the waste top after a draw, read from the stock order.
#[inline]
fn next_waste_top(state: &GameState, rules: &Rules) -> Option<Card> {
    let len = state.stock.len();
    if len == 0 {
        return None;
    }
    let k = rules.effective_draw_count().min(len);
    state.stock.get(len - k).copied()
}

#[inline]
fn first_empty_column(state: &GameState) -> Option<usize> {
    (0..crate::board::COLUMNS).find(|&col| state.tableau.is_empty(col))
}

/// Moves the oracle never needs to try: foundation returns, whole columns
/// shuffled into an empty column, and duplicates that only differ by which
/// empty column they target.
pub fn is_pointless(state: &GameState, mv: Move) -> bool {
    let to_later_empty = |dst: u8| {
        let dst = usize::from(dst);
        state.tableau.is_empty(dst) && first_empty_column(state) != Some(dst)
    };
    match mv {
        Move::FoundationToTableau { .. } => true,
        Move::TableauToTableau { start, dst, .. } => {
            let dst_empty = state.tableau.is_empty(usize::from(dst));
            (start == 0 && dst_empty) || to_later_empty(dst)
        }
        Move::WasteToTableau { dst } => to_later_empty(dst),
        _ => false,
    }
}

/// Class and tie-break bonus (higher first) for one move.
///
/// The oracle knows every face-down card, so the bonus peeks at what a move
/// would reveal or draw.
pub fn classify(state: &GameState, rules: &Rules, mv: Move) -> (Priority, i32) {
    match mv {
        Move::WasteToFoundation => {
            let rank = state.waste_top().map_or(0, |c| i32::from(c.rank));
            (Priority::Foundation, 20 - rank)
        }
        Move::TableauToFoundation { src } => {
            let src = usize::from(src);
            let column = state.tableau.column(src);
            let rank = column.last().map_or(0, |c| i32::from(c.rank));
            let reveals = column.len() >= 2 && !column[column.len() - 2].face_up;
            (Priority::Foundation, 20 - rank + if reveals { 30 } else { 0 })
        }
        Move::TableauToTableau { src, start, dst } => {
            let src = usize::from(src);
            let start = usize::from(start);
            let column = state.tableau.column(src);
            let dst_empty = state.tableau.is_empty(usize::from(dst));
            if start == 0 {
                // Empties the column.
                return (Priority::Tableau, 20);
            }
            let below = column[start - 1];
            if !below.face_up {
                let hidden = state.tableau.first_face_up(src) as i32;
                let mut bonus = hidden * 10;
                if immediately_playable(state, rules, below.face_up()) {
                    bonus += 50;
                }
                if dst_empty {
                    bonus -= 15;
                }
                return (Priority::Uncover, bonus);
            }
            if foundation_ready(state, below) {
                return (Priority::FreeFoundationCard, 10);
            }
            (Priority::Tableau, if dst_empty { -30 } else { -10 })
        }
        Move::WasteToTableau { dst } => {
            let waste = &state.waste;
            let under = waste.len().checked_sub(2).map(|i| waste[i]);
            if under.is_some_and(|c| foundation_ready(state, c)) {
                return (Priority::FreeFoundationCard, 5);
            }
            let onto_empty = state.tableau.is_empty(usize::from(dst));
            let king = state.waste_top().is_some_and(|c| c.is_king());
            let bonus = match (onto_empty, king) {
                (true, true) => 10,
                (true, false) => -20,
                _ => 0,
            };
            (Priority::Tableau, bonus)
        }
        Move::Draw => match next_waste_top(state, rules) {
            Some(card) if foundation_ready(state, card) => (Priority::FreeFoundationCard, 0),
            Some(card) if immediately_playable(state, rules, card) => (Priority::Draw, 10),
            Some(_) => (Priority::Draw, 0),
            None => (Priority::Draw, -10),
        },
        Move::FoundationToTableau { .. } => (Priority::Draw, -100),
    }
}

/// Deterministic ordering: priority class first, then bonus descending, then
/// the enumeration order of `legal_moves`.
pub fn order_moves(state: &GameState, rules: &Rules, moves: &mut Vec<Move>) {
    let mut keyed: Vec<(Priority, i32, usize, Move)> = moves
        .iter()
        .enumerate()
        .map(|(i, &mv)| {
            let (p, bonus) = classify(state, rules, mv);
            (p, bonus, i, mv)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));
    moves.clear();
    moves.extend(keyed.into_iter().map(|(_, _, _, mv)| mv));
}
