use crate::board::COLUMNS;
use crate::cards::Card;
use crate::error::{DealError, DealResult};
use crate::rules::{can_place_on_foundation, Rules};
use crate::state::{GameState, Move};

/// True if `cards` is a face-up, descending, alternating-color run.
#[inline]
fn is_movable_run(cards: &[Card]) -> bool {
    if cards.iter().any(|c| !c.face_up) {
        return false;
    }
    cards
        .windows(2)
        .all(|w| w[1].rank + 1 == w[0].rank && w[1].color() != w[0].color())
}

#[inline]
fn column_index(col: u8) -> Result<usize, &'static str> {
    let col = usize::from(col);
    if col < COLUMNS {
        Ok(col)
    } else {
        Err("column index out of range")
    }
}

/// Validates `mv` against `state` without changing anything.
/// The error string says which placement or access rule failed.
pub fn check_move(state: &GameState, rules: &Rules, mv: Move) -> Result<(), &'static str> {
    match mv {
        Move::Draw => {
            if state.stock.is_empty() && state.waste.is_empty() {
                return Err("stock and waste are both empty");
            }
            Ok(())
        }
        Move::WasteToFoundation => {
            let card = state.waste_top().ok_or("waste is empty")?;
            if !can_place_on_foundation(card, state.foundation_top(card.suit)) {
                return Err("card does not continue its foundation");
            }
            Ok(())
        }
        Move::WasteToTableau { dst } => {
            let dst = column_index(dst)?;
            let card = state.waste_top().ok_or("waste is empty")?;
            if !rules.can_place_on_tableau(card, state.tableau.top(dst)) {
                return Err("card cannot be placed on that column");
            }
            Ok(())
        }
        Move::TableauToFoundation { src } => {
            let src = column_index(src)?;
            let card = state.tableau.top(src).ok_or("source column is empty")?;
            if !card.face_up {
                return Err("source card is face-down");
            }
            if !can_place_on_foundation(card, state.foundation_top(card.suit)) {
                return Err("card does not continue its foundation");
            }
            Ok(())
        }
        Move::TableauToTableau { src, start, dst } => {
            let src = column_index(src)?;
            let dst = column_index(dst)?;
            if src == dst {
                return Err("source and destination are the same column");
            }
            let column = state.tableau.column(src);
            let start = usize::from(start);
            if start >= column.len() {
                return Err("start row is past the top of the column");
            }
            let run = &column[start..];
            if !is_movable_run(run) {
                return Err("cards above the start row are not a movable run");
            }
            if !rules.can_place_on_tableau(run[0], state.tableau.top(dst)) {
                return Err("run cannot be placed on that column");
            }
            Ok(())
        }
        Move::FoundationToTableau { suit, dst } => {
            let dst = column_index(dst)?;
            let card = state.foundation_top(suit).ok_or("foundation is empty")?;
            if !rules.can_place_on_tableau(card.face_up(), state.tableau.top(dst)) {
                return Err("card cannot be placed on that column");
            }
            Ok(())
        }
    }
}

/// Apply a move to `state` in place. On error the state is left untouched.
pub fn apply_move_in_place(state: &mut GameState, rules: &Rules, mv: Move) -> DealResult<()> {
    check_move(state, rules, mv).map_err(|reason| DealError::illegal(mv, reason))?;

    match mv {
        Move::Draw => draw(state, rules),
        Move::WasteToFoundation => {
            if let Some(card) = state.waste.pop() {
                state.foundations[card.suit.index()].push(card.face_up());
            }
        }
        Move::WasteToTableau { dst } => {
            if let Some(card) = state.waste.pop() {
                state.tableau.column_mut(usize::from(dst)).push(card.face_up());
            }
        }
        Move::TableauToFoundation { src } => {
            let src = usize::from(src);
            if let Some(card) = state.tableau.column_mut(src).pop() {
                state.foundations[card.suit.index()].push(card);
            }
            state.tableau.flip_top_if_needed(src);
        }
        Move::TableauToTableau { src, start, dst } => {
            let src = usize::from(src);
            let run = state.tableau.column_mut(src).split_off(usize::from(start));
            state.tableau.column_mut(usize::from(dst)).extend(run);
            state.tableau.flip_top_if_needed(src);
        }
        Move::FoundationToTableau { suit, dst } => {
            if let Some(card) = state.foundations[suit.index()].pop() {
                state.tableau.column_mut(usize::from(dst)).push(card.face_up());
            }
        }
    }
    Ok(())
}

/// Apply a move as a pure transform: returns a new GameState on success.
pub fn apply_move(state: &GameState, rules: &Rules, mv: Move) -> DealResult<GameState> {
    let mut ns = state.clone();
    apply_move_in_place(&mut ns, rules, mv)?;
    Ok(ns)
}

fn draw(state: &mut GameState, rules: &Rules) {
    if state.stock.is_empty() {
        // Turn the waste over: its bottom card becomes the next draw.
        while let Some(card) = state.waste.pop() {
            state.stock.push(card.face_down());
        }
        return;
    }
    for _ in 0..rules.effective_draw_count() {
        let Some(card) = state.stock.pop() else {
            break;
        };
        state.waste.push(card.face_up());
    }
}

/// Finish a game whose tableau is fully face-up by sending cards home.
///
/// Repeatedly plays tableau tops and the waste top onto foundations, drawing
/// through the stock when nothing else moves. Returns the won state and the
/// moves used, or `None` if the cards jam before every foundation is complete.
pub fn auto_complete(state: &GameState, rules: &Rules) -> Option<(GameState, Vec<Move>)> {
    if state.tableau.hidden_count() > 0 {
        return None;
    }
    let mut ns = state.clone();
    let mut moves = Vec::new();
    // One full cycle of draws with no foundation progress means we are stuck.
    let mut idle_draws = 0usize;
    let cycle = ns.stock.len() + ns.waste.len() + 1;

    while !ns.is_won() {
        let mut progressed = false;
        for src in 0..COLUMNS as u8 {
            let mv = Move::TableauToFoundation { src };
            if apply_move_in_place(&mut ns, rules, mv).is_ok() {
                moves.push(mv);
                progressed = true;
            }
        }
        if apply_move_in_place(&mut ns, rules, Move::WasteToFoundation).is_ok() {
            moves.push(Move::WasteToFoundation);
            progressed = true;
        }
        if progressed {
            idle_draws = 0;
            continue;
        }
        if idle_draws > cycle || apply_move_in_place(&mut ns, rules, Move::Draw).is_err() {
            return None;
        }
        moves.push(Move::Draw);
        idle_draws += 1;
    }
    Some((ns, moves))
}
