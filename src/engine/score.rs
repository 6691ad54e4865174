use crate::state::GameState;

/// Rough progress estimate: foundation cards dominate, then revealed and
/// emptied columns, minus what is still face-down.
#[inline]
pub fn progress(state: &GameState) -> i32 {
    let foundation = state.foundation_count() as i32;
    let hidden = state.tableau.hidden_count() as i32;
    let face_up = state.tableau.card_count() as i32 - hidden;
    let empty = state.tableau.empty_columns() as i32;
    foundation * 100 + face_up * 5 + empty * 10 - hidden * 10
}
