use crate::engine::apply::apply_move_in_place;
use crate::error::DealResult;
use crate::rules::Rules;
use crate::state::{Deal, GameState, Move};

/// Working copy of a deal owned by a single oracle run.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub state: GameState,
    pub moves: u32,
    pub is_won: bool,
    /// Times the waste has been turned back into the stock.
    pub stock_passes: u8,
}

impl SimulationState {
    /// Copies `deal` with every column top face-up, as a dealt layout has them.
    pub fn from_deal(deal: &Deal) -> Self {
        let mut state = deal.clone();
        state.tableau.flip_tops();
        Self {
            state,
            moves: 0,
            is_won: deal.is_won(),
            stock_passes: 0,
        }
    }

    /// A draw from an empty stock would turn the waste over.
    #[inline]
    pub fn draw_recycles(&self) -> bool {
        self.state.stock.is_empty() && !self.state.waste.is_empty()
    }

    pub fn apply(&mut self, rules: &Rules, mv: Move) -> DealResult<()> {
        let recycles = mv == Move::Draw && self.draw_recycles();
        apply_move_in_place(&mut self.state, rules, mv)?;
        if recycles {
            self.stock_passes = self.stock_passes.saturating_add(1);
        }
        self.moves += 1;
        self.is_won = self.state.is_won();
        Ok(())
    }
}
