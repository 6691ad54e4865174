use serde::{Deserialize, Serialize};

use crate::rules::Rules;
use crate::state::{Deal, Move};

pub mod move_order;
pub mod oracle;
pub mod simulation;
pub mod tt;

pub use oracle::Oracle;
pub use simulation::SimulationState;
pub use tt::{InMemoryTT, TTEntry, TranspositionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleLimits {
    /// Longest witness line accepted.
    pub max_moves: u32,
    /// Waste turn-overs allowed along one line.
    pub max_stock_passes: u8,
    /// Positions expanded before the search gives up.
    pub max_states: usize,
}

impl Default for OracleLimits {
    fn default() -> Self {
        Self {
            max_moves: 500,
            max_stock_passes: 4,
            max_states: 4_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub solvable: bool,
    pub move_count: u32,
    /// Winning line when `solvable`; empty otherwise.
    pub line: Vec<Move>,
    pub explored: usize,
    /// The state budget ran out before the search finished.
    pub hit_limit: bool,
    /// Highest `progress` score among the positions reached.
    #[serde(default)]
    pub best_progress: i32,
}

/// Run the oracle with classic rules and default limits.
pub fn solve(deal: &Deal) -> Verdict {
    Oracle::new(Rules::default(), OracleLimits::default()).probe(deal)
}

#[inline]
pub fn is_solvable(deal: &Deal) -> bool {
    solve(deal).solvable
}
