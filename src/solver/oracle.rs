use crate::engine::apply::auto_complete;
use crate::engine::score::progress;
use crate::hash::zobrist_key;
use crate::rules::Rules;
use crate::state::{Deal, Move};

use super::move_order::{is_pointless, order_moves};
use super::simulation::SimulationState;
use super::tt::{InMemoryTT, TTEntry, TranspositionTable};
use super::{OracleLimits, Verdict};

struct Frame {
    sim: SimulationState,
    moves: Vec<Move>,
    next: usize,
}

enum Visit {
    /// Position is won, possibly after the given auto-complete tail.
    Won(Vec<Move>),
    Expand(Frame),
    Skip,
}

/// Full-information solver used to validate deals.
///
/// Follows the move priority greedily and backtracks within `OracleLimits`.
/// A positive verdict always carries the replayed winning line; a negative one
/// only means this search gave up.
pub struct Oracle {
    rules: Rules,
    limits: OracleLimits,
    tt: InMemoryTT,
    explored: usize,
    exhausted: bool,
    best_progress: i32,
}

impl Oracle {
    pub fn new(rules: Rules, limits: OracleLimits) -> Self {
        Self {
            rules,
            limits,
            tt: InMemoryTT::with_capacity(limits.max_states.min(1 << 16)),
            explored: 0,
            exhausted: false,
            best_progress: i32::MIN,
        }
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[inline]
    pub fn limits(&self) -> &OracleLimits {
        &self.limits
    }

    /// Search for a winning line from `deal`. The deal itself is not touched.
    pub fn probe(&mut self, deal: &Deal) -> Verdict {
        self.tt.clear();
        self.explored = 0;
        self.exhausted = false;
        self.best_progress = i32::MIN;

        let line = self.search(SimulationState::from_deal(deal));
        let verdict = match line {
            Some(line) => Verdict {
                solvable: true,
                move_count: line.len() as u32,
                line,
                explored: self.explored,
                hit_limit: false,
                best_progress: self.best_progress,
            },
            None => Verdict {
                solvable: false,
                move_count: 0,
                line: Vec::new(),
                explored: self.explored,
                hit_limit: self.exhausted,
                best_progress: self.best_progress,
            },
        };
        let stats = self.tt.stats();
        log::trace!(
            "oracle: solvable={} moves={} explored={} hit_limit={} best_progress={} tt(gets={} hits={} puts={} replaced={})",
            verdict.solvable,
            verdict.move_count,
            verdict.explored,
            verdict.hit_limit,
            verdict.best_progress,
            stats.gets,
            stats.hits,
            stats.puts,
            stats.replaced
        );
        verdict
    }

    fn search(&mut self, root: SimulationState) -> Option<Vec<Move>> {
        let mut line: Vec<Move> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        match self.visit(root) {
            Visit::Won(tail) => return Some(tail),
            Visit::Expand(frame) => stack.push(frame),
            Visit::Skip => return None,
        }

        while let Some(frame) = stack.last_mut() {
            if self.exhausted {
                return None;
            }
            if frame.next >= frame.moves.len() {
                stack.pop();
                line.pop();
                continue;
            }
            let mv = frame.moves[frame.next];
            frame.next += 1;

            let mut child = frame.sim.clone();
            if child.apply(&self.rules, mv).is_err() {
                continue;
            }
            match self.visit(child) {
                Visit::Won(tail) => {
                    line.push(mv);
                    line.extend(tail);
                    return Some(line);
                }
                Visit::Expand(next) => {
                    line.push(mv);
                    stack.push(next);
                }
                Visit::Skip => {}
            }
        }
        None
    }

    fn visit(&mut self, sim: SimulationState) -> Visit {
        self.best_progress = self.best_progress.max(progress(&sim.state));
        if sim.is_won {
            return Visit::Won(Vec::new());
        }
        if sim.moves >= self.limits.max_moves {
            return Visit::Skip;
        }
        if sim.state.tableau.hidden_count() == 0 {
            if let Some((won, tail)) = auto_complete(&sim.state, &self.rules) {
                if sim.moves as usize + tail.len() <= self.limits.max_moves as usize {
                    self.best_progress = self.best_progress.max(progress(&won));
                    return Visit::Won(tail);
                }
            }
        }

        let key = zobrist_key(&sim.state);
        let entry = TTEntry {
            passes_left: self.limits.max_stock_passes.saturating_sub(sim.stock_passes),
            moves: sim.moves,
        };
        if let Some(old) = self.tt.get(key) {
            if entry.dominated_by(&old) {
                return Visit::Skip;
            }
        }
        self.tt.put(key, entry);

        self.explored += 1;
        if self.explored > self.limits.max_states {
            self.exhausted = true;
            return Visit::Skip;
        }

        let moves = self.candidate_moves(&sim);
        Visit::Expand(Frame { sim, moves, next: 0 })
    }

    fn candidate_moves(&self, sim: &SimulationState) -> Vec<Move> {
        let state = &sim.state;
        let passes_spent = sim.stock_passes >= self.limits.max_stock_passes;
        let mut moves = state.legal_moves(&self.rules);
        moves.retain(|&mv| {
            if mv == Move::Draw && passes_spent && sim.draw_recycles() {
                return false;
            }
            !is_pointless(state, mv)
        });
        order_moves(state, &self.rules, &mut moves);
        moves
    }
}
