//! Solvable deal generation: shuffle, probe with the oracle, repair or reshuffle,
//! and fall back to a best-effort deal when every budget is spent.

use std::hash::BuildHasherDefault;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::hash::deal_fingerprint;
use crate::resources::{NoResources, ResourcePreservation};
use crate::rng::{entropy_seed, rng_for_seed, DealRng};
use crate::shuffle::{lay_out, random_deal, shuffle_deck_with};
use crate::solver::{Oracle, Verdict};
use crate::state::Deal;
use crate::types::Slot;

pub mod options;
pub mod repair;

pub use options::{DifficultyHint, GeneratorOptions, RoomVariant};

type FastHasher = BuildHasherDefault<ahash::AHasher>;
type SeenDeals = HashSet<u128, FastHasher>;

/// Telemetry for one generation; not needed for play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationDiagnostics {
    pub seed: u64,
    /// Shuffles performed.
    pub attempts: u32,
    /// Oracle runs, including those on repaired candidates.
    pub probes: u32,
    /// Swap combinations tried during repair.
    pub repair_swaps: u32,
    pub repaired: bool,
    /// Budgets ran out; the deal was not shown solvable.
    pub degraded: bool,
    /// Witness length of the accepted deal.
    pub move_count: Option<u32>,
}

/// Progress notifications for callers that want them (telemetry, UI hints).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    Shuffled { attempt: u32 },
    Probed { solvable: bool, explored: usize },
    RepairSwap { swaps: Vec<(Slot, Slot)>, accepted: bool },
    Done { repaired: bool, move_count: u32 },
    Fallback { attempts: u32 },
}

/// Outcome of repairing one deal.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    /// Verdict for the accepted swap, if any. The deal holds the swap only then.
    pub verdict: Option<Verdict>,
    pub swaps_tried: u32,
}

pub struct DealGenerator<'a, A: ResourcePreservation + ?Sized = NoResources> {
    options: GeneratorOptions,
    oracle: Oracle,
    resources: Option<&'a mut A>,
    observer: Option<&'a mut (dyn FnMut(GenerationEvent) + 'a)>,
}

impl<'a> DealGenerator<'a, NoResources> {
    pub fn new(options: GeneratorOptions) -> Self {
        let oracle = Oracle::new(options.rules(), options.oracle_limits());
        Self {
            options,
            oracle,
            resources: None,
            observer: None,
        }
    }
}

impl<'a, A: ResourcePreservation + ?Sized> DealGenerator<'a, A> {
    /// Use `adapter` to keep resource tags on their slots across repair swaps.
    pub fn with_resources<B>(self, adapter: &'a mut B) -> DealGenerator<'a, B>
    where
        B: ResourcePreservation + ?Sized,
    {
        DealGenerator {
            options: self.options,
            oracle: self.oracle,
            resources: Some(adapter),
            observer: self.observer,
        }
    }

    pub fn with_observer(mut self, observer: &'a mut (dyn FnMut(GenerationEvent) + 'a)) -> Self {
        self.observer = Some(observer);
        self
    }

    #[inline]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    #[inline]
    fn emit(&mut self, event: GenerationEvent) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer(event);
        }
    }

    fn probe(&mut self, deal: &Deal, diag: &mut GenerationDiagnostics) -> Verdict {
        diag.probes += 1;
        let verdict = self.oracle.probe(deal);
        log::debug!(
            "probe #{}: solvable={} explored={} hit_limit={} best_progress={}",
            diag.probes,
            verdict.solvable,
            verdict.explored,
            verdict.hit_limit,
            verdict.best_progress
        );
        self.emit(GenerationEvent::Probed {
            solvable: verdict.solvable,
            explored: verdict.explored,
        });
        verdict
    }

    /// Produce a deal the oracle accepts, or a degraded best effort.
    ///
    /// Never fails: when every reshuffle and repair budget is spent, the last
    /// shuffled deal is returned with `degraded` set.
    pub fn generate(&mut self) -> (Deal, GenerationDiagnostics) {
        let seed = self.options.seed.unwrap_or_else(entropy_seed);
        let mut rng = rng_for_seed(seed);
        let mut diag = GenerationDiagnostics {
            seed,
            ..GenerationDiagnostics::default()
        };
        let mut seen = SeenDeals::default();
        let mut last: Option<Deal> = None;

        for attempt in 0..=self.options.max_reshuffles {
            diag.attempts += 1;
            let mut deal = match random_deal(&mut rng) {
                Ok(deal) => deal,
                Err(e) => {
                    log::error!("shuffle #{attempt} produced a bad deck, retrying: {e}");
                    continue;
                }
            };
            self.emit(GenerationEvent::Shuffled { attempt });
            if !seen.insert(deal_fingerprint(&deal)) {
                continue;
            }

            let verdict = self.probe(&deal, &mut diag);
            if verdict.solvable {
                return self.finish(deal, verdict, diag);
            }

            for pass in 0..self.options.max_repairs_per_shuffle {
                if let Some(verdict) = self.repair_pass(&mut deal, pass, &mut rng, &mut seen, &mut diag) {
                    diag.repaired = true;
                    return self.finish(deal, verdict, diag);
                }
            }
            last = Some(deal);
        }

        diag.degraded = true;
        let deal = match last {
            Some(deal) => deal,
            None => lay_out(shuffle_deck_with(crate::cards::create_deck(), &mut rng)),
        };
        log::warn!(
            "no solvable deal after {} shuffles and {} probes (seed {}), using a best-effort deal",
            diag.attempts,
            diag.probes,
            diag.seed
        );
        self.emit(GenerationEvent::Fallback {
            attempts: diag.attempts,
        });
        (deal, diag)
    }

    fn finish(
        &mut self,
        deal: Deal,
        verdict: Verdict,
        mut diag: GenerationDiagnostics,
    ) -> (Deal, GenerationDiagnostics) {
        diag.move_count = Some(verdict.move_count);
        log::info!(
            "solvable deal after {} shuffles, {} probes (repaired={}, witness {} moves, seed {})",
            diag.attempts,
            diag.probes,
            diag.repaired,
            verdict.move_count,
            diag.seed
        );
        self.emit(GenerationEvent::Done {
            repaired: diag.repaired,
            move_count: verdict.move_count,
        });
        (deal, diag)
    }

    /// Run every repair pass the options allow on `deal`.
    ///
    /// On success the deal holds the accepted swaps; otherwise it is restored
    /// to its original layout.
    pub fn repair(&mut self, deal: &mut Deal, rng: &mut DealRng) -> RepairOutcome {
        let mut seen = SeenDeals::default();
        seen.insert(deal_fingerprint(deal));
        let mut diag = GenerationDiagnostics::default();
        for pass in 0..self.options.max_repairs_per_shuffle {
            if let Some(verdict) = self.repair_pass(deal, pass, rng, &mut seen, &mut diag) {
                return RepairOutcome {
                    verdict: Some(verdict),
                    swaps_tried: diag.repair_swaps,
                };
            }
        }
        RepairOutcome {
            verdict: None,
            swaps_tried: diag.repair_swaps,
        }
    }

    /// One repair pass: try swap combinations on face-down tableau cards and keep
    /// the first one the oracle accepts. The first pass swaps one pair, later
    /// passes two.
    fn repair_pass(
        &mut self,
        deal: &mut Deal,
        pass: u32,
        rng: &mut DealRng,
        seen: &mut SeenDeals,
        diag: &mut GenerationDiagnostics,
    ) -> Option<Verdict> {
        let swaps_per_combo = if pass == 0 { 1 } else { 2 };
        for _ in 0..self.options.max_swaps_per_repair {
            let plan = repair::pick_swaps(&deal.tableau, swaps_per_combo, rng);
            if plan.is_empty() {
                return None;
            }
            diag.repair_swaps += 1;

            repair::apply_swaps(&mut deal.tableau, &plan, &mut self.resources);
            if !seen.insert(deal_fingerprint(deal)) {
                repair::undo_swaps(&mut deal.tableau, &plan, &mut self.resources);
                continue;
            }

            let verdict = self.probe(deal, diag);
            log::debug!("repair swap {plan:?}: accepted={}", verdict.solvable);
            self.emit(GenerationEvent::RepairSwap {
                swaps: plan.clone(),
                accepted: verdict.solvable,
            });
            if verdict.solvable {
                return Some(verdict);
            }
            repair::undo_swaps(&mut deal.tableau, &plan, &mut self.resources);
        }
        None
    }
}

/// Generate a deal with `options` and no resource adapter.
pub fn generate_solvable_deal(options: &GeneratorOptions) -> (Deal, GenerationDiagnostics) {
    DealGenerator::new(options.clone()).generate()
}
