use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Tableau;
use crate::resources::ResourcePreservation;
use crate::types::Slot;

/// Ranks treated as blockers when buried: Ace through 3.
const LOW_RANK: u8 = 3;

/// Cards stacked on top of `slot` in its column.
#[inline]
fn covered_by(tableau: &Tableau, slot: Slot) -> usize {
    tableau
        .len(usize::from(slot.col))
        .saturating_sub(usize::from(slot.row) + 1)
}

/// Pick one swap between two face-down tableau slots.
///
/// Prefers lifting a buried low card into a shallower slot of another column
/// and falls back to any two face-down slots.
pub fn pick_swap<R: Rng + ?Sized>(tableau: &Tableau, rng: &mut R) -> Option<(Slot, Slot)> {
    let hidden = tableau.face_down_slots();
    if hidden.len() < 2 {
        return None;
    }

    let low: Vec<Slot> = hidden
        .iter()
        .copied()
        .filter(|&s| tableau.get(s).is_some_and(|c| c.rank <= LOW_RANK) && covered_by(tableau, s) > 0)
        .collect();
    let buried = match low.choose(rng) {
        Some(&s) => s,
        None => *hidden.choose(rng)?,
    };

    let depth = covered_by(tableau, buried);
    let shallower: Vec<Slot> = hidden
        .iter()
        .copied()
        .filter(|&s| {
            s.col != buried.col
                && covered_by(tableau, s) < depth
                && tableau.get(s).is_some_and(|c| c.rank > LOW_RANK)
        })
        .collect();
    let partner = match shallower.choose(rng) {
        Some(&s) => s,
        None => {
            let others: Vec<Slot> = hidden.iter().copied().filter(|&s| s != buried).collect();
            *others.choose(rng)?
        }
    };
    Some((buried, partner))
}

/// Up to `count` swaps on distinct slots.
pub fn pick_swaps<R: Rng + ?Sized>(tableau: &Tableau, count: usize, rng: &mut R) -> Vec<(Slot, Slot)> {
    let mut plan: Vec<(Slot, Slot)> = Vec::with_capacity(count);
    // A few extra draws in case picks collide with slots already used.
    for _ in 0..count * 4 {
        if plan.len() == count {
            break;
        }
        let Some((a, b)) = pick_swap(tableau, rng) else {
            break;
        };
        let used = plan.iter().any(|&(x, y)| x == a || x == b || y == a || y == b);
        if !used {
            plan.push((a, b));
        }
    }
    plan
}

/// Apply `plan` in order, wrapping every swap in the adapter's snapshot/restore
/// so slot tags stay where they were.
pub fn apply_swaps<A>(tableau: &mut Tableau, plan: &[(Slot, Slot)], resources: &mut Option<&mut A>)
where
    A: ResourcePreservation + ?Sized,
{
    for &(a, b) in plan {
        swap_preserving(tableau, a, b, resources);
    }
}

/// Reverse of [`apply_swaps`] for the same plan.
pub fn undo_swaps<A>(tableau: &mut Tableau, plan: &[(Slot, Slot)], resources: &mut Option<&mut A>)
where
    A: ResourcePreservation + ?Sized,
{
    for &(a, b) in plan.iter().rev() {
        swap_preserving(tableau, a, b, resources);
    }
}

/// Swap the cards at two slots with resource tags held in place.
pub fn swap_preserving<A>(tableau: &mut Tableau, a: Slot, b: Slot, resources: &mut Option<&mut A>) -> bool
where
    A: ResourcePreservation + ?Sized,
{
    match resources {
        Some(adapter) => {
            let snapshot = adapter.snapshot(tableau);
            let swapped = tableau.swap(a, b);
            adapter.restore(tableau, snapshot);
            swapped
        }
        None => tableau.swap(a, b),
    }
}
