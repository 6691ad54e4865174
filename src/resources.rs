//! Hooks that keep caller-defined tableau markers in place across deal repair.
//!
//! The generator calls [`ResourcePreservation::snapshot`] right before it swaps
//! two tableau cards and [`ResourcePreservation::restore`] right after. Tags are
//! opaque to the generator; what must hold is that the tag on a slot before the
//! swap is on the same slot afterwards, whichever card now sits there.

use std::collections::{BTreeMap, HashMap};

use crate::board::Tableau;
use crate::cards::Card;
use crate::types::Slot;

/// Slot-keyed tags captured before a repair swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSnapshot<T> {
    tags: BTreeMap<Slot, T>,
}

impl<T> Default for ResourceSnapshot<T> {
    fn default() -> Self {
        Self { tags: BTreeMap::new() }
    }
}

impl<T> ResourceSnapshot<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, slot: Slot, tag: T) {
        self.tags.insert(slot, tag);
    }

    #[inline]
    pub fn get(&self, slot: Slot) -> Option<&T> {
        self.tags.get(&slot)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Slot, &T)> {
        self.tags.iter()
    }
}

impl<T> IntoIterator for ResourceSnapshot<T> {
    type Item = (Slot, T);
    type IntoIter = std::collections::btree_map::IntoIter<Slot, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

pub trait ResourcePreservation {
    type Tag;

    fn snapshot(&mut self, tableau: &Tableau) -> ResourceSnapshot<Self::Tag>;
    fn restore(&mut self, tableau: &Tableau, snapshot: ResourceSnapshot<Self::Tag>);
}

/// Adapter for callers without markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourcePreservation for NoResources {
    type Tag = ();

    #[inline]
    fn snapshot(&mut self, _tableau: &Tableau) -> ResourceSnapshot<()> {
        ResourceSnapshot::new()
    }

    #[inline]
    fn restore(&mut self, _tableau: &Tableau, _snapshot: ResourceSnapshot<()>) {}
}

/// Tags bound to card identities (e.g. "this card grants a key").
///
/// A swap would carry a tag along with its card; `restore` rebinds every
/// snapshotted tag to the card now occupying the tagged slot.
#[derive(Debug, Clone, Default)]
pub struct CardTags<T> {
    by_card: HashMap<usize, T>,
}

impl<T: Clone> CardTags<T> {
    pub fn new() -> Self {
        Self { by_card: HashMap::new() }
    }

    #[inline]
    pub fn tag_card(&mut self, card: Card, tag: T) {
        self.by_card.insert(card.id(), tag);
    }

    /// Tag whatever card currently sits at `slot`. Returns false for an empty slot.
    pub fn tag_slot(&mut self, tableau: &Tableau, slot: Slot, tag: T) -> bool {
        match tableau.get(slot) {
            Some(card) => {
                self.tag_card(card, tag);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn tag_for_card(&self, card: Card) -> Option<&T> {
        self.by_card.get(&card.id())
    }

    #[inline]
    pub fn tag_at(&self, tableau: &Tableau, slot: Slot) -> Option<&T> {
        tableau.get(slot).and_then(|card| self.tag_for_card(card))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_card.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_card.is_empty()
    }
}

impl<T: Clone> ResourcePreservation for CardTags<T> {
    type Tag = T;

    fn snapshot(&mut self, tableau: &Tableau) -> ResourceSnapshot<T> {
        let mut snapshot = ResourceSnapshot::new();
        for (slot, card) in tableau.slots() {
            if let Some(tag) = self.by_card.get(&card.id()) {
                snapshot.insert(slot, tag.clone());
            }
        }
        snapshot
    }

    fn restore(&mut self, tableau: &Tableau, snapshot: ResourceSnapshot<T>) {
        // Tableau tags are rebuilt from the snapshot; tags on stock cards stay.
        for (_, card) in tableau.slots() {
            self.by_card.remove(&card.id());
        }
        for (slot, tag) in snapshot {
            if let Some(card) = tableau.get(slot) {
                self.by_card.insert(card.id(), tag);
            }
        }
    }
}
