use std::hash::BuildHasherDefault;

use hashbrown::HashMap;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

/// What the oracle remembers about a position it already expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Stock recycles still allowed when the position was expanded.
    pub passes_left: u8,
    /// Moves played to reach it.
    pub moves: u32,
}

impl TTEntry {
    /// True if a previous visit had at least the resources of `self`,
    /// so expanding again cannot find anything new.
    #[inline]
    pub fn dominated_by(&self, old: &TTEntry) -> bool {
        old.passes_left >= self.passes_left && old.moves <= self.moves
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub gets: u64,
    pub puts: u64,
    pub hits: u64,
    pub replaced: u64,
}

pub trait TranspositionTable {
    fn get(&mut self, key: u128) -> Option<TTEntry>;
    fn put(&mut self, key: u128, entry: TTEntry);
    fn clear(&mut self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash map keyed by Zobrist key. A new entry replaces an old one only if it
/// carries more remaining stock passes or was reached in fewer moves.
#[derive(Debug, Default)]
pub struct InMemoryTT {
    map: HashMap<u128, TTEntry, FastHasher>,
    stats: TTStats,
}

impl InMemoryTT {
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(cap, FastHasher::default()),
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }
}

impl TranspositionTable for InMemoryTT {
    #[inline]
    fn get(&mut self, key: u128) -> Option<TTEntry> {
        self.stats.gets = self.stats.gets.saturating_add(1);
        let entry = self.map.get(&key).copied();
        if entry.is_some() {
            self.stats.hits = self.stats.hits.saturating_add(1);
        }
        entry
    }

    #[inline]
    fn put(&mut self, key: u128, entry: TTEntry) {
        self.stats.puts = self.stats.puts.saturating_add(1);
        match self.map.get_mut(&key) {
            Some(old) => {
                let better = entry.passes_left > old.passes_left
                    || (entry.passes_left == old.passes_left && entry.moves < old.moves);
                if better {
                    *old = entry;
                    self.stats.replaced = self.stats.replaced.saturating_add(1);
                }
            }
            None => {
                self.map.insert(key, entry);
            }
        }
    }

    #[inline]
    fn clear(&mut self) {
        self.map.clear();
        self.stats = TTStats::default();
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }
}
