use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

pub const DEFAULT_DEDUP_CAPACITY: usize = 1000;
pub const DEFAULT_DEDUP_EVICT_BATCH: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupVerdict {
    New,
    Duplicate,
}

/// Bounded memory of already-relayed message keys.
///
/// Once more than `capacity` keys are held, the oldest `evict_batch` are
/// dropped in one pass. Eviction follows insertion order.
#[derive(Debug)]
pub struct DedupGuard<K> {
    seen: HashSet<K>,
    order: VecDeque<K>,
    capacity: usize,
    evict_batch: usize,
}

impl<K> DedupGuard<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize, evict_batch: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            seen: HashSet::with_capacity(capacity + 1),
            order: VecDeque::with_capacity(capacity + 1),
            capacity,
            evict_batch: evict_batch.clamp(1, capacity),
        }
    }

    pub fn check_and_mark(&mut self, key: K) -> DedupVerdict {
        if self.seen.contains(&key) {
            return DedupVerdict::Duplicate;
        }

        self.seen.insert(key.clone());
        self.order.push_back(key);

        if self.order.len() > self.capacity {
            self.evict_oldest();
        }

        DedupVerdict::New
    }

    fn evict_oldest(&mut self) {
        let count = self.evict_batch.min(self.order.len());
        for key in self.order.drain(..count) {
            self.seen.remove(&key);
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K> Default for DedupGuard<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_CAPACITY, DEFAULT_DEDUP_EVICT_BATCH)
    }
}
