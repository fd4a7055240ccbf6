//! Computed table for ITE and quantification results.
//!
//! Direct-mapped: a key owns exactly one slot and a newer result evicts the
//! older one. The full key is kept, so a colliding operation is a miss, never
//! a wrong answer.

use std::cell::Cell;

use crate::utils::MyHash;

struct Slot<K, V> {
    key: K,
    value: V,
}

pub struct Cache<K, V> {
    slots: Vec<Option<Slot<K, V>>>,
    mask: u64,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<K, V> Cache<K, V> {
    /// Cache with `2^bits` slots.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "cache size must be at most 2^31 slots");

        let num_slots = 1usize << bits;
        Self {
            slots: std::iter::repeat_with(|| None).take(num_slots).collect(),
            mask: (num_slots - 1) as u64,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    pub fn misses(&self) -> usize {
        self.misses.get()
    }
}

impl<K: MyHash + Eq, V: Copy> Cache<K, V> {
    fn index(&self, key: &K) -> usize {
        (key.hash() & self.mask) as usize
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.slots[self.index(key)]
            .as_ref()
            .filter(|slot| slot.key == *key)
            .map(|slot| slot.value);
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.set(counter.get() + 1);
        found
    }

    pub fn insert(&mut self, key: K, value: V) {
        let index = self.index(&key);
        self.slots[index] = Some(Slot { key, value });
    }
}
