//! Entry Storage
//!
//! Every live entry of a cache, together with the cache's sentinel, lives in a
//! single slot arena. Structural links between entries (tree parent/children and
//! recency neighbours) are slot indices rather than pointers, so the tree and the
//! recency list can both be rewired freely without any `unsafe`.
//!
//! # Layout
//!
//! ```text
//!   slot 0        slot 1        slot 2        slot 3
//! ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐
//! │ SENTINEL │  │ (k1, v1) │  │  free    │  │ (k3, v3) │
//! │ left=root│  │ gen = 1  │  │ gen = 2  │  │ gen = 1  │
//! └──────────┘  └──────────┘  └──────────┘  └──────────┘
//! ```
//!
//! - Slot 0 is the sentinel for the lifetime of the arena. Its `left` link holds
//!   the root of the key index and its `prev`/`next` links anchor the recency list.
//! - Releasing a slot bumps its generation and pushes it onto the free list.
//!   The next allocation reuses it, so storage of evicted entries is recycled while
//!   every cursor issued for the old occupant stops matching.

use alloc::vec::Vec;
use core::fmt;

/// Index used for an absent link.
pub(crate) const NIL: usize = usize::MAX;

/// Index of the sentinel slot.
pub(crate) const SENTINEL: usize = 0;

/// Generation of the sentinel. It never changes, so `end()` cursors never go stale.
pub(crate) const SENTINEL_GENERATION: u64 = 0;

/// Largest number of entry slots reserved when an arena is created.
pub(crate) const PREALLOC_LIMIT: usize = 1024;

/// Node color for the red-black key index. Absent links count as black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// One arena slot: a key/value pair plus its position in both structures.
pub(crate) struct Entry<K, V> {
    /// `None` for the sentinel and for free slots.
    kv: Option<(K, V)>,
    pub(crate) parent: usize,
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) color: Color,
    pub(crate) prev: usize,
    pub(crate) next: usize,
    generation: u64,
}

impl<K, V> Entry<K, V> {
    fn sentinel() -> Self {
        Entry {
            kv: None,
            parent: NIL,
            left: NIL,
            right: NIL,
            color: Color::Black,
            prev: SENTINEL,
            next: SENTINEL,
            generation: SENTINEL_GENERATION,
        }
    }

    fn occupied(key: K, value: V, generation: u64) -> Self {
        Entry {
            kv: Some((key, value)),
            parent: NIL,
            left: NIL,
            right: NIL,
            color: Color::Red,
            prev: NIL,
            next: NIL,
            generation,
        }
    }

    fn reset_links(&mut self) {
        self.parent = NIL;
        self.left = NIL;
        self.right = NIL;
        self.color = Color::Red;
        self.prev = NIL;
        self.next = NIL;
    }
}

/// Slot arena owning every entry of one cache plus its sentinel.
pub(crate) struct Nodes<K, V> {
    slots: Vec<Entry<K, V>>,
    free: Vec<usize>,
}

impl<K, V> Nodes<K, V> {
    /// Creates an arena holding only the sentinel.
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an arena sized for `capacity` entries besides the sentinel.
    ///
    /// At most [`PREALLOC_LIMIT`] slots are reserved up front. Larger caches
    /// grow on demand.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.min(PREALLOC_LIMIT) + 1);
        slots.push(Entry::sentinel());
        Nodes {
            slots,
            free: Vec::new(),
        }
    }

    /// Stores a new pair and returns its slot, reusing a released slot when one
    /// is available. The returned slot is not yet linked anywhere.
    pub(crate) fn alloc(&mut self, key: K, value: V) -> usize {
        match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                slot.reset_links();
                slot.kv = Some((key, value));
                idx
            }
            None => {
                self.slots.push(Entry::occupied(key, value, 1));
                self.slots.len() - 1
            }
        }
    }

    /// Takes the pair out of `idx` and returns the slot to the free list.
    ///
    /// The caller must already have detached the slot from the key index and the
    /// recency list.
    pub(crate) fn release(&mut self, idx: usize) -> (K, V) {
        debug_assert_ne!(idx, SENTINEL, "the sentinel is never released");
        let slot = &mut self.slots[idx];
        let kv = match slot.kv.take() {
            Some(kv) => kv,
            None => unreachable!("released slot {idx} holds no entry"),
        };
        slot.reset_links();
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation == SENTINEL_GENERATION {
            slot.generation = 1;
        }
        self.free.push(idx);
        kv
    }

    /// Releases every occupied slot and resets the sentinel to the empty state.
    pub(crate) fn release_all(&mut self) {
        for idx in 1..self.slots.len() {
            if self.slots[idx].kv.is_some() {
                drop(self.release(idx));
            }
        }
        let sentinel = &mut self.slots[SENTINEL];
        sentinel.left = NIL;
        sentinel.prev = SENTINEL;
        sentinel.next = SENTINEL;
    }

    /// Returns true if `idx` currently holds an entry issued with `generation`.
    /// The sentinel matches only [`SENTINEL_GENERATION`].
    pub(crate) fn is_current(&self, idx: usize, generation: u64) -> bool {
        match self.slots.get(idx) {
            Some(slot) if idx == SENTINEL => slot.generation == generation,
            Some(slot) => slot.kv.is_some() && slot.generation == generation,
            None => false,
        }
    }

    #[inline]
    pub(crate) fn generation(&self, idx: usize) -> u64 {
        self.slots[idx].generation
    }

    #[inline]
    pub(crate) fn slot(&self, idx: usize) -> &Entry<K, V> {
        &self.slots[idx]
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, idx: usize) -> &mut Entry<K, V> {
        &mut self.slots[idx]
    }

    /// The key/value pair stored at a live slot.
    #[inline]
    pub(crate) fn kv(&self, idx: usize) -> &(K, V) {
        match &self.slots[idx].kv {
            Some(kv) => kv,
            None => unreachable!("slot {idx} holds no entry"),
        }
    }

    #[inline]
    pub(crate) fn kv_mut(&mut self, idx: usize) -> &mut (K, V) {
        match &mut self.slots[idx].kv {
            Some(kv) => kv,
            None => unreachable!("slot {idx} holds no entry"),
        }
    }

    #[inline]
    pub(crate) fn key(&self, idx: usize) -> &K {
        &self.kv(idx).0
    }

    /// Number of slots ever allocated, including the sentinel and free slots.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots the backing storage can hold without reallocating.
    #[cfg(test)]
    pub(crate) fn reserved(&self) -> usize {
        self.slots.capacity()
    }
}

impl<K, V> fmt::Debug for Nodes<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Nodes")
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}
