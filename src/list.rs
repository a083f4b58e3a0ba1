//! Recency List
//!
//! An intrusive, circular, doubly linked ordering of every live entry, threaded
//! through the `prev`/`next` links of the arena slots. The sentinel closes the
//! circle: its `next` is the least recently used entry (the eviction candidate)
//! and its `prev` is the most recently used one.
//!
//! ```text
//!        ┌─────────────────────────────────────────────────┐
//!        ▼                                                 │
//!   ┌──────────┐ next ┌─────┐ next ┌─────┐ next ┌─────┐ next
//!   │ SENTINEL │─────▶│ LRU │─────▶│ ... │─────▶│ MRU │──┘
//!   └──────────┘◀─────└─────┘◀─────└─────┘◀─────└─────┘
//!                prev         prev         prev
//! ```
//!
//! Membership is independent of the key index: both structures link the same
//! slot, never copies of it.

use crate::entry::{Nodes, NIL, SENTINEL};

impl<K, V> Nodes<K, V> {
    /// Links a detached slot just before the sentinel, marking it most recently used.
    pub(crate) fn link_at_tail(&mut self, idx: usize) {
        let last = self.slot(SENTINEL).prev;
        self.slot_mut(last).next = idx;
        {
            let node = self.slot_mut(idx);
            node.prev = last;
            node.next = SENTINEL;
        }
        self.slot_mut(SENTINEL).prev = idx;
    }

    /// Removes a slot from the recency list, reconnecting its neighbours.
    pub(crate) fn unlink(&mut self, idx: usize) {
        debug_assert_ne!(idx, SENTINEL, "the sentinel anchors the list");
        let (prev, next) = {
            let node = self.slot(idx);
            (node.prev, node.next)
        };
        self.slot_mut(prev).next = next;
        self.slot_mut(next).prev = prev;
        let node = self.slot_mut(idx);
        node.prev = NIL;
        node.next = NIL;
    }

    /// Marks a linked slot as most recently used.
    pub(crate) fn move_to_tail(&mut self, idx: usize) {
        // Already the most recent entry
        if self.slot(idx).next == SENTINEL {
            return;
        }
        self.unlink(idx);
        self.link_at_tail(idx);
    }

    /// The least recently used slot, if any.
    #[inline]
    pub(crate) fn head(&self) -> Option<usize> {
        let first = self.slot(SENTINEL).next;
        (first != SENTINEL).then_some(first)
    }

    /// The most recently used slot, if any.
    #[inline]
    pub(crate) fn tail(&self) -> Option<usize> {
        let last = self.slot(SENTINEL).prev;
        (last != SENTINEL).then_some(last)
    }

    /// The slot used right after `idx`, or the sentinel past the newest entry.
    #[inline]
    pub(crate) fn newer(&self, idx: usize) -> usize {
        self.slot(idx).next
    }
}
