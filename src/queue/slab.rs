//! Fixed-size element slab
//!
//! Owned storage for exactly `capacity` elements. Only the live prefix
//! `[0, len)` holds values; the spare tail is reserved memory that is never
//! read. Removal at the front compacts the remaining elements one slot toward
//! index 0, so the oldest element always sits at index 0.

use std::num::NonZeroUsize;

/// Fixed-capacity storage with front compaction.
pub(crate) struct Slab<T> {
    items: Vec<T>,
    capacity: NonZeroUsize,
}

impl<T> Slab<T> {
    /// Reserve storage for exactly `capacity` elements.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let mut items = Vec::new();
        items.reserve_exact(capacity.get());
        Self { items, capacity }
    }

    /// Append `item` after the newest element.
    ///
    /// When the slab is full the oldest element is removed first (every
    /// remaining element shifts one slot toward the front) and handed back.
    pub fn push_back(&mut self, item: T) -> Option<T> {
        let evicted = if self.is_full() {
            Some(self.items.remove(0))
        } else {
            None
        };
        self.items.push(item);
        self.check_invariants();
        evicted
    }

    /// Remove the oldest element, compacting the rest toward the front.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let item = self.items.remove(0);
        self.check_invariants();
        Some(item)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity.get()
    }

    /// The live prefix, oldest first.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn check_invariants(&self) {
        assert!(
            self.items.len() <= self.capacity.get(),
            "slab holds {} elements but capacity is {}",
            self.items.len(),
            self.capacity
        );
        debug_assert!(
            self.items.capacity() >= self.capacity.get(),
            "slab storage shrank below its capacity"
        );
    }
}

impl<T: Clone> Clone for Slab<T> {
    /// Deep-copies the live prefix into freshly reserved storage.
    fn clone(&self) -> Self {
        let mut copy = Self::new(self.capacity);
        copy.items.extend(self.items.iter().cloned());
        copy
    }
}
