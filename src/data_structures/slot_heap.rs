use crate::data_structures::entry::EntryId;
use crate::{Error, Result};

/// Callbacks through which a [`SlotHeap`] consults and notifies its owner
///
/// The heap only stores identifiers. Ordering is delegated to `precedes`, and
/// every change of an identifier's slot is reported before the percolation
/// step that caused it returns.
pub trait SlotObserver {
    /// Returns true if `a` must sit above `b` in the heap
    fn precedes(&self, a: EntryId, b: EntryId) -> bool;

    /// `a` now lives at `slot_a` and `b` at `slot_b`
    fn on_swap(&mut self, a: EntryId, slot_a: usize, b: EntryId, slot_b: usize);

    /// `id` was placed at `slot` without a counterpart (push, fill of a vacated slot)
    fn on_move(&mut self, id: EntryId, slot: usize);
}

/// Array-backed binary heap over entry identifiers
///
/// Slot `i` has children `2i + 1` and `2i + 2`. For every non-root slot the
/// observer's `precedes(parent, child)` holds, or the two compare equal.
#[derive(Debug, Default, Clone)]
pub struct SlotHeap {
    slots: Vec<EntryId>,
}

#[inline]
fn parent(slot: usize) -> usize {
    (slot - 1) / 2
}

impl SlotHeap {
    /// Creates an empty heap
    pub fn new() -> Self {
        SlotHeap { slots: Vec::new() }
    }

    /// Creates an empty heap with room for `capacity` identifiers
    pub fn with_capacity(capacity: usize) -> Self {
        SlotHeap {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Reserves room for at least `additional` more identifiers
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Builds a valid heap from an arbitrary sequence in O(n)
    ///
    /// Every identifier is first reported at its initial slot, then the array
    /// is repaired bottom-up starting at the last parent.
    pub fn heapify<O: SlotObserver>(items: Vec<EntryId>, observer: &mut O) -> Self {
        let mut heap = SlotHeap { slots: items };
        for (slot, &id) in heap.slots.iter().enumerate() {
            observer.on_move(id, slot);
        }
        for slot in (0..heap.slots.len() / 2).rev() {
            heap.percolate_down(slot, observer);
        }
        heap
    }

    /// Returns the number of identifiers in the heap
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the heap holds no identifiers
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Identifier at the top of the heap
    pub fn peek_top(&self) -> Option<EntryId> {
        self.slots.first().copied()
    }

    /// Identifier stored at `slot`
    pub fn slot(&self, slot: usize) -> Option<EntryId> {
        self.slots.get(slot).copied()
    }

    /// The heap array, root first
    pub fn as_slice(&self) -> &[EntryId] {
        &self.slots
    }

    /// Drops every identifier without notifying the observer
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Appends `id` and moves it up to its place
    pub fn push_slot<O: SlotObserver>(&mut self, id: EntryId, observer: &mut O) {
        let slot = self.slots.len();
        self.slots.push(id);
        observer.on_move(id, slot);
        self.percolate_up(slot, observer);
    }

    /// Removes and returns the identifier at the top
    ///
    /// # Errors
    /// Returns `Error::Empty` if the heap holds no identifiers.
    pub fn pop_top<O: SlotObserver>(&mut self, observer: &mut O) -> Result<EntryId> {
        if self.slots.is_empty() {
            return Err(Error::Empty);
        }
        self.remove_at(0, observer)
    }

    /// Removes and returns the identifier at an arbitrary slot
    ///
    /// The last identifier fills the hole and is repaired in both directions,
    /// since it may belong either above or below its new position.
    ///
    /// # Errors
    /// Returns `Error::SlotOutOfRange` if `slot >= len()`.
    pub fn remove_at<O: SlotObserver>(&mut self, slot: usize, observer: &mut O) -> Result<EntryId> {
        let len = self.slots.len();
        if slot >= len {
            return Err(Error::SlotOutOfRange { slot, len });
        }

        let removed = self.slots.swap_remove(slot);
        if slot < self.slots.len() {
            let moved = self.slots[slot];
            observer.on_move(moved, slot);
            let settled = self.percolate_up(slot, observer);
            if settled == slot {
                self.percolate_down(slot, observer);
            }
        }
        Ok(removed)
    }

    fn swap<O: SlotObserver>(&mut self, a: usize, b: usize, observer: &mut O) {
        self.slots.swap(a, b);
        observer.on_swap(self.slots[a], a, self.slots[b], b);
    }

    /// Returns the slot the identifier came to rest at
    fn percolate_up<O: SlotObserver>(&mut self, mut slot: usize, observer: &mut O) -> usize {
        while slot > 0 {
            let up = parent(slot);
            if !observer.precedes(self.slots[slot], self.slots[up]) {
                break;
            }
            self.swap(slot, up, observer);
            slot = up;
        }
        slot
    }

    fn percolate_down<O: SlotObserver>(&mut self, mut slot: usize, observer: &mut O) {
        let len = self.slots.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && observer.precedes(self.slots[right], self.slots[left]) {
                right
            } else {
                left
            };
            if !observer.precedes(self.slots[child], self.slots[slot]) {
                break;
            }
            self.swap(slot, child, observer);
            slot = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Orders identifiers by a weight table and records positions
    #[derive(Default)]
    struct Tracker {
        weights: HashMap<EntryId, i32>,
        positions: HashMap<EntryId, usize>,
    }

    impl Tracker {
        fn add(&mut self, seq: u64, weight: i32) -> EntryId {
            let id = EntryId(seq);
            self.weights.insert(id, weight);
            id
        }

        fn check(&self, heap: &SlotHeap) {
            for (slot, id) in heap.as_slice().iter().enumerate() {
                assert_eq!(self.positions[id], slot, "stale position for {id}");
                if slot > 0 {
                    let up = heap.as_slice()[parent(slot)];
                    assert!(self.weights[&up] <= self.weights[id]);
                }
            }
        }
    }

    impl SlotObserver for Tracker {
        fn precedes(&self, a: EntryId, b: EntryId) -> bool {
            (self.weights[&a], a) < (self.weights[&b], b)
        }

        fn on_swap(&mut self, a: EntryId, slot_a: usize, b: EntryId, slot_b: usize) {
            self.positions.insert(a, slot_a);
            self.positions.insert(b, slot_b);
        }

        fn on_move(&mut self, id: EntryId, slot: usize) {
            self.positions.insert(id, slot);
        }
    }

    #[test]
    fn test_push_and_pop_in_order() {
        let mut tracker = Tracker::default();
        let mut heap = SlotHeap::new();
        for (seq, w) in [9, 4, 7, 1, 8, 2, 6].into_iter().enumerate() {
            let id = tracker.add(seq as u64, w);
            heap.push_slot(id, &mut tracker);
            tracker.check(&heap);
        }

        let mut popped = Vec::new();
        while let Ok(id) = heap.pop_top(&mut tracker) {
            tracker.check(&heap);
            popped.push(tracker.weights[&id]);
        }
        assert_eq!(popped, vec![1, 2, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn test_heapify_sets_positions() {
        let mut tracker = Tracker::default();
        let ids: Vec<_> = [5, 3, 8, 1, 9, 2, 7, 4]
            .into_iter()
            .enumerate()
            .map(|(seq, w)| tracker.add(seq as u64, w))
            .collect();
        let heap = SlotHeap::heapify(ids, &mut tracker);
        tracker.check(&heap);
        assert_eq!(heap.peek_top().map(|id| tracker.weights[&id]), Some(1));
    }

    #[test]
    fn test_remove_at_repairs_upwards() {
        // The last element is smaller than the parent of the vacated slot,
        // so a downward-only repair would leave the heap broken.
        let mut tracker = Tracker::default();
        let ids: Vec<_> = [1, 10, 2, 11, 12, 3, 4]
            .into_iter()
            .enumerate()
            .map(|(seq, w)| tracker.add(seq as u64, w))
            .collect();
        let mut heap = SlotHeap::heapify(ids, &mut tracker);
        tracker.check(&heap);

        let removed = heap.remove_at(3, &mut tracker).unwrap();
        assert_eq!(tracker.weights[&removed], 11);
        tracker.check(&heap);
        assert_eq!(heap.slot(1).map(|id| tracker.weights[&id]), Some(4));
    }

    #[test]
    fn test_remove_last_slot_just_shrinks() {
        let mut tracker = Tracker::default();
        let mut heap = SlotHeap::new();
        for (seq, w) in [1, 2, 3].into_iter().enumerate() {
            let id = tracker.add(seq as u64, w);
            heap.push_slot(id, &mut tracker);
        }
        let removed = heap.remove_at(2, &mut tracker).unwrap();
        assert_eq!(tracker.weights[&removed], 3);
        assert_eq!(heap.len(), 2);
        tracker.check(&heap);
    }

    #[test]
    fn test_errors_on_empty_and_out_of_range() {
        let mut tracker = Tracker::default();
        let mut heap = SlotHeap::new();
        assert!(matches!(heap.pop_top(&mut tracker), Err(Error::Empty)));
        assert!(matches!(
            heap.remove_at(0, &mut tracker),
            Err(Error::SlotOutOfRange { slot: 0, len: 0 })
        ));
        assert_eq!(heap.peek_top(), None);
        assert!(heap.is_empty());
    }
}
