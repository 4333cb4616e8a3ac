use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;

use log::{debug, trace};

use crate::data_structures::entry::{Entry, EntryId};
use crate::data_structures::order::{Comparator, Custom, Order};
use crate::data_structures::slot_heap::{SlotHeap, SlotObserver};
use crate::{Error, Result};

/// Entry storage plus the position index, handed to the heap engine as its observer
struct EntryStore<K, W, V, C> {
    entries: HashMap<EntryId, Entry<K, W, V>>,
    positions: HashMap<EntryId, usize>,
    order: C,
}

impl<K, W, V, C: Comparator<W>> SlotObserver for EntryStore<K, W, V, C> {
    fn precedes(&self, a: EntryId, b: EntryId) -> bool {
        let (a, b) = (&self.entries[&a], &self.entries[&b]);
        match self.order.compare(a.weight(), b.weight()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => a.sequence() < b.sequence(),
        }
    }

    fn on_swap(&mut self, a: EntryId, slot_a: usize, b: EntryId, slot_b: usize) {
        self.positions.insert(a, slot_a);
        self.positions.insert(b, slot_b);
    }

    fn on_move(&mut self, id: EntryId, slot: usize) {
        self.positions.insert(id, slot);
    }
}

/// A priority queue whose entries are addressable by an external key
///
/// Insertion, removal of the top, removal by key and weight updates all run
/// in O(log n); lookups by key and peeking at the top are O(1). Entries with
/// equal weights leave the queue in insertion order.
///
/// # Example
///
/// ```rust
/// use indexed_pq::IndexedPriorityQueue;
///
/// let mut queue = IndexedPriorityQueue::new();
/// queue.insert("a", 5, ()).unwrap();
/// queue.insert("b", 3, ()).unwrap();
/// queue.insert("c", 3, ()).unwrap();
///
/// assert_eq!(queue.peek_top().map(|e| *e.key()), Some("b"));
/// assert_eq!(queue.remove_by_key(&"a").map(|e| e.into_parts()), Some(("a", 5, ())));
/// assert_eq!(queue.remove_top().map(|e| *e.key()), Some("b"));
/// assert_eq!(queue.remove_top().map(|e| *e.key()), Some("c"));
/// assert!(queue.remove_top().is_none());
/// ```
pub struct IndexedPriorityQueue<K, W, V, C = Order> {
    heap: SlotHeap,
    store: EntryStore<K, W, V, C>,
    keys: HashMap<K, EntryId>,
    next_sequence: u64,
}

impl<K, W, V> IndexedPriorityQueue<K, W, V, Order>
where
    K: Eq + Hash + Clone,
    W: Ord,
{
    /// Creates an empty queue where the smallest weight is the top
    pub fn new() -> Self {
        Self::with_order(Order::Minimum)
    }
}

impl<K, W, V> Default for IndexedPriorityQueue<K, W, V, Order>
where
    K: Eq + Hash + Clone,
    W: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, W, V, F> IndexedPriorityQueue<K, W, V, Custom<F>>
where
    K: Eq + Hash + Clone,
    F: Fn(&W, &W) -> Ordering,
{
    /// Creates an empty queue ordered by a caller-supplied total order
    pub fn with_comparator(compare: F) -> Self {
        Self::with_order(Custom(compare))
    }
}

impl<K, W, V, C> IndexedPriorityQueue<K, W, V, C>
where
    K: Eq + Hash + Clone,
    C: Comparator<W>,
{
    /// Creates an empty queue with the given ordering
    pub fn with_order(order: C) -> Self {
        IndexedPriorityQueue {
            heap: SlotHeap::new(),
            store: EntryStore {
                entries: HashMap::new(),
                positions: HashMap::new(),
                order,
            },
            keys: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Reserves room for at least `capacity` entries
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        let additional = capacity.saturating_sub(self.len());
        self.heap.reserve(additional);
        self.store.entries.reserve(additional);
        self.store.positions.reserve(additional);
        self.keys.reserve(additional);
        self
    }

    /// Builds a queue from `(key, weight, payload)` triples in O(n)
    ///
    /// Sequences follow iteration order, so equal weights still leave the
    /// queue in the order they were supplied.
    ///
    /// # Errors
    /// Returns `Error::DuplicateKey` if a key occurs more than once. Nothing is
    /// kept in that case.
    pub fn from_entries<I>(items: I, order: C) -> Result<Self>
    where
        I: IntoIterator<Item = (K, W, V)>,
    {
        let items = items.into_iter();
        let mut queue = Self::with_order(order).with_capacity(items.size_hint().0);
        let mut ids = Vec::with_capacity(items.size_hint().0);

        for (key, weight, payload) in items {
            if queue.keys.contains_key(&key) {
                return Err(Error::DuplicateKey);
            }
            ids.push(queue.create_entry(key, weight, payload));
        }

        queue.heap = SlotHeap::heapify(ids, &mut queue.store);
        debug!("built indexed queue from {} entries", queue.len());
        Ok(queue)
    }

    /// Returns the configured ordering
    pub fn order(&self) -> &C {
        &self.store.order
    }

    /// Returns the number of entries in the queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the queue holds no entries
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true if an entry with `key` is present
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains_key(key)
    }

    /// Returns the entry stored under `key`
    pub fn get(&self, key: &K) -> Option<&Entry<K, W, V>> {
        let id = self.keys.get(key)?;
        self.store.entries.get(id)
    }

    /// Returns the top entry without removing it
    pub fn peek_top(&self) -> Option<&Entry<K, W, V>> {
        let id = self.heap.peek_top()?;
        self.store.entries.get(&id)
    }

    /// Inserts a new entry
    ///
    /// # Errors
    /// Returns `Error::DuplicateKey` if `key` is already present. The queue is
    /// left untouched; existing entries are never overwritten.
    pub fn insert(&mut self, key: K, weight: W, payload: V) -> Result<()> {
        if self.keys.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }
        let id = self.create_entry(key, weight, payload);
        self.heap.push_slot(id, &mut self.store);
        trace!("inserted entry {} (size {})", id, self.len());
        Ok(())
    }

    /// Removes and returns the top entry
    pub fn remove_top(&mut self) -> Option<Entry<K, W, V>> {
        let id = match self.heap.pop_top(&mut self.store) {
            Ok(id) => id,
            Err(Error::Empty) => return None,
            Err(err) => unreachable!("heap engine failed to pop: {err}"),
        };
        let entry = self.evict(id);
        trace!("removed top entry {} (size {})", id, self.len());
        Some(entry)
    }

    /// Removes and returns the entry stored under `key`
    pub fn remove_by_key(&mut self, key: &K) -> Option<Entry<K, W, V>> {
        let id = *self.keys.get(key)?;
        let slot = self.store.positions[&id];
        match self.heap.remove_at(slot, &mut self.store) {
            Ok(removed) => debug_assert_eq!(removed, id, "position index out of sync"),
            Err(err) => unreachable!("position index out of sync with heap: {err}"),
        }
        let entry = self.evict(id);
        trace!("removed entry {} from slot {} (size {})", id, slot, self.len());
        Some(entry)
    }

    /// Gives the entry under `key` a new weight, returning the old one
    ///
    /// The entry is removed and reinserted, so it receives a fresh sequence and
    /// moves behind any entries that already share the new weight.
    ///
    /// # Errors
    /// Returns `Error::KeyNotFound` if `key` is absent.
    pub fn update_weight(&mut self, key: &K, weight: W) -> Result<W> {
        let (key, old_weight, payload) = self
            .remove_by_key(key)
            .ok_or(Error::KeyNotFound)?
            .into_parts();
        self.insert(key, weight, payload)?;
        Ok(old_weight)
    }

    /// Removes every entry
    ///
    /// Sequences keep counting, so identifiers handed out before the clear are
    /// never reused.
    pub fn clear(&mut self) {
        debug!("clearing indexed queue with {} entries", self.len());
        self.heap.clear();
        self.store.entries.clear();
        self.store.positions.clear();
        self.keys.clear();
    }

    /// Iterates over all entries in heap order, which is not sorted
    pub fn iter(&self) -> impl Iterator<Item = &Entry<K, W, V>> + '_ {
        self.heap
            .as_slice()
            .iter()
            .filter_map(move |id| self.store.entries.get(id))
    }

    /// Removes entries from the top until the queue is empty
    pub fn drain_sorted(&mut self) -> impl Iterator<Item = Entry<K, W, V>> + '_ {
        std::iter::from_fn(move || self.remove_top())
    }

    /// Consumes the queue, returning its entries in removal order
    pub fn into_sorted_vec(mut self) -> Vec<Entry<K, W, V>> {
        let mut sorted = Vec::with_capacity(self.len());
        sorted.extend(self.drain_sorted());
        sorted
    }

    /// Checks the heap order, the position index and the key index
    ///
    /// This walks the whole queue and is meant for tests and debugging.
    ///
    /// # Errors
    /// Returns `Error::InvariantViolation` describing the first broken invariant.
    pub fn validate(&self) -> Result<()> {
        let slots = self.heap.as_slice();
        let counts = [
            self.store.entries.len(),
            self.store.positions.len(),
            self.keys.len(),
        ];
        if counts.iter().any(|&n| n != slots.len()) {
            return Err(Error::InvariantViolation(format!(
                "heap holds {} slots but entries/positions/keys hold {:?}",
                slots.len(),
                counts
            )));
        }

        for (slot, &id) in slots.iter().enumerate() {
            let entry = self.store.entries.get(&id).ok_or_else(|| {
                Error::InvariantViolation(format!("slot {} holds unknown entry {}", slot, id))
            })?;
            if self.store.positions.get(&id) != Some(&slot) {
                return Err(Error::InvariantViolation(format!(
                    "entry {} sits at slot {} but is indexed at {:?}",
                    id,
                    slot,
                    self.store.positions.get(&id)
                )));
            }
            if self.keys.get(entry.key()) != Some(&id) {
                return Err(Error::InvariantViolation(format!(
                    "key of entry {} does not map back to it",
                    id
                )));
            }
            if slot > 0 {
                let parent = slots[(slot - 1) / 2];
                if self.store.precedes(id, parent) {
                    return Err(Error::InvariantViolation(format!(
                        "entry {} at slot {} precedes its parent {}",
                        id, slot, parent
                    )));
                }
            }
        }
        Ok(())
    }

    fn create_entry(&mut self, key: K, weight: W, payload: V) -> EntryId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let entry = Entry::new(key.clone(), weight, payload, sequence);
        let id = entry.id();
        self.keys.insert(key, id);
        self.store.entries.insert(id, entry);
        id
    }

    /// Drops `id` from the store and both indices once the heap has let go of it
    fn evict(&mut self, id: EntryId) -> Entry<K, W, V> {
        self.store.positions.remove(&id);
        let entry = match self.store.entries.remove(&id) {
            Some(entry) => entry,
            None => unreachable!("heap held entry {id} missing from the store"),
        };
        self.keys.remove(entry.key());
        entry
    }
}

impl<K, W, V, C> Debug for IndexedPriorityQueue<K, W, V, C>
where
    K: Debug,
    W: Debug,
    V: Debug,
    C: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heap: Vec<_> = self
            .heap
            .as_slice()
            .iter()
            .filter_map(|id| self.store.entries.get(id))
            .collect();
        f.debug_struct("IndexedPriorityQueue")
            .field("order", &self.store.order)
            .field("heap", &heap)
            .field("positions", &self.store.positions)
            .field("keys", &self.keys)
            .finish()
    }
}
