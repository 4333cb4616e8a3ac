//! Indexed Priority Queue
//!
//! A binary-heap priority queue whose entries are addressable by an external key.
//! Besides the usual insert / remove-top, any entry can be looked up or removed
//! by key in O(log n), because the heap engine reports every slot change back to
//! a position index owned by the queue.
//!
//! Entries with equal weights leave the queue in insertion order, and the
//! ordering (minimum, maximum or a caller-supplied comparator) is chosen when the
//! queue is constructed.

pub mod data_structures;

/// Re-export main types for convenient use
pub use data_structures::{
    Comparator, Custom, Entry, EntryId, IndexedPriorityQueue, Order, SlotHeap, SlotObserver,
};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Key is already present in the queue")]
    DuplicateKey,

    #[error("Key not found in the queue")]
    KeyNotFound,

    #[error("Queue is empty")]
    Empty,

    #[error("Slot {slot} out of range for heap of size {len}")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("Heap invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
