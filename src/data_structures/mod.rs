pub mod entry;
pub mod indexed_priority_queue;
pub mod order;
pub mod slot_heap;

pub use entry::{Entry, EntryId};
pub use indexed_priority_queue::IndexedPriorityQueue;
pub use order::{Comparator, Custom, Order};
pub use slot_heap::{SlotHeap, SlotObserver};
