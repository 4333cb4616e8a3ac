use std::fmt;

/// Opaque identifier of an entry inside a queue
///
/// Identifiers are handed out from a monotonically increasing counter and are
/// never reused by the queue that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

impl EntryId {
    /// Returns the insertion sequence this identifier was created from
    pub fn sequence(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single item stored in an indexed priority queue
///
/// Entries are never mutated in place. A weight change is a removal followed by
/// a fresh insertion, which also assigns a fresh sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, W, V> {
    key: K,
    weight: W,
    payload: V,
    sequence: u64,
}

impl<K, W, V> Entry<K, W, V> {
    pub(crate) fn new(key: K, weight: W, payload: V, sequence: u64) -> Self {
        Entry {
            key,
            weight,
            payload,
            sequence,
        }
    }

    /// The caller-supplied key
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The weight the entry is ordered by
    pub fn weight(&self) -> &W {
        &self.weight
    }

    /// The opaque payload
    pub fn payload(&self) -> &V {
        &self.payload
    }

    /// Insertion sequence, used to break ties between equal weights
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) fn id(&self) -> EntryId {
        EntryId(self.sequence)
    }

    /// Consumes the entry, returning `(key, weight, payload)`
    pub fn into_parts(self) -> (K, W, V) {
        (self.key, self.weight, self.payload)
    }
}
