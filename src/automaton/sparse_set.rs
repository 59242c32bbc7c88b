//! Sparse set data structure for O(1) clear operations.
//!
//! Based on: https://research.swtch.com/sparse
//!
//! Used as per-scan scratch state: a scan inserts every pattern id it
//! reports, so membership answers "already reported in this call?" and the
//! dense half holds the reported ids in discovery order. Clearing between
//! calls is a length reset, independent of dictionary size.
//!
//! Tradeoff: requires knowing capacity upfront and uses 2*capacity memory.

/// A sparse set for storing ids up to a known capacity.
#[derive(Clone, Debug, Default)]
pub struct SparseSet {
    /// Number of elements currently in the set.
    len: usize,
    /// Dense array containing the IDs in insertion order.
    dense: Vec<u32>,
    /// Sparse array mapping ID -> position in dense.
    /// An ID is in the set iff sparse[id] < len && dense[sparse[id]] == id.
    sparse: Vec<u32>,
}

impl SparseSet {
    /// Create a new sparse set with the given capacity.
    ///
    /// Elements must be in range [0, capacity).
    #[inline]
    pub fn new(capacity: usize) -> Self {
        SparseSet {
            len: 0,
            dense: vec![0; capacity],
            sparse: vec![0; capacity],
        }
    }

    /// Returns the capacity of this set.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.dense.len()
    }

    /// Returns the number of elements in this set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an ID into the set. Returns true if the ID was not already present.
    ///
    /// Panics if id >= capacity.
    #[inline]
    pub fn insert(&mut self, id: u32) -> bool {
        if self.contains(id) {
            return false;
        }
        debug_assert!(
            self.len < self.capacity(),
            "SparseSet overflow: len={}, capacity={}",
            self.len,
            self.capacity()
        );
        self.dense[self.len] = id;
        self.sparse[id as usize] = self.len as u32;
        self.len += 1;
        true
    }

    /// Returns true if the set contains the given ID.
    ///
    /// Panics if id >= capacity.
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        let idx = self.sparse[id as usize] as usize;
        idx < self.len && self.dense[idx] == id
    }

    /// Clear the set in O(1) time.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The elements in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.dense[..self.len]
    }

    /// Iterate over elements in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.as_slice().iter().copied()
    }
}
