//! Pooled scratch state for concurrent scans.
//!
//! Each scan needs a private "already reported" set sized to the dictionary.
//! Allocating one per call would dominate short scans, so finished sets are
//! kept in a stack and handed out again. A [`PoolGuard`] owns its set for the
//! length of one call and puts it back, cleared, when dropped, which covers
//! early returns and unwinding as well as normal completion.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

use crate::automaton::SparseSet;

/// A stack of reusable scratch sets with a fixed capacity.
pub struct ScratchPool {
    stack: Mutex<Vec<SparseSet>>,
    capacity: usize,
}

impl std::fmt::Debug for ScratchPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchPool")
            .field("capacity", &self.capacity)
            .field("idle", &self.idle())
            .finish()
    }
}

impl ScratchPool {
    /// Create an empty pool whose sets hold ids in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Take a scratch set, allocating a fresh one only if none is idle.
    ///
    /// The stack lock is held just for the pop, so the pool never holds more
    /// sets than were ever in use at the same time.
    pub fn get(&self) -> PoolGuard<'_> {
        let recycled = self.stack.lock().pop();
        let scratch = recycled.unwrap_or_else(|| SparseSet::new(self.capacity));
        debug_assert!(scratch.is_empty());
        PoolGuard {
            pool: self,
            scratch,
        }
    }

    fn put(&self, mut scratch: SparseSet) {
        scratch.clear();
        self.stack.lock().push(scratch);
    }

    /// Number of sets currently waiting in the pool.
    pub fn idle(&self) -> usize {
        self.stack.lock().len()
    }
}

/// Exclusive use of one scratch set; returns it to the pool on drop.
pub struct PoolGuard<'a> {
    pool: &'a ScratchPool,
    scratch: SparseSet,
}

impl Deref for PoolGuard<'_> {
    type Target = SparseSet;

    fn deref(&self) -> &SparseSet {
        &self.scratch
    }
}

impl DerefMut for PoolGuard<'_> {
    fn deref_mut(&mut self) -> &mut SparseSet {
        &mut self.scratch
    }
}

impl Drop for PoolGuard<'_> {
    fn drop(&mut self) {
        let scratch = std::mem::take(&mut self.scratch);
        self.pool.put(scratch);
    }
}
