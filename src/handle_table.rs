//! Table of allocated performance variable handles.

use crate::tool::PvarHandle;
use std::ops::Range;

/// One allocated variable: its handle and the number of counter elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleEntry {
    /// Handle returned by the tool interface
    pub handle: PvarHandle,
    /// Number of counter elements a read of this handle yields
    pub count: usize,
}

/// Handles indexed by variable enumeration index.
///
/// Entries are appended in index order and never removed. `num_pvars` is the
/// committed watermark: it advances only when a whole enumeration round
/// succeeds, so after a failed round `len()` may exceed `num_pvars()`.
#[derive(Debug, Default, Clone)]
pub struct HandleTable {
    entries: Vec<HandleEntry>,
    num_pvars: usize,
}

impl HandleTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handle has been allocated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of variables covered by the last complete round.
    pub fn num_pvars(&self) -> usize {
        self.num_pvars
    }

    /// Whether every allocated entry belongs to a committed round.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == self.num_pvars
    }

    /// Entry for the variable at `index`, if allocated.
    pub fn get(&self, index: usize) -> Option<&HandleEntry> {
        self.entries.get(index)
    }

    /// All allocated entries in index order.
    pub fn entries(&self) -> &[HandleEntry] {
        &self.entries
    }

    /// Indices still to allocate for a variable count of `current`.
    ///
    /// Starts at `num_pvars` but skips entries a previous, uncommitted round
    /// already allocated.
    pub fn pending(&self, current: usize) -> Range<usize> {
        let start = self.num_pvars.max(self.entries.len());
        start..current.max(start)
    }

    /// Reserve capacity for `total` entries.
    pub fn reserve_for(&mut self, total: usize) {
        self.entries.reserve(total.saturating_sub(self.entries.len()));
    }

    /// Append the entry for the next index.
    pub(crate) fn push(&mut self, entry: HandleEntry) {
        self.entries.push(entry);
    }

    /// Mark all entries up to `count` as one complete round.
    pub(crate) fn commit(&mut self, count: usize) {
        debug_assert_eq!(count, self.entries.len());
        self.num_pvars = count;
    }
}
