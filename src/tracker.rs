use alloc::collections::VecDeque;

use crate::storage::IndexSet;

/// Bookkeeping for which indices are currently materialized, which have a
/// production request in flight, and the order in which indices were first
/// wanted.
///
/// The queue is the eviction candidate source: indices appear in it at most
/// once at a time, oldest-wanted first. The tracker performs no I/O; all side
/// effects are confined to its own sets.
#[derive(Clone, Debug, Default)]
pub(crate) struct MaterializationTracker {
    materialized: IndexSet,
    in_flight: IndexSet,
    queue: VecDeque<usize>,
    queued: IndexSet,
}

impl MaterializationTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_materialized(&self, index: usize) -> bool {
        self.materialized.contains(&index)
    }

    pub(crate) fn is_in_flight(&self, index: usize) -> bool {
        self.in_flight.contains(&index)
    }

    pub(crate) fn materialized_len(&self) -> usize {
        self.materialized.len()
    }

    pub(crate) fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    /// Marks `index` as wanted: inserts it into the materialized set and, if it
    /// is not already queued, appends it to the eviction FIFO. Idempotent.
    pub(crate) fn mark_wanted(&mut self, index: usize) {
        self.materialized.insert(index);
        if self.queued.insert(index) {
            self.queue.push_back(index);
        }
    }

    pub(crate) fn mark_in_flight(&mut self, index: usize) {
        self.in_flight.insert(index);
    }

    /// Returns whether the index was in flight.
    pub(crate) fn clear_in_flight(&mut self, index: usize) -> bool {
        self.in_flight.remove(&index)
    }

    /// Removes `index` from the materialized set only. Queue order is left
    /// untouched: a forgotten index is simply an eviction candidate that is
    /// already queued.
    pub(crate) fn forget(&mut self, index: usize) {
        self.materialized.remove(&index);
    }

    pub(crate) fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Pops the oldest-wanted index off the eviction FIFO.
    pub(crate) fn pop_oldest(&mut self) -> Option<usize> {
        let index = self.queue.pop_front()?;
        self.queued.remove(&index);
        Some(index)
    }

    /// Every materialized index, for bulk teardown on reload.
    pub(crate) fn all_materialized(&self) -> impl Iterator<Item = usize> + '_ {
        self.materialized.iter().copied()
    }

    pub(crate) fn clear(&mut self) {
        self.materialized.clear();
        self.in_flight.clear();
        self.queue.clear();
        self.queued.clear();
    }
}
