use alloc::collections::VecDeque;

use crate::storage::IndexMap;

/// A bounded FIFO store of evicted payloads keyed by slot index.
///
/// A hit removes the entry, so each cached payload is handed back at most once
/// and the same materialized payload can never end up attached twice. When the
/// cache is at capacity, the oldest-inserted entry is aged out first; recency
/// of hits plays no part in the ordering.
#[derive(Clone, Debug)]
pub(crate) struct RecycleCache<T> {
    entries: IndexMap<T>,
    order: VecDeque<usize>,
    capacity: Option<usize>,
}

impl<T> RecycleCache<T> {
    /// `None` means unbounded; `Some(0)` stores nothing.
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: IndexMap::default(),
            order: VecDeque::new(),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes and returns the payload cached for `index`, if any.
    pub(crate) fn get(&mut self, index: usize) -> Option<T> {
        let payload = self.entries.remove(&index)?;
        self.order.retain(|&queued| queued != index);
        Some(payload)
    }

    pub(crate) fn put(&mut self, index: usize, payload: T) {
        if self.capacity == Some(0) {
            return;
        }
        if self.entries.insert(index, payload).is_some() {
            // Replacing an entry refreshes its age.
            self.order.retain(|&queued| queued != index);
        }
        self.order.push_back(index);
        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
