use alloc::collections::{BTreeMap, VecDeque};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::eviction::select_for_eviction;
use crate::range::visible_slots;
use crate::recycle::RecycleCache;
use crate::tracker::MaterializationTracker;
use crate::{
    ConfigError, GenerationRequest, LazyListOptions, MountedItem, Resolution, SlotRange, Viewport,
};

/// A headless windowing and recycling engine for on-demand lists.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects. The "visual surface" is its own slot map
///   of attached payloads, which adapters read via zero-allocation iteration
///   ([`Self::for_each_mounted`]) and mirror into their UI.
/// - Your adapter drives it by providing viewport geometry and calling
///   [`Self::invalidate`] (pre-debounced, or through [`crate::Controller`]).
/// - Item production is asynchronous and pull-based: the engine issues
///   [`GenerationRequest`]s through the configured producer and the adapter
///   completes them with [`Self::resolve`], in any order.
///
/// Per pass, the engine keeps at most `element_limit` items materialized,
/// evicting the oldest-wanted off-screen ones into a bounded recycle cache so
/// that scrolling back re-attaches them without another production round trip.
pub struct LazyList<T> {
    options: LazyListOptions<T>,
    viewport_size: u32,
    scroll_offset: u64,
    epoch: u64,
    in_view: SlotRange,
    tracker: MaterializationTracker,
    /// Attached payloads by index; a `BTreeMap` so render iteration ascends.
    slots: BTreeMap<usize, T>,
    recycle: RecycleCache<T>,
    /// Indices evicted logically but not yet detached; drained in order by
    /// [`Self::flush_evictions`].
    cleanup: VecDeque<usize>,
    last_occupied: Option<usize>,
    end_reached: bool,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<T> LazyList<T> {
    /// Creates a new engine from options.
    ///
    /// Fails fast on configuration faults; see [`ConfigError`].
    pub fn new(options: LazyListOptions<T>) -> Result<Self, ConfigError> {
        options.validate()?;
        ldebug!(
            item_size = options.item_size,
            element_limit = options.element_limit,
            cache_size = options.cache_size,
            "LazyList::new"
        );
        let recycle = RecycleCache::new(options.cache_size);
        Ok(Self {
            options,
            viewport_size: 0,
            scroll_offset: 0,
            epoch: 0,
            in_view: SlotRange::default(),
            tracker: MaterializationTracker::new(),
            slots: BTreeMap::new(),
            recycle,
            cleanup: VecDeque::new(),
            last_occupied: None,
            end_reached: false,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    pub fn options(&self) -> &LazyListOptions<T> {
        &self.options
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&LazyList<T>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// Recommended for adapters that update geometry and run a pass together
    /// when the callback drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// A lightweight snapshot of the current viewport geometry.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            size: self.viewport_size,
            offset: self.scroll_offset,
        }
    }

    /// Records a new viewport size. No pass runs until [`Self::invalidate`].
    pub fn set_viewport_size(&mut self, size: u32) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.notify();
    }

    /// Records a new scroll offset. No pass runs until [`Self::invalidate`].
    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.notify();
    }

    pub fn set_viewport_and_scroll(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.batch_update(|list| {
            list.set_viewport_size(viewport_size);
            list.set_scroll_offset(scroll_offset);
        });
    }

    /// The in-view range computed by the most recent pass.
    pub fn in_view(&self) -> SlotRange {
        self.in_view
    }

    /// The generation counter; bumped by [`Self::reload`].
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_materialized(&self, index: usize) -> bool {
        self.tracker.is_materialized(index)
    }

    pub fn is_in_flight(&self, index: usize) -> bool {
        self.tracker.is_in_flight(index)
    }

    /// Number of indices currently materialized (attached or awaiting their
    /// payload).
    pub fn materialized_len(&self) -> usize {
        self.tracker.materialized_len()
    }

    /// Number of requests issued but not yet resolved.
    pub fn in_flight_len(&self) -> usize {
        self.tracker.in_flight_len()
    }

    /// Number of payloads currently attached.
    pub fn mounted_len(&self) -> usize {
        self.slots.len()
    }

    /// Number of eviction candidates currently queued.
    pub fn pending_len(&self) -> usize {
        self.tracker.queue_len()
    }

    pub fn recycle_len(&self) -> usize {
        self.recycle.len()
    }

    /// The attached payload for `index`, if any.
    pub fn payload(&self, index: usize) -> Option<&T> {
        self.slots.get(&index)
    }

    /// Highest index attached in the current epoch.
    pub fn last_occupied(&self) -> Option<usize> {
        self.last_occupied
    }

    /// Whether the item at `max_index` has been attached, i.e. the exact end
    /// of the list is known.
    pub fn end_reached(&self) -> bool {
        self.end_reached
    }

    /// Offset for a trailing spacer that keeps scrollbar proportions honest:
    /// one slot past the highest attached index, plus the threshold margin.
    /// Zero while nothing has been attached this epoch.
    pub fn spacer_offset(&self) -> u64 {
        let Some(last) = self.last_occupied else {
            return 0;
        };
        let item = self.options.item_size as u64;
        (last as u64)
            .saturating_add(1)
            .saturating_mul(item)
            .saturating_add(self.options.threshold_px() as u64)
    }

    /// Visits every attached item in ascending index order, without
    /// allocating.
    pub fn for_each_mounted(&self, mut f: impl FnMut(MountedItem<'_, T>)) {
        let item = self.options.item_size as u64;
        for (&index, payload) in &self.slots {
            f(MountedItem {
                index,
                start: (index as u64).saturating_mul(item),
                payload,
            });
        }
    }

    /// Collects the attached indices into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_mounted`]; adapters that
    /// care about allocations should reuse `out` across frames.
    pub fn collect_mounted_indexes(&self, out: &mut Vec<usize>) {
        out.clear();
        self.for_each_mounted(|item| out.push(item.index));
    }

    /// Re-runs the windowing pass against the current viewport state.
    ///
    /// Synchronous and idempotent for a stable viewport: the in-view range is
    /// recomputed wholesale, missing indices are requested (via recycle cache
    /// or producer), and, when an element limit is configured, the
    /// oldest-wanted off-screen indices are evicted. Logical eviction happens
    /// here; the physical detach runs later in [`Self::flush_evictions`].
    pub fn invalidate(&mut self) {
        let range = self.clamp_to_bounds(visible_slots(
            self.scroll_offset,
            self.viewport_size,
            self.options.threshold_px(),
            self.options.item_size,
        ));
        ltrace!(
            start = range.start,
            end = range.end,
            offset = self.scroll_offset,
            "invalidate"
        );
        self.in_view = range;

        // Wanted-but-absent indices, captured before marking so the loop below
        // still sees them as missing.
        let mut missing: Vec<usize> = Vec::new();
        for index in range.indices() {
            if !self.tracker.is_materialized(index) {
                missing.push(index);
            }
        }
        for index in range.indices() {
            self.tracker.mark_wanted(index);
        }

        if let Some(limit) = self.options.element_limit {
            let first_new = self.cleanup.len();
            let cleanup = &mut self.cleanup;
            select_for_eviction(&mut self.tracker, range, limit, |index| {
                cleanup.push_back(index);
            });
            for slot in first_new..self.cleanup.len() {
                self.tracker.forget(self.cleanup[slot]);
            }
            if self.cleanup.len() > first_new {
                ldebug!(scheduled = self.cleanup.len() - first_new, "eviction");
            }
        }

        for index in missing {
            if self.tracker.is_in_flight(index) {
                continue;
            }
            if self.slots.contains_key(&index) {
                // Evicted but not yet flushed; the payload is still attached
                // and the pending cleanup will skip it now that the index is
                // materialized again.
                continue;
            }
            if let Some(payload) = self.recycle.get(index) {
                ltrace!(index, "recycle hit");
                self.attach(index, payload);
                continue;
            }
            self.tracker.mark_in_flight(index);
            (self.options.generate)(GenerationRequest {
                index,
                epoch: self.epoch,
            });
        }

        self.notify();
    }

    /// Completes a production request.
    ///
    /// Requests may resolve in any order. A request from before the latest
    /// [`Self::reload`] is ignored wholesale; one whose index has scrolled out
    /// of view drops the payload but becomes requestable again; `None` means
    /// "no item at this index" and attaches nothing.
    ///
    /// A request that is never resolved leaves its index permanently in
    /// flight, and therefore permanently ineligible for eviction. That leak is
    /// an accepted limitation of this design; producers are expected to
    /// always resolve.
    pub fn resolve(&mut self, request: GenerationRequest, payload: Option<T>) -> Resolution {
        let GenerationRequest { index, epoch } = request;
        if epoch != self.epoch {
            lwarn!(index, epoch, current = self.epoch, "stale resolution ignored");
            return Resolution::Stale;
        }
        self.tracker.clear_in_flight(index);

        if !self.in_view.contains(index) {
            // Scrolled away while the producer was working. Forget the index
            // so a later pass can request it again.
            ltrace!(index, "resolution discarded");
            self.tracker.forget(index);
            self.notify();
            return Resolution::Discarded;
        }

        let Some(payload) = payload else {
            // A hole, not an error. The index stays materialized so it is not
            // re-queried on every pass; eviction eventually forgets it.
            self.notify();
            return Resolution::Empty;
        };

        self.attach(index, payload);
        self.notify();
        Resolution::Mounted
    }

    /// Applies the deferred side of eviction: detaches payloads and parks them
    /// in the recycle cache. Call once per tick, after the synchronous pass.
    ///
    /// An index that was marked wanted again since its eviction is left
    /// attached. Returns the number of payloads detached.
    pub fn flush_evictions(&mut self) -> usize {
        let mut detached = 0usize;
        while let Some(index) = self.cleanup.pop_front() {
            if self.tracker.is_materialized(index) {
                continue;
            }
            if let Some(payload) = self.slots.remove(&index) {
                self.recycle.put(index, payload);
                detached += 1;
            }
        }
        if detached > 0 {
            ldebug!(detached, "flush_evictions");
            self.notify();
        }
        detached
    }

    /// Detaches everything, clears the logical state, starts a new epoch and
    /// runs a fresh pass.
    ///
    /// In-flight resolutions from before the reload resolve as
    /// [`Resolution::Stale`]. The recycle cache survives a reload; call
    /// [`Self::clear_recycle_cache`] first when the underlying data changed in
    /// a way that invalidates cached payloads.
    pub fn reload(&mut self) {
        self.batch_update(|list| {
            // Park already-evicted payloads before tearing the rest down.
            list.flush_evictions();
            ldebug!(
                materialized = list.tracker.materialized_len(),
                epoch = list.epoch,
                "reload"
            );
            for index in list.tracker.all_materialized() {
                list.slots.remove(&index);
            }
            debug_assert!(list.slots.is_empty(), "slot map out of sync with tracker");
            list.tracker.clear();
            list.cleanup.clear();
            list.in_view = SlotRange::default();
            list.last_occupied = None;
            list.end_reached = false;
            list.epoch = list.epoch.wrapping_add(1);
            list.invalidate();
        });
    }

    /// Drops every recycled payload.
    pub fn clear_recycle_cache(&mut self) {
        self.recycle.clear();
        self.notify();
    }

    fn clamp_to_bounds(&self, mut range: SlotRange) -> SlotRange {
        if let Some(max) = self.options.max_index {
            range.end = range.end.min(max.saturating_add(1));
            range.start = range.start.min(range.end);
        }
        range
    }

    fn attach(&mut self, index: usize, payload: T) {
        self.slots.insert(index, payload);
        if self.last_occupied.map_or(true, |last| index > last) {
            self.last_occupied = Some(index);
        }
        if self.options.max_index == Some(index) {
            self.end_reached = true;
        }
    }
}

impl<T: Clone> Clone for LazyList<T> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            viewport_size: self.viewport_size,
            scroll_offset: self.scroll_offset,
            epoch: self.epoch,
            in_view: self.in_view,
            tracker: self.tracker.clone(),
            slots: self.slots.clone(),
            recycle: self.recycle.clone(),
            cleanup: self.cleanup.clone(),
            last_occupied: self.last_occupied,
            end_reached: self.end_reached,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }
}

impl<T> core::fmt::Debug for LazyList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyList")
            .field("options", &self.options)
            .field("viewport", &self.viewport())
            .field("epoch", &self.epoch)
            .field("in_view", &self.in_view)
            .field("materialized", &self.tracker.materialized_len())
            .field("mounted", &self.slots.len())
            .field("in_flight", &self.tracker.in_flight_len())
            .field("recycled", &self.recycle.len())
            .finish_non_exhaustive()
    }
}
