use crate::{ConfigError, LazyList, LazyListOptions};

/// Default quiet window before a signal burst triggers a pass, in ms.
const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// A framework-neutral driver that wraps a [`LazyList`] and turns raw viewport
/// signals into debounced windowing passes.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - [`Self::on_scroll`] / [`Self::on_viewport_size`] when UI events occur
/// - [`Self::tick`] each frame/timer tick
///
/// Geometry is recorded immediately, but [`LazyList::invalidate`] only runs
/// once no further signal has arrived for the debounce window, so a fast
/// scroll burst coalesces into a single pass. Each tick also applies the
/// deferred eviction cleanup left over from the previous pass, which keeps
/// items that stayed relevant across consecutive bursts attached.
pub struct Controller<T> {
    list: LazyList<T>,
    debounce_ms: u64,
    last_signal_ms: Option<u64>,
}

impl<T> Controller<T> {
    pub fn new(options: LazyListOptions<T>) -> Result<Self, ConfigError> {
        Ok(Self::from_list(LazyList::new(options)?))
    }

    pub fn from_list(list: LazyList<T>) -> Self {
        Self {
            list,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            last_signal_ms: None,
        }
    }

    pub fn list(&self) -> &LazyList<T> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut LazyList<T> {
        &mut self.list
    }

    pub fn into_list(self) -> LazyList<T> {
        self.list
    }

    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    pub fn set_debounce_ms(&mut self, debounce_ms: u64) {
        self.debounce_ms = debounce_ms;
    }

    /// Whether a signal is waiting for its quiet window to elapse.
    pub fn pass_pending(&self) -> bool {
        self.last_signal_ms.is_some()
    }

    /// Call this when the UI reports a scroll offset change (e.g. wheel/drag).
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.list.set_scroll_offset(scroll_offset);
        self.last_signal_ms = Some(now_ms);
    }

    /// Call this when the UI reports a viewport resize.
    pub fn on_viewport_size(&mut self, viewport_size: u32, now_ms: u64) {
        self.list.set_viewport_size(viewport_size);
        self.last_signal_ms = Some(now_ms);
    }

    /// Advances the controller.
    ///
    /// Applies deferred eviction cleanup from the previous pass, then runs a
    /// windowing pass if the last signal burst has gone quiet. Safe to call
    /// repeatedly; returns `true` when a pass ran.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.list.flush_evictions();

        let Some(last) = self.last_signal_ms else {
            return false;
        };
        if now_ms.saturating_sub(last) < self.debounce_ms {
            return false;
        }
        self.last_signal_ms = None;
        self.list.invalidate();
        true
    }

    /// Runs a pass immediately, bypassing the debounce window. Used for the
    /// initial load, where waiting out the window would show a blank list.
    pub fn invalidate_now(&mut self) {
        self.last_signal_ms = None;
        self.list.batch_update(|list| {
            list.flush_evictions();
            list.invalidate();
        });
    }

    /// Reloads the wrapped engine and drops any pending debounce.
    pub fn reload(&mut self) {
        self.last_signal_ms = None;
        self.list.reload();
    }
}

impl<T: Clone> Clone for Controller<T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            debounce_ms: self.debounce_ms,
            last_signal_ms: self.last_signal_ms,
        }
    }
}

impl<T> core::fmt::Debug for Controller<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("list", &self.list)
            .field("debounce_ms", &self.debounce_ms)
            .field("last_signal_ms", &self.last_signal_ms)
            .finish()
    }
}
