use alloc::sync::Arc;

use crate::error::ConfigError;
use crate::list::LazyList;
use crate::types::GenerationRequest;

/// A callback fired when the engine's state changes.
///
/// Mutating operations fire it once at the end (batched); adapters typically
/// schedule a re-render from here.
pub type OnChangeCallback<T> = Arc<dyn Fn(&LazyList<T>) + Send + Sync>;

/// The external item producer.
///
/// The engine calls this with an epoch-tagged request for every index it wants
/// materialized and that neither the recycle cache nor an in-flight request
/// already covers. The producer does its (possibly asynchronous) work and
/// completes by handing the request back to [`LazyList::resolve`] together
/// with the payload, or `None` for "no item at this index".
///
/// Contract:
/// - Each request is resolved at most once (enforced: `resolve` consumes it).
/// - A request that is never resolved pins its index in flight forever, which
///   also makes it permanently ineligible for eviction. The engine has no
///   timeout; see [`LazyList::resolve`].
pub type GenerateCallback = Arc<dyn Fn(GenerationRequest) + Send + Sync>;

/// Configuration for [`LazyList`].
///
/// Immutable for the lifetime of one engine instance, and cheap to clone:
/// callbacks are stored in `Arc`s.
pub struct LazyListOptions<T> {
    /// Fixed slot size along the scroll axis, in pixels. Must be positive.
    pub item_size: u32,

    /// Extra in-view margin past the fold, as a fraction of `item_size`.
    ///
    /// Items within this margin are materialized ahead of time so they are
    /// ready when the user scrolls past the edge. Must be finite and >= 0.
    pub threshold: f32,

    /// Cap on concurrently materialized items. `None` disables eviction.
    pub element_limit: Option<usize>,

    /// Recycle cache capacity. `None` is unbounded, `Some(0)` disables
    /// recycling.
    pub cache_size: Option<usize>,

    /// Inclusive upper bound on valid indices. Indices beyond it are never
    /// requested; the item at `max_index` is the final one, which lets the
    /// trailing spacer settle at the exact end of the list.
    pub max_index: Option<usize>,

    /// The item producer. Required.
    pub generate: GenerateCallback,

    /// Optional callback fired when the engine's state changes.
    pub on_change: Option<OnChangeCallback<T>>,
}

impl<T> LazyListOptions<T> {
    /// Creates options with the required fields and defaults for the rest
    /// (threshold `0.5`, no element limit, unbounded cache, no index bound).
    pub fn new(
        item_size: u32,
        generate: impl Fn(GenerationRequest) + Send + Sync + 'static,
    ) -> Self {
        Self {
            item_size,
            threshold: 0.5,
            element_limit: None,
            cache_size: None,
            max_index: None,
            generate: Arc::new(generate),
            on_change: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_element_limit(mut self, element_limit: Option<usize>) -> Self {
        self.element_limit = element_limit;
        self
    }

    pub fn with_cache_size(mut self, cache_size: Option<usize>) -> Self {
        self.cache_size = cache_size;
        self
    }

    pub fn with_max_index(mut self, max_index: Option<usize>) -> Self {
        self.max_index = max_index;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&LazyList<T>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    /// The threshold margin in pixels, rounded to the nearest pixel.
    pub fn threshold_px(&self) -> u32 {
        (self.item_size as f32 * self.threshold + 0.5) as u32
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.item_size == 0 {
            return Err(ConfigError::ZeroItemSize);
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold,
            });
        }
        Ok(())
    }
}

impl<T> Clone for LazyListOptions<T> {
    fn clone(&self) -> Self {
        Self {
            item_size: self.item_size,
            threshold: self.threshold,
            element_limit: self.element_limit,
            cache_size: self.cache_size,
            max_index: self.max_index,
            generate: Arc::clone(&self.generate),
            on_change: self.on_change.clone(),
        }
    }
}

impl<T> core::fmt::Debug for LazyListOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LazyListOptions")
            .field("item_size", &self.item_size)
            .field("threshold", &self.threshold)
            .field("element_limit", &self.element_limit)
            .field("cache_size", &self.cache_size)
            .field("max_index", &self.max_index)
            .finish_non_exhaustive()
    }
}
