/// A contiguous run of slot indices, `end` exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl SlotRange {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// The indices covered by this range, ascending.
    pub fn indices(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }
}

/// A lightweight snapshot of the current viewport geometry.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Visible size along the scroll axis, in pixels.
    pub size: u32,
    /// Scroll offset from the top of the list, in pixels.
    pub offset: u64,
}

/// A pending production request handed to the `generate` callback.
///
/// The producer completes it by passing it back to [`crate::LazyList::resolve`]
/// together with the payload (or `None` for "no item at this index").
///
/// This type is deliberately not `Clone`: `resolve` consumes the request, so
/// each one resolves at most once. Requests are tagged with the engine epoch at
/// issue time; a request outlives a [`crate::LazyList::reload`] only as a stale
/// ticket that `resolve` ignores.
#[derive(Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub(crate) index: usize,
    pub(crate) epoch: u64,
}

impl GenerationRequest {
    /// The slot index to produce an item for.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A currently attached item, yielded by [`crate::LazyList::for_each_mounted`].
#[derive(Debug)]
pub struct MountedItem<'a, T> {
    pub index: usize,
    /// Start offset in the scroll axis (`index * item_size`).
    pub start: u64,
    pub payload: &'a T,
}

impl<T> Clone for MountedItem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MountedItem<'_, T> {}

/// The outcome of completing a [`GenerationRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    /// The payload was attached at its slot.
    Mounted,
    /// The producer reported "no item at this index"; nothing was attached.
    Empty,
    /// The index scrolled out of view while the producer was working; the
    /// payload was dropped and the index can be requested again later.
    Discarded,
    /// The request predates the latest reload and was ignored entirely.
    Stale,
}
