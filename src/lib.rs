//! A headless windowing and recycling engine for on-demand lists.
//!
//! Given a viewport and an external item producer, [`LazyList`] keeps only the
//! indices near the current scroll position materialized: it maps scroll
//! positions onto slot ranges, caps how many items exist at once with a FIFO
//! eviction policy that never touches visible or in-flight items, and parks
//! evicted payloads in a bounded recycle cache so that scrolling back is
//! cheap.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size and scroll offset (pre-debounced, or via [`Controller`])
//! - an item producer that completes requests through [`LazyList::resolve`]
//! - rendering of attached payloads via [`LazyList::for_each_mounted`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod error;
mod eviction;
mod list;
mod options;
mod range;
mod recycle;
mod storage;
mod tracker;
mod types;


pub use controller::Controller;
pub use error::ConfigError;
pub use list::LazyList;
pub use options::{GenerateCallback, LazyListOptions, OnChangeCallback};
pub use range::visible_slots;
pub use types::{GenerationRequest, MountedItem, Resolution, SlotRange, Viewport};
