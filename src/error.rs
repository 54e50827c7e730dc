use thiserror::Error;

/// Errors raised when constructing a [`crate::LazyList`] from invalid options.
///
/// These are configuration faults: they are reported synchronously by
/// [`crate::LazyList::new`] and never retried. Everything else the engine
/// encounters at runtime (out-of-range indices, stale completions, resource
/// pressure) is absorbed internally and is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// `item_size` is the slot granularity of the whole engine and must be
    /// positive.
    #[error("item_size must be greater than zero")]
    ZeroItemSize,

    /// `threshold` is a fraction of `item_size` and must be finite and >= 0.
    #[error("threshold must be a finite fraction >= 0, got {value}")]
    InvalidThreshold {
        /// The rejected fraction.
        value: f32,
    },
}
