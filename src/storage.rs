#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type IndexSet = HashSet<usize>;
#[cfg(not(feature = "std"))]
pub(crate) type IndexSet = BTreeSet<usize>;

#[cfg(feature = "std")]
pub(crate) type IndexMap<T> = HashMap<usize, T>;
#[cfg(not(feature = "std"))]
pub(crate) type IndexMap<T> = BTreeMap<usize, T>;
