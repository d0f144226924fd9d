//! Fx hash map and set aliases.
//!
//! The Fx hash function has a fixed seed, so iteration order for a given
//! insertion sequence is the same on every run. The model and naming code
//! still never depends on map iteration order for anything it emits.

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;
