//! A hash-map using the `hashbrown` default hasher.
//!
//! Nothing in this crate depends on the iteration order of these maps, so the
//! results are deterministic regardless of the hasher's seed.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`].
pub type HashMap<K, V> = hashbrown::hash_map::HashMap<K, V, hashbrown::DefaultHashBuilder>;
