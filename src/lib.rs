//! chain-hashmap: a separately chained hash map built on a singly linked
//! list whose cursor can remove the element it points at in O(1).
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the two structures independent so each one's invariants can
//!   be checked on its own.
//! - Layers:
//!   - LinkedList<T>: boxed singly linked chain with a cached length, O(1)
//!     push/pop at the front, O(n) at the back, in-place reversal, and a
//!     `CursorMut` that holds the link slot referencing its current node.
//!   - ChainHashMap<K, V, S>: owns a `Vec` of `LinkedList<Entry<K, V>>`
//!     buckets and delegates every chain operation to the bucket's list. The
//!     list knows nothing about the map.
//!
//! Constraints
//! - Single-threaded use; mutation needs `&mut`, so callers that share a map
//!   across threads wrap the whole map in one lock.
//! - Pure ownership tree: map -> bucket array -> lists -> nodes. No `Rc`,
//!   no raw pointers, no `unsafe`.
//! - Errors are values: `ListError` for emptiness and bounds, `MapError` for
//!   missing keys and bucket bounds. Expected misses on `remove`/`contains`
//!   are plain `bool`s.
//!
//! Position handles
//! - The removal handle is a `CursorMut` borrowing the list. It points at the
//!   link slot (the list head or a node's `next`) that owns the current node,
//!   so removal rewrites that slot to the successor without a predecessor
//!   walk. A handle cannot outlive another mutation of the list: the borrow
//!   checker rejects it.
//! - `ChainHashMap::remove` is a cursor walk over one bucket; the same
//!   walk is public through `bucket_cursor_mut`, wrapped so removals keep the
//!   map's counters exact.
//!
//! Hashing and growth
//! - Each entry stores the `u64` hash computed at insertion; placement is
//!   `hash % bucket_count`. Growth doubles the bucket array and moves every
//!   entry, in chain order, to the front of its new bucket using the stored
//!   hash. `K: Hash` is never invoked after insertion.
//! - Growth triggers after inserting a new key when its chain is longer than
//!   `max_chain_len` or `used_buckets / bucket_count > max_load_factor`
//!   (defaults 8 buckets, 3, 0.8; see `GrowthPolicy`). A chain whose entries
//!   all share one hash never triggers growth since no bucket count splits it.
//! - `used_buckets` always equals the number of non-empty buckets: removal
//!   that empties a bucket decrements it and growth recounts it.
//!
//! Notes and non-goals
//! - No shrinking, no persistence, no serialization.
//! - No assignment-style deep copy: `Clone` is the only way to duplicate a
//!   list or map.

pub mod chain_hash_map;
mod chain_hash_map_proptest;
pub mod error;
pub mod linked_list;
mod linked_list_proptest;
pub mod policy;
mod test_hashers;

// Public surface
pub use chain_hash_map::{BucketCursor, ChainHashMap, Entry};
pub use error::{ListError, MapError};
pub use linked_list::{CursorMut, LinkedList};
pub use policy::GrowthPolicy;
