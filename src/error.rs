//! Error types for list and map operations.
//!
//! Expected negative outcomes (a key that is simply absent on `remove` or
//! `contains`) are reported through `bool`/`Option`, not through these types.

use thiserror::Error;

/// Failures of `LinkedList` accessors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// `front`/`back`/`pop_*` on a list with no elements.
    #[error("list is empty")]
    Empty,

    /// Indexed access at or past the end of the list.
    #[error("list index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The list length at the time of the call
        len: usize,
    },
}

/// Failures of `ChainHashMap` accessors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// Lookup of a key that is not stored in the map.
    #[error("key not found")]
    KeyNotFound,

    /// Bucket query with an index at or past the bucket count.
    #[error("bucket index {index} out of bounds for {bucket_count} buckets")]
    BucketOutOfBounds { index: usize, bucket_count: usize },
}
