//! Growth policy for `ChainHashMap`.

pub const DEFAULT_INITIAL_CAPACITY: usize = 8;
pub const DEFAULT_MAX_CHAIN_LEN: usize = 3;
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.8;

/// Bucket-array sizing rules.
///
/// The array starts at `initial_capacity` buckets and doubles whenever an
/// insertion leaves its bucket longer than `max_chain_len`, or leaves
/// `used_buckets / bucket_count` above `max_load_factor`. It never shrinks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GrowthPolicy {
    initial_capacity: usize,
    max_chain_len: usize,
    max_load_factor: f64,
}

impl GrowthPolicy {
    /// `initial_capacity` below 1 is raised to 1.
    pub fn new(initial_capacity: usize, max_chain_len: usize, max_load_factor: f64) -> Self {
        Self {
            initial_capacity: initial_capacity.max(1),
            max_chain_len,
            max_load_factor,
        }
    }

    pub fn with_initial_capacity(self, initial_capacity: usize) -> Self {
        Self {
            initial_capacity: initial_capacity.max(1),
            ..self
        }
    }

    pub fn with_max_chain_len(self, max_chain_len: usize) -> Self {
        Self {
            max_chain_len,
            ..self
        }
    }

    pub fn with_max_load_factor(self, max_load_factor: f64) -> Self {
        Self {
            max_load_factor,
            ..self
        }
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }
    pub fn max_chain_len(&self) -> usize {
        self.max_chain_len
    }
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub(crate) fn chain_too_long(&self, chain_len: usize) -> bool {
        chain_len > self.max_chain_len
    }

    pub(crate) fn overloaded(&self, used_buckets: usize, bucket_count: usize) -> bool {
        used_buckets as f64 / bucket_count as f64 > self.max_load_factor
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_INITIAL_CAPACITY,
            DEFAULT_MAX_CHAIN_LEN,
            DEFAULT_MAX_LOAD_FACTOR,
        )
    }
}
