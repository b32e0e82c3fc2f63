#![cfg(test)]

// Deterministic hashers for tests that depend on exact bucket placement.

use std::hash::{BuildHasher, BuildHasherDefault, Hasher};

/// Integers hash to themselves, so key `k` lands in bucket `k % bucket_count`.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(b);
        }
    }
    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
    fn write_usize(&mut self, n: usize) {
        self.0 = n as u64;
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

pub type IdentityBuildHasher = BuildHasherDefault<IdentityHasher>;

/// Every key hashes to 0: all entries collide in bucket 0.
#[derive(Clone, Default)]
pub struct ConstBuildHasher;
pub struct ConstHasher;

impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}

impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    } // force all keys into the same bucket
}
