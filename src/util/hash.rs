//! Hash functions used to key the deletion index.
//!
//! The deletion index never stores delete variants themselves, only their
//! hashes. Collisions are tolerated: every bucket entry is re-verified with an
//! exact edit distance before it becomes a suggestion.

use std::fmt::Debug;

use ahash::RandomState;

/// A deterministic hash over strings and byte sequences.
pub trait HashFunction: Send + Sync + Debug {
    /// Hash a byte sequence.
    fn hash_bytes(&self, bytes: &[u8]) -> u64;

    /// Hash a string.
    fn hash_str(&self, value: &str) -> u64 {
        self.hash_bytes(value.as_bytes())
    }
}

/// 64-bit aHash with fixed seeds, so hashes are stable across runs.
#[derive(Debug, Clone)]
pub struct AHashFunction {
    state: RandomState,
}

impl AHashFunction {
    pub const SEEDS: [u64; 4] = [805272099, 242851902, 646123436, 591410655];

    pub fn new() -> Self {
        Self::with_seeds(Self::SEEDS)
    }

    pub fn with_seeds(seeds: [u64; 4]) -> Self {
        AHashFunction {
            state: RandomState::with_seeds(seeds[0], seeds[1], seeds[2], seeds[3]),
        }
    }
}

impl Default for AHashFunction {
    fn default() -> Self {
        Self::new()
    }
}

impl HashFunction for AHashFunction {
    #[inline]
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        self.state.hash_one(bytes)
    }
}

/// 32-bit CRC hash. Smaller key space, so more collisions in large dictionaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32HashFunction;

impl HashFunction for Crc32HashFunction {
    #[inline]
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        crc32fast::hash(bytes) as u64
    }
}

/// Hash function that maps everything into a handful of buckets.
///
/// Only useful for exercising collision handling.
#[derive(Debug, Clone, Copy)]
pub struct ModuloHashFunction {
    buckets: u64,
}

impl ModuloHashFunction {
    pub fn new(buckets: u64) -> Self {
        ModuloHashFunction {
            buckets: buckets.max(1),
        }
    }
}

impl HashFunction for ModuloHashFunction {
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        crc32fast::hash(bytes) as u64 % self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ahash_is_deterministic() {
        let a = AHashFunction::new();
        let b = AHashFunction::default();

        assert_eq!(a.hash_str("players"), b.hash_str("players"));
        assert_eq!(a.hash_str(""), b.hash_str(""));
        assert_ne!(a.hash_str("players"), a.hash_str("payers"));
    }

    #[test]
    fn test_ahash_seeds_change_output() {
        let a = AHashFunction::new();
        let b = AHashFunction::with_seeds([1, 2, 3, 4]);

        assert_ne!(a.hash_str("players"), b.hash_str("players"));
    }

    #[test]
    fn test_crc32_fits_in_32_bits() {
        let crc = Crc32HashFunction;
        let hash = crc.hash_str("the quick brown fox");

        assert!(hash <= u32::MAX as u64);
        assert_eq!(hash, crc.hash_bytes(b"the quick brown fox"));
    }

    #[test]
    fn test_modulo_buckets() {
        let hasher = ModuloHashFunction::new(3);
        for word in ["a", "bb", "ccc", "dddd", "eeeee"] {
            assert!(hasher.hash_str(word) < 3);
        }

        let degenerate = ModuloHashFunction::new(0);
        assert_eq!(degenerate.hash_str("anything"), 0);
    }
}
