use std::hash::{Hash, Hasher};

const FNV_OFFSET: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit FNV hash over the key bytes (multiply, then xor each byte).
#[inline]
pub fn fnv32(key: &str) -> u32 {
    let mut hash = FNV_OFFSET;
    for &byte in key.as_bytes() {
        hash = hash.wrapping_mul(FNV_PRIME);
        hash ^= u32::from(byte);
    }
    hash
}

/// Map a key to a shard index in `[0, shard_count)`.
///
/// `shard_count` must be a power of two. Other counts are not rejected: the
/// mask still keeps the index in range, but some shards are never used.
#[inline]
pub fn route(key: &str, shard_count: usize) -> usize {
    (fnv32(key) as usize) & shard_count.wrapping_sub(1)
}

/// Hash function used to pick a shard for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// The 32-bit FNV router hash (default).
    #[default]
    Fnv,
    /// AHash with fixed keys. Stable within one build of the crate.
    AHash,
    /// FxHash (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

impl HashFunction {
    /// Hash a key to determine which shard it belongs to.
    #[inline]
    pub fn hash_key(&self, key: &str) -> u64 {
        match self {
            HashFunction::Fnv => u64::from(fnv32(key)),
            HashFunction::AHash => {
                let mut hasher = ahash::AHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
            #[cfg(feature = "fxhash")]
            HashFunction::FxHash => {
                let mut hasher = fxhash::FxHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}
