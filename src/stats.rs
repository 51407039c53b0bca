//! Per-shard load and operation counters.

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counts for one shard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardOps {
    /// Lookups that found their key.
    pub reads: u64,
    /// Inserts and overwrites.
    pub writes: u64,
    /// Entries removed by `delete`, `pop` or `flush`.
    pub removes: u64,
    /// Times the shard lock was taken (read or write).
    pub lock_acquisitions: u64,
}

impl ShardOps {
    /// Sum of reads, writes and removes.
    pub fn total(&self) -> u64 {
        self.reads + self.writes + self.removes
    }
}

/// Atomic counters attached to a shard.
#[cfg(feature = "metrics")]
#[derive(Default)]
pub(crate) struct ShardStats {
    reads: AtomicU64,
    writes: AtomicU64,
    removes: AtomicU64,
    lock_acquisitions: AtomicU64,
}

#[cfg(feature = "metrics")]
impl ShardStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_removes(&self, n: usize) {
        self.removes.fetch_add(n as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lock(&self) {
        self.lock_acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ShardOps {
        ShardOps {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            lock_acquisitions: self.lock_acquisitions.load(Ordering::Relaxed),
        }
    }
}

/// Zero-sized placeholder when metrics are disabled.
#[cfg(not(feature = "metrics"))]
#[derive(Default)]
pub(crate) struct ShardStats;

#[cfg(not(feature = "metrics"))]
impl ShardStats {
    pub fn new() -> Self {
        ShardStats
    }

    #[inline]
    pub fn record_read(&self) {}

    #[inline]
    pub fn record_write(&self) {}

    #[inline]
    pub fn record_removes(&self, _n: usize) {}

    #[inline]
    pub fn record_lock(&self) {}

    pub fn snapshot(&self) -> ShardOps {
        ShardOps::default()
    }
}

/// Aggregate view of a SyncMap, gathered one shard at a time.
///
/// Like `len()`, this is not a point-in-time snapshot of the whole map when
/// other threads are writing.
#[derive(Debug, Clone)]
pub struct Stats {
    /// Total number of entries across all shards.
    pub size: usize,
    /// Number of entries in each shard, in shard order.
    pub shard_sizes: Vec<usize>,
    /// Operation counts for each shard (all zero without the `metrics` feature).
    pub operations: Vec<ShardOps>,
}

impl Stats {
    /// Ratio of the fullest shard to the mean shard size. `0.0` for an empty map.
    pub fn max_load_ratio(&self) -> f64 {
        if self.size == 0 || self.shard_sizes.is_empty() {
            return 0.0;
        }
        let avg = self.size as f64 / self.shard_sizes.len() as f64;
        let max = self.shard_sizes.iter().copied().max().unwrap_or(0);
        max as f64 / avg
    }
}
