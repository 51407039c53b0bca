use crate::config::{Config, PopStrategy};
use crate::error::{Error, Result};
use crate::hash::{self, HashFunction};
use crate::iter::{Entry, Iter};
use crate::shard::Shard;
use crate::stats::{ShardOps, Stats};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Concurrent string-keyed map split across independently locked shards.
///
/// Every keyed operation hashes the key to exactly one shard and takes only
/// that shard's lock, so operations on different shards never block each
/// other. Values are stored as `Arc<V>` and handed out without copying.
///
/// Whole-map operations (`len`, `flush`, `pop`, the traversals) lock one
/// shard at a time. They never stall the entire map, but they also do not
/// observe a single consistent instant while other threads are writing.
///
/// # Example
///
/// ```rust
/// use syncmap::SyncMap;
///
/// let map = SyncMap::new();
/// map.set("user-42", "alice");
///
/// assert_eq!(*map.get("user-42").unwrap(), "alice");
/// assert_eq!(*map.get_joined(&["user", "42"]).unwrap(), "alice");
/// ```
pub struct SyncMap<V> {
    shards: Vec<Shard<V>>,
    shard_mask: usize,
    hash: HashFunction,
    pop_strategy: PopStrategy,
}

impl<V> SyncMap<V>
where
    V: Send + Sync,
{
    /// Create a new map with defaults (128 shards, FNV routing).
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a map with `shard_count` shards, or 128 when `shard_count` is 0.
    pub fn with_shard_count(shard_count: usize) -> Self {
        Self::with_config(Config::new().shard_count(shard_count))
    }

    /// Create a new map with custom config.
    pub fn with_config(config: Config) -> Self {
        let shard_count = config.shard_count.max(1);
        if !shard_count.is_power_of_two() {
            warn!(
                shard_count,
                "shard count is not a power of two; some shards will never receive keys"
            );
        }

        let shards = (0..shard_count)
            .map(|_| Shard::with_capacity(config.capacity_per_shard))
            .collect();

        debug!(
            shard_count,
            hash = ?config.hash_function,
            pop_strategy = ?config.pop_strategy,
            "syncmap created"
        );

        Self {
            shards,
            shard_mask: shard_count - 1,
            hash: config.hash_function,
            pop_strategy: config.pop_strategy,
        }
    }

    /// Index of the shard that owns `key`.
    ///
    /// Always the same index for the same key and configuration.
    #[inline]
    pub fn shard_index(&self, key: &str) -> usize {
        match self.hash {
            HashFunction::Fnv => hash::route(key, self.shards.len()),
            _ => (self.hash.hash_key(key) as usize) & self.shard_mask,
        }
    }

    #[inline]
    fn shard(&self, key: &str) -> &Shard<V> {
        &self.shards[self.shard_index(key)]
    }

    /// Number of shards, fixed at construction.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Look up a key. `None` means the key is absent.
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.shard(key).get(key)
    }

    /// Join `parts` with `-` and look up the result.
    ///
    /// No escaping is done, so `["a-b", "c"]` and `["a", "b-c"]` name the
    /// same key.
    pub fn get_joined(&self, parts: &[&str]) -> Option<Arc<V>> {
        self.get(&parts.join("-"))
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn set(&self, key: impl Into<String>, value: V) -> Option<Arc<V>> {
        self.set_arc(key, Arc::new(value))
    }

    /// Like [`SyncMap::set`] for a value that is already shared.
    pub fn set_arc(&self, key: impl Into<String>, value: Arc<V>) -> Option<Arc<V>> {
        let key = key.into();
        self.shard(&key).set(key, value)
    }

    /// Remove a key, returning its value. Removing an absent key does nothing.
    pub fn delete(&self, key: &str) -> Option<Arc<V>> {
        self.shard(key).delete(key)
    }

    /// Whether `key` is present right now.
    ///
    /// The answer can be stale by the time the caller acts on it.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Total number of entries, summed one shard at a time.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Alias for [`SyncMap::len`].
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Whether every shard was empty when visited.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.len() == 0)
    }

    /// Empty every shard and return how many entries were removed.
    pub fn flush(&self) -> usize {
        let removed: usize = self.shards.iter().map(|shard| shard.flush()).sum();
        debug!(removed, "syncmap flushed");
        removed
    }

    /// Remove and return an arbitrary entry.
    ///
    /// Returns [`Error::Empty`] if the map has no entries when the call
    /// starts. With [`PopStrategy::RandomProbe`] the search does not give up
    /// once that check has passed, so it waits for a writer if other threads
    /// empty the map concurrently.
    pub fn pop(&self) -> Result<(String, Arc<V>)> {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        match self.pop_strategy {
            PopStrategy::RandomProbe => Ok(self.pop_random_probe()),
            PopStrategy::Scan => self.pop_scan(),
        }
    }

    fn pop_random_probe(&self) -> (String, Arc<V>) {
        let mut rng = rand::thread_rng();
        let mut probes: u64 = 0;
        loop {
            let idx = rng.gen_range(0..self.shards.len());
            if let Some(entry) = self.shards[idx].pop_any() {
                return entry;
            }
            probes += 1;
            trace!(shard = idx, probes, "pop probed an empty shard");
        }
    }

    fn pop_scan(&self) -> Result<(String, Arc<V>)> {
        let n = self.shards.len();
        let start = rand::thread_rng().gen_range(0..n);
        (0..n)
            .map(|offset| (start + offset) % n)
            .find_map(|idx| self.shards[idx].pop_any())
            .ok_or(Error::Empty)
    }

    /// Visit every key, shard by shard, until `visit` returns `false`.
    ///
    /// Each shard's read lock is held while its keys are visited. Writing to
    /// the shard being visited from inside `visit` deadlocks.
    pub fn each_key_with_break<F>(&self, mut visit: F)
    where
        F: FnMut(&str) -> bool,
    {
        for shard in &self.shards {
            let items = shard.read();
            for key in items.keys() {
                if !visit(key.as_str()) {
                    return;
                }
            }
        }
    }

    /// Visit every entry, shard by shard, until `visit` returns `false`.
    ///
    /// Same locking rules as [`SyncMap::each_key_with_break`].
    pub fn each_item_with_break<F>(&self, mut visit: F)
    where
        F: FnMut(Entry<V>) -> bool,
    {
        for shard in &self.shards {
            let items = shard.read();
            for (key, value) in items.iter() {
                if !visit(Entry::new(key, value)) {
                    return;
                }
            }
        }
    }

    /// Visit every entry.
    pub fn each_item<F>(&self, mut visit: F)
    where
        F: FnMut(Entry<V>),
    {
        self.each_item_with_break(|entry| {
            visit(entry);
            true
        });
    }

    /// Lazily iterate over every entry.
    ///
    /// No lock is held between items, so the map may be written while the
    /// iterator is alive, and dropping it early is always safe.
    ///
    /// ```rust
    /// use syncmap::SyncMap;
    ///
    /// let map = SyncMap::with_shard_count(4);
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// let total: i32 = map.iter_items().map(|entry| *entry.value).sum();
    /// assert_eq!(total, 3);
    /// ```
    pub fn iter_items(&self) -> Iter<'_, V> {
        Iter::new(&self.shards)
    }

    /// Number of entries in each shard, in shard order.
    pub fn shard_loads(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.len()).collect()
    }

    /// Sizes and operation counters for every shard.
    pub fn stats(&self) -> Stats {
        let shard_sizes = self.shard_loads();
        let operations: Vec<ShardOps> = self.shards.iter().map(|s| s.stats()).collect();
        let size: usize = shard_sizes.iter().sum();

        Stats {
            size,
            shard_sizes,
            operations,
        }
    }
}

impl<V> Default for SyncMap<V>
where
    V: Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> IntoIterator for &'a SyncMap<V>
where
    V: Send + Sync,
{
    type Item = Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_items()
    }
}

impl<V> std::fmt::Debug for SyncMap<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncMap")
            .field("shard_count", &self.shards.len())
            .field("hash", &self.hash)
            .field("pop_strategy", &self.pop_strategy)
            .finish_non_exhaustive()
    }
}
