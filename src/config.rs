use crate::hash::HashFunction;

/// Shard count used when none (or zero) is configured.
pub const DEFAULT_SHARD_COUNT: usize = 128;

/// How `pop` looks for a non-empty shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopStrategy {
    /// Probe uniformly random shards until one yields an entry.
    ///
    /// The loop is unbounded: if other threads drain the map after the
    /// initial emptiness check, `pop` keeps probing until something is
    /// inserted again.
    #[default]
    RandomProbe,
    /// Start at a random shard and visit every shard once, wrapping around.
    /// Returns `Error::Empty` if all of them turn out to be empty.
    Scan,
}

/// Configuration for a SyncMap instance.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) shard_count: usize,
    pub(crate) hash_function: HashFunction,
    pub(crate) capacity_per_shard: usize,
    pub(crate) pop_strategy: PopStrategy,
}

impl Config {
    /// Create a new config with defaults (128 shards, FNV routing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of shards. Zero selects the default of 128.
    ///
    /// The count should be a power of two. Other values are accepted but
    /// leave some shards unreachable, since routing masks the hash with
    /// `shard_count - 1`.
    pub fn shard_count(mut self, count: usize) -> Self {
        self.shard_count = if count == 0 { DEFAULT_SHARD_COUNT } else { count };
        self
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hash_function = hash_fn;
        self
    }

    /// Set the initial capacity of each shard's map.
    pub fn capacity_per_shard(mut self, capacity: usize) -> Self {
        self.capacity_per_shard = capacity;
        self
    }

    /// Set how `pop` searches for an entry.
    pub fn pop_strategy(mut self, strategy: PopStrategy) -> Self {
        self.pop_strategy = strategy;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            hash_function: HashFunction::Fnv,
            capacity_per_shard: 0,
            pop_strategy: PopStrategy::RandomProbe,
        }
    }
}

/// Builder for creating a SyncMap with custom configuration.
#[derive(Debug, Default)]
pub struct SyncMapBuilder {
    config: Config,
}

impl SyncMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of shards. See [`Config::shard_count`].
    pub fn shard_count(mut self, count: usize) -> Self {
        self.config = self.config.shard_count(count);
        self
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Set the initial capacity of each shard's map.
    pub fn capacity_per_shard(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity_per_shard(capacity);
        self
    }

    /// Set how `pop` searches for an entry.
    pub fn pop_strategy(mut self, strategy: PopStrategy) -> Self {
        self.config = self.config.pop_strategy(strategy);
        self
    }

    /// Build a SyncMap with the configured settings.
    pub fn build<V>(self) -> crate::SyncMap<V>
    where
        V: Send + Sync,
    {
        crate::SyncMap::with_config(self.config)
    }
}
