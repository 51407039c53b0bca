use crate::stats::{ShardOps, ShardStats};
use hashbrown::HashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// The map owned by a single shard.
pub(crate) type Items<V> = HashMap<String, Arc<V>>;

/// A single shard: a string-keyed map behind its own read-write lock.
///
/// Two families of accessors exist. `get`, `set` and `delete` take the lock
/// themselves. The `*_unlocked` variants operate on a map borrowed from a
/// guard returned by `read()`/`write()`, so batch operations can do several
/// steps under one lock hold.
pub(crate) struct Shard<V> {
    items: RwLock<Items<V>>,
    capacity: usize,
    stats: ShardStats,
}

impl<V> Shard<V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: RwLock::new(HashMap::with_capacity(capacity)),
            capacity,
            stats: ShardStats::new(),
        }
    }

    /// Take the shared lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Items<V>> {
        self.stats.record_lock();
        self.items.read()
    }

    /// Take the exclusive lock.
    pub fn write(&self) -> RwLockWriteGuard<'_, Items<V>> {
        self.stats.record_lock();
        self.items.write()
    }

    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let items = self.read();
        self.get_unlocked(&items, key).cloned()
    }

    /// Insert or overwrite, returning the previous value.
    pub fn set(&self, key: String, value: Arc<V>) -> Option<Arc<V>> {
        let mut items = self.write();
        self.set_unlocked(&mut items, key, value)
    }

    /// Remove a key if present. Absent keys are a no-op.
    pub fn delete(&self, key: &str) -> Option<Arc<V>> {
        let mut items = self.write();
        self.delete_unlocked(&mut items, key)
    }

    pub fn get_unlocked<'a>(&self, items: &'a Items<V>, key: &str) -> Option<&'a Arc<V>> {
        let result = items.get(key);
        if result.is_some() {
            self.stats.record_read();
        }
        result
    }

    pub fn set_unlocked(
        &self,
        items: &mut Items<V>,
        key: String,
        value: Arc<V>,
    ) -> Option<Arc<V>> {
        self.stats.record_write();
        items.insert(key, value)
    }

    pub fn delete_unlocked(&self, items: &mut Items<V>, key: &str) -> Option<Arc<V>> {
        let result = items.remove(key);
        if result.is_some() {
            self.stats.record_removes(1);
        }
        result
    }

    /// Number of entries, read under the shared lock.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Swap in a fresh empty map and return how many entries the old one held.
    ///
    /// The old map is dropped after the lock is released.
    pub fn flush(&self) -> usize {
        let old = {
            let mut items = self.write();
            std::mem::replace(&mut *items, HashMap::with_capacity(self.capacity))
        };
        self.stats.record_removes(old.len());
        old.len()
    }

    /// Remove whichever entry the map yields first, if any.
    pub fn pop_any(&self) -> Option<(String, Arc<V>)> {
        let mut items = self.write();
        let key = items.keys().next()?.clone();
        let value = self.delete_unlocked(&mut items, &key)?;
        Some((key, value))
    }

    pub fn stats(&self) -> ShardOps {
        self.stats.snapshot()
    }
}

impl<V> Default for Shard<V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
