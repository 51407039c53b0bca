use crate::shard::Shard;
use std::sync::Arc;

/// A key and its value as observed during a traversal.
///
/// This is a copy taken under the shard's read lock, not a live view: later
/// writes to the map do not show up in an `Entry` already handed out.
#[derive(Debug)]
pub struct Entry<V> {
    /// The key.
    pub key: String,
    /// Shared handle to the value.
    pub value: Arc<V>,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: &str, value: &Arc<V>) -> Self {
        Self {
            key: key.to_string(),
            value: Arc::clone(value),
        }
    }

    /// Split into a `(key, value)` pair.
    pub fn into_pair(self) -> (String, Arc<V>) {
        (self.key, self.value)
    }
}

impl<V> Clone for Entry<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: Arc::clone(&self.value),
        }
    }
}

/// Lazy, one-shot sequence over every entry of a SyncMap.
///
/// Shards are visited in order. Each refill takes one shard's read lock,
/// copies that shard's entries into a buffer and releases the lock before
/// anything is yielded, so no lock is held between calls to `next()`.
/// Dropping the iterator part way through leaves nothing behind.
///
/// Writes to shards that have not been reached yet may or may not be seen.
pub struct Iter<'a, V> {
    shards: &'a [Shard<V>],
    next_shard: usize,
    buffer: std::vec::IntoIter<Entry<V>>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(shards: &'a [Shard<V>]) -> Self {
        Self {
            shards,
            next_shard: 0,
            buffer: Vec::new().into_iter(),
        }
    }

    /// Load the next non-empty shard. Returns false once all shards are done.
    fn fill_buffer(&mut self) -> bool {
        while let Some(shard) = self.shards.get(self.next_shard) {
            self.next_shard += 1;

            let entries: Vec<Entry<V>> = {
                let items = shard.read();
                items.iter().map(|(k, v)| Entry::new(k, v)).collect()
            };

            if !entries.is_empty() {
                self.buffer = entries.into_iter();
                return true;
            }
        }
        false
    }
}

impl<V> Iterator for Iter<'_, V> {
    type Item = Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.buffer.next() {
            return Some(entry);
        }
        if self.fill_buffer() {
            self.buffer.next()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Unvisited shards can grow at any time.
        (self.buffer.len(), None)
    }
}

impl<V> std::iter::FusedIterator for Iter<'_, V> {}
