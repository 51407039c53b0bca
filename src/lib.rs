//! # SyncMap
//!
//! A concurrent string-keyed map that spreads its keys over many
//! independently locked shards.
//!
//! A single lock around a map serializes every reader and writer. SyncMap
//! instead hashes each key to one of a fixed number of shards (128 by
//! default), each holding its own `RwLock`. Operations on different shards
//! never contend, which suits caches, counters and registries shared by many
//! threads.
//!
//! ## Features
//!
//! - **Sharded locking**: keyed operations lock exactly one shard
//! - **Deterministic routing**: a 32-bit FNV hash masked by `shard_count - 1`
//! - **Shared values**: values live behind `Arc<V>` and are handed out without copying
//! - **Traversal**: callback walks with early exit, plus a lazy iterator
//! - **Diagnostics**: per-shard loads and (with `metrics`) operation counts
//!
//! ## Example
//!
//! ```rust
//! use syncmap::SyncMap;
//!
//! let map = SyncMap::with_shard_count(4);
//!
//! map.set("a", 1);
//! map.set("b", 2);
//! map.set("c", 3);
//! assert_eq!(map.len(), 3);
//!
//! assert_eq!(*map.get("b").unwrap(), 2);
//! map.delete("b");
//! assert!(map.get("b").is_none());
//!
//! // Stop a walk early by returning false.
//! let mut seen = 0;
//! map.each_key_with_break(|_key| {
//!     seen += 1;
//!     false
//! });
//! assert_eq!(seen, 1);
//!
//! assert_eq!(map.flush(), 2);
//! assert!(map.is_empty());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use syncmap::{HashFunction, PopStrategy, SyncMapBuilder};
//!
//! let map = SyncMapBuilder::new()
//!     .shard_count(32)
//!     .hash_function(HashFunction::Fnv)
//!     .pop_strategy(PopStrategy::Scan)
//!     .build::<u64>();
//!
//! map.set("hits", 1);
//! let (key, value) = map.pop()?;
//! assert_eq!((key.as_str(), *value), ("hits", 1));
//! # Ok::<(), syncmap::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Configuration and builder types.
pub mod config;
/// Error types.
pub mod error;
/// Key routing.
pub mod hash;
/// Traversal types.
pub mod iter;
mod shard;
/// Per-shard counters.
pub mod stats;
mod syncmap;

pub use config::{Config, PopStrategy, SyncMapBuilder, DEFAULT_SHARD_COUNT};
pub use error::{Error, Result};
pub use hash::HashFunction;
pub use iter::{Entry, Iter};
pub use stats::{ShardOps, Stats};
pub use syncmap::SyncMap;
