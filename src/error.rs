use thiserror::Error;

/// Result type alias for fallible `SyncMap` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by a SyncMap.
///
/// A missing key is never an error; lookups report absence with `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `pop` was called while the map held no entries.
    #[error("syncmap: map is empty")]
    Empty,
}
