//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug)]
pub enum CacheError {
    /// An unrecognized replacement policy was supplied at construction.
    #[error("bad replacement policy {0:?}: must be one of \"LRU\" or \"LFU\"")]
    BadReplacementPolicy(String),

    /// The requested resource is not in the cache. Routine miss signal;
    /// callers recover by fetching from origin and saving the result.
    #[error("resource not found in cache: {0}")]
    NotFound(String),

    /// The resource is larger than the whole cache capacity, so it cannot
    /// be admitted no matter how much is evicted.
    #[error("resource {key:?} is {size} bytes, larger than the cache capacity of {max} bytes")]
    TooLarge { key: String, size: u64, max: u64 },

    /// The mount directory could not be created or enumerated at startup.
    /// Disk errors after construction are swallowed; only construction-time
    /// mount failures surface.
    #[error("cache mount path error: {0}")]
    Mount(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
