//! Webcache - A capacity-bounded cache engine for an HTTP forward proxy
//!
//! Stores fetched resources keyed by locator, bounded by a byte capacity
//! enforced through a pluggable eviction policy (LRU or LFU). Entries are
//! mirrored to disk asynchronously, expired on a timer, and rehydrated from
//! disk at startup.

pub mod cache;
pub mod config;
pub mod disk;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats, EvictionPolicy, Headers};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
