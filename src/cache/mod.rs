//! Cache Module
//!
//! Provides the capacity-bounded in-memory cache with LRU/LFU eviction,
//! TTL expiration, and asynchronous disk mirroring.

mod facade;
mod key;
mod policy;
mod resource;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use facade::Cache;
pub use key::{from_disk_name, to_disk_name};
pub use policy::EvictionPolicy;
pub use resource::{Headers, Resource};
pub use stats::CacheStats;

pub(crate) use store::CacheStore;
