//! Eviction Policy Module
//!
//! Strategy selecting the next victim when the cache is over capacity.
//! Both variants share one scan-based selection over the index.

use std::collections::HashMap;
use std::str::FromStr;

use crate::cache::Resource;
use crate::error::CacheError;

// == Eviction Policy ==
/// Replacement policy, fixed per cache instance at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Least recently used: victim is the resource with the oldest timestamp.
    Lru,
    /// Least frequently used: victim is the resource with the lowest access count.
    Lfu,
}

impl EvictionPolicy {
    // == Select Victim ==
    /// Scans the index and returns the key of the next resource to evict,
    /// or None if the index is empty.
    ///
    /// Ties break by map iteration order, which is unspecified and not
    /// guaranteed stable across runs.
    pub(crate) fn select_victim(&self, index: &HashMap<String, Resource>) -> Option<String> {
        match self {
            EvictionPolicy::Lru => index
                .iter()
                .min_by_key(|(_, res)| res.saved_at())
                .map(|(key, _)| key.clone()),
            EvictionPolicy::Lfu => index
                .iter()
                .min_by_key(|(_, res)| res.access_count())
                .map(|(key, _)| key.clone()),
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LRU" => Ok(EvictionPolicy::Lru),
            "LFU" => Ok(EvictionPolicy::Lfu),
            other => Err(CacheError::BadReplacementPolicy(other.to_string())),
        }
    }
}
