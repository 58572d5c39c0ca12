//! Cache Store Module
//!
//! The in-memory index and its size accounting: admission, the eviction
//! loop, and the expiration sweep. The store itself is not synchronized;
//! `Cache` wraps it in a single mutex and dispatches disk tasks from the
//! outcomes these methods return.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheStats, EvictionPolicy, Headers, Resource};
use crate::error::{CacheError, Result};

// == Save Outcome ==
/// What a successful save did besides the commit itself. The caller mirrors
/// this to disk after releasing the lock.
#[derive(Debug, Default)]
pub(crate) struct SaveOutcome {
    /// Keys evicted to make room, in eviction order.
    pub evicted: Vec<String>,
}

// == Cache Store ==
/// Byte-capacity-bounded index mapping locators to resources.
///
/// Invariants, true whenever no mutator is running:
/// - `current_size_bytes` equals the sum of all resource sizes in the index
/// - `current_size_bytes <= max_size_bytes`
#[derive(Debug)]
pub(crate) struct CacheStore {
    /// Key-resource index
    index: HashMap<String, Resource>,
    /// Replacement policy used under capacity pressure
    policy: EvictionPolicy,
    /// Capacity bound in bytes
    max_size_bytes: u64,
    /// Running total of stored body sizes
    current_size_bytes: u64,
    /// Performance counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given policy and capacity.
    pub fn new(policy: EvictionPolicy, max_size_bytes: u64) -> Self {
        Self {
            index: HashMap::new(),
            policy,
            max_size_bytes,
            current_size_bytes: 0,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Retrieves a resource by key, returning a copy of its body and headers.
    ///
    /// A hit bumps the access count and refreshes the timestamp, so reads
    /// feed both the LFU ordering and the LRU/expiry ordering. The body is
    /// cloned; the stored copy is never handed out for draining.
    pub fn get(&mut self, key: &str) -> Result<(Vec<u8>, Option<Headers>)> {
        match self.index.get_mut(key) {
            Some(resource) => {
                resource.touch();
                self.stats.record_hit();
                Ok((resource.body().to_vec(), resource.headers().cloned()))
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Save ==
    /// Stores a resource, evicting under the replacement policy until it fits.
    ///
    /// Replacing an existing key subtracts the old size before the new size
    /// is counted, so re-saving identical content never changes the total.
    /// A body larger than the whole capacity is rejected up front with
    /// `TooLarge`, leaving the index untouched; partial-eviction states are
    /// never observable.
    pub fn save(
        &mut self,
        key: String,
        body: Vec<u8>,
        headers: Option<Headers>,
    ) -> Result<SaveOutcome> {
        let new_size = body.len() as u64;
        if new_size > self.max_size_bytes {
            return Err(CacheError::TooLarge {
                key,
                size: new_size,
                max: self.max_size_bytes,
            });
        }

        let mut outcome = SaveOutcome::default();
        loop {
            let needed = match self.index.get(&key) {
                // The key is already present; its current copy would be
                // replaced, so its size frees up.
                Some(old) => new_size + self.current_size_bytes - old.size_bytes(),
                None => new_size + self.current_size_bytes,
            };

            if needed <= self.max_size_bytes {
                self.index.insert(key, Resource::new(body, headers));
                self.current_size_bytes = needed;
                return Ok(outcome);
            }

            // Over capacity: remove the policy's victim and retry. The
            // pre-check above guarantees a victim exists here, but an empty
            // scan must not loop forever regardless.
            let Some(victim) = self.policy.select_victim(&self.index) else {
                return Err(CacheError::TooLarge {
                    key,
                    size: new_size,
                    max: self.max_size_bytes,
                });
            };
            if self.remove(&victim) {
                self.stats.record_eviction();
                outcome.evicted.push(victim);
            }
        }
    }

    // == Remove ==
    /// Removes a resource from the index, adjusting the size counter.
    ///
    /// Removing an absent key is a no-op, not an error; eviction and the
    /// sweep only need "this key is gone now".
    pub fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(resource) => {
                self.current_size_bytes -= resource.size_bytes();
                true
            }
            None => false,
        }
    }

    // == Sweep Expired ==
    /// Removes every resource older than `ttl` and returns the removed keys
    /// so their disk copies can be deleted behind.
    pub fn sweep_expired(&mut self, ttl: Duration) -> Vec<String> {
        let expired: Vec<String> = self
            .index
            .iter()
            .filter(|(_, resource)| resource.age() > ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            if self.remove(key) {
                self.stats.record_expiration();
            }
        }
        expired
    }

    // == Rehydrate Entry ==
    /// Admits a resource reloaded from disk, without evicting. Returns false
    /// and drops the body if it does not fit in the remaining capacity.
    pub fn admit_rehydrated(&mut self, key: String, body: Vec<u8>) -> bool {
        let needed = self.current_size_bytes + body.len() as u64;
        if needed > self.max_size_bytes || self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, Resource::rehydrated(body));
        self.current_size_bytes = needed;
        true
    }

    // == Size ==
    /// Current total size of stored bodies, in bytes.
    pub fn size(&self) -> u64 {
        self.current_size_bytes
    }

    /// Capacity bound in bytes.
    pub fn max_size(&self) -> u64 {
        self.max_size_bytes
    }

    // == Stats ==
    /// Returns a snapshot of the performance counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.entries = self.index.len();
        stats.size_bytes = self.current_size_bytes;
        stats
    }

    // == Length ==
    /// Returns the current number of resources in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Recomputes the total size by summing the index, for checking the
    /// running counter against it.
    #[cfg(test)]
    pub fn summed_size(&self) -> u64 {
        self.index.values().map(|r| r.size_bytes()).sum()
    }
}
