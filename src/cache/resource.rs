//! Resource Module
//!
//! Defines the record stored per cache key: the body bytes plus the
//! bookkeeping both replacement policies rely on.

use std::time::{Duration, Instant};

/// Ordered header multimap captured alongside a cached body.
pub type Headers = Vec<(String, String)>;

// == Resource ==
/// A single cached item.
///
/// `saved_at` doubles as freshness and recency: it is set when the resource
/// enters the cache and refreshed on every successful read. `access_count`
/// counts successful reads. LRU evicts the smallest `saved_at`, LFU the
/// smallest `access_count`, and the sweeper removes resources whose
/// `saved_at` is older than the TTL.
#[derive(Debug, Clone)]
pub struct Resource {
    body: Vec<u8>,
    saved_at: Instant,
    access_count: u64,
    headers: Option<Headers>,
}

impl Resource {
    // == Constructor ==
    /// Creates a resource as stored by Save. Never read yet.
    pub fn new(body: Vec<u8>, headers: Option<Headers>) -> Self {
        Self {
            body,
            saved_at: Instant::now(),
            access_count: 0,
            headers,
        }
    }

    /// Creates a resource reloaded from disk at startup.
    ///
    /// Rehydrated resources start at one access so a freshly loaded disk set
    /// is not immediately flushed by LFU pressure. Headers are not persisted,
    /// so a rehydrated resource carries none.
    pub fn rehydrated(body: Vec<u8>) -> Self {
        Self {
            body,
            saved_at: Instant::now(),
            access_count: 1,
            headers: None,
        }
    }

    // == Touch ==
    /// Records a successful read: bumps the access count and refreshes the
    /// timestamp. A resource read at least once per sweep interval therefore
    /// never expires.
    pub fn touch(&mut self) {
        self.access_count += 1;
        self.saved_at = Instant::now();
    }

    // == Accessors ==
    /// Size contribution of this resource, frozen at store time.
    pub fn size_bytes(&self) -> u64 {
        self.body.len() as u64
    }

    /// Time elapsed since this resource was stored or last read.
    pub fn age(&self) -> Duration {
        self.saved_at.elapsed()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    pub(crate) fn saved_at(&self) -> Instant {
        self.saved_at
    }

    pub(crate) fn access_count(&self) -> u64 {
        self.access_count
    }
}
